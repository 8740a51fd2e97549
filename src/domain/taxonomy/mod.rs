//! Taxonomy module - growth categories available per team kind.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TaxonomyId, Timestamp};
use crate::domain::team::TeamKind;

/// One growth dimension a feedback message can be classified into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthCategory {
    pub name: String,
    pub description: String,
}

/// The set of growth categories for one team kind. Seeds the candidate
/// labels handed to the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    pub id: TaxonomyId,
    pub team_kind: TeamKind,
    pub categories: Vec<GrowthCategory>,
    pub created_at: Timestamp,
}

impl CategoryTaxonomy {
    pub fn new(team_kind: TeamKind, categories: Vec<GrowthCategory>) -> Self {
        Self {
            id: TaxonomyId::new(),
            team_kind,
            categories,
            created_at: Timestamp::now(),
        }
    }

    /// Category names, in declaration order.
    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_preserve_order() {
        let taxonomy = CategoryTaxonomy::new(
            TeamKind::Organisation,
            vec![
                GrowthCategory {
                    name: "Communication".to_string(),
                    description: "How clearly ideas are shared".to_string(),
                },
                GrowthCategory {
                    name: "Collaboration".to_string(),
                    description: "Working with others".to_string(),
                },
            ],
        );
        assert_eq!(taxonomy.labels(), vec!["Communication", "Collaboration"]);
    }
}
