//! ListTeamTypesHandler - lists the growth category taxonomies.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::taxonomy::CategoryTaxonomy;
use crate::ports::TaxonomyRepository;

pub struct ListTeamTypesHandler {
    taxonomy_repository: Arc<dyn TaxonomyRepository>,
}

impl ListTeamTypesHandler {
    pub fn new(taxonomy_repository: Arc<dyn TaxonomyRepository>) -> Self {
        Self {
            taxonomy_repository,
        }
    }

    pub async fn handle(&self) -> Result<Vec<CategoryTaxonomy>, DomainError> {
        self.taxonomy_repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::taxonomy::GrowthCategory;
    use crate::domain::team::TeamKind;
    use async_trait::async_trait;

    struct MockTaxonomyRepository {
        taxonomies: Vec<CategoryTaxonomy>,
    }

    #[async_trait]
    impl TaxonomyRepository for MockTaxonomyRepository {
        async fn find_by_team_kind(
            &self,
            kind: TeamKind,
        ) -> Result<Option<CategoryTaxonomy>, DomainError> {
            Ok(self.taxonomies.iter().find(|t| t.team_kind == kind).cloned())
        }

        async fn list_all(&self) -> Result<Vec<CategoryTaxonomy>, DomainError> {
            Ok(self.taxonomies.clone())
        }
    }

    #[tokio::test]
    async fn returns_all_taxonomies() {
        let taxonomy = CategoryTaxonomy::new(
            TeamKind::Family,
            vec![GrowthCategory {
                name: "Kindness".to_string(),
                description: "Being kind to each other".to_string(),
            }],
        );
        let handler = ListTeamTypesHandler::new(Arc::new(MockTaxonomyRepository {
            taxonomies: vec![taxonomy],
        }));

        let result = handler.handle().await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].team_kind, TeamKind::Family);
    }
}
