//! TaxonomyRepository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::taxonomy::CategoryTaxonomy;
use crate::domain::team::TeamKind;

/// Port for reading the growth category taxonomies.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Taxonomy seeding the classification labels for one team kind.
    async fn find_by_team_kind(
        &self,
        kind: TeamKind,
    ) -> Result<Option<CategoryTaxonomy>, DomainError>;

    /// All taxonomies, for the team types listing.
    async fn list_all(&self) -> Result<Vec<CategoryTaxonomy>, DomainError>;
}
