//! Directory-service lookups used to enrich stored records with
//! department labels.

pub mod enricher;
pub mod error;
pub mod ldap;

pub use enricher::{apply_assignments, collect_assignments, DepartmentAssignment, EnrichSummary};
pub use error::DirectoryError;
pub use ldap::LdapDirectory;

/// Seam over the directory service: everything the enricher needs is the
/// list of account names found under a search base.
pub trait DirectorySource {
    /// Returns the account names of person-category user objects under the
    /// given search base.
    fn search_accounts(&mut self, base: &str) -> Result<Vec<String>, DirectoryError>;
}
