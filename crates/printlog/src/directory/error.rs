//! Directory-service error types.

use thiserror::Error;

/// Errors from directory-service operations.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Protocol or transport error from the LDAP client.
    #[error("LDAP error: {0}")]
    Ldap(#[from] ldap3::LdapError),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
