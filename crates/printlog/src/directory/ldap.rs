//! LDAP client for Active Directory lookups.

use ldap3::{LdapConn, Scope, SearchEntry};
use log::{debug, info, warn};

use crate::config::DirectoryConfig;

use super::error::Result;
use super::DirectorySource;

/// Selects person-category user objects, excluding computers and contacts.
const PERSON_FILTER: &str = "(&(objectClass=user)(objectCategory=person))";

const ACCOUNT_NAME_ATTR: &str = "sAMAccountName";

/// Directory-service client bound to an Active Directory endpoint.
pub struct LdapDirectory {
    conn: LdapConn,
}

impl LdapDirectory {
    /// Connects to the configured server and performs a simple bind with a
    /// `DOMAIN\username` principal. A failed bind is reported to the caller,
    /// which treats it as "skip the enrichment phase".
    pub fn connect(config: &DirectoryConfig) -> Result<Self> {
        let url = if config.address.contains("://") {
            config.address.clone()
        } else {
            format!("ldap://{}", config.address)
        };

        let mut conn = LdapConn::new(&url)?;

        let principal = format!("{}\\{}", config.domain, config.username);
        conn.simple_bind(&principal, &config.password)?.success()?;

        info!("Bound to directory service at {}", url);

        Ok(Self { conn })
    }

    /// Releases the directory session. Errors here are logged only; the
    /// socket closes on drop regardless.
    pub fn unbind(mut self) {
        if let Err(e) = self.conn.unbind() {
            warn!("Failed to unbind from directory service: {}", e);
        }
    }
}

impl DirectorySource for LdapDirectory {
    fn search_accounts(&mut self, base: &str) -> Result<Vec<String>> {
        let (entries, _result) = self
            .conn
            .search(base, Scope::Subtree, PERSON_FILTER, vec![ACCOUNT_NAME_ATTR])?
            .success()?;

        let mut accounts = Vec::new();
        for entry in entries {
            let entry = SearchEntry::construct(entry);
            match entry.attrs.get(ACCOUNT_NAME_ATTR).and_then(|v| v.first()) {
                Some(account) => accounts.push(account.clone()),
                None => debug!("Entry {} has no {} attribute", entry.dn, ACCOUNT_NAME_ATTR),
            }
        }

        debug!("Found {} accounts under {}", accounts.len(), base);
        Ok(accounts)
    }
}
