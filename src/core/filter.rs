//! Client-side search over the in-memory credential list.

use crate::models::credential::Credential;

/// Return the credentials matching `term`, in their original order.
///
/// A credential matches when the lowercased term is a substring of its
/// lowercased platform, username, or domain (when present). An empty term
/// matches everything.
pub fn filter<'a>(credentials: &'a [Credential], term: &str) -> Vec<&'a Credential> {
    if term.is_empty() {
        return credentials.iter().collect();
    }
    let q = term.to_lowercase();
    credentials
        .iter()
        .filter(|c| matches(c, &q))
        .collect()
}

/// `query` must already be lowercased.
pub fn matches(credential: &Credential, query: &str) -> bool {
    if credential.platform.to_lowercase().contains(query) {
        return true;
    }
    if credential.username.to_lowercase().contains(query) {
        return true;
    }
    if let Some(domain) = &credential.domain {
        if domain.to_lowercase().contains(query) {
            return true;
        }
    }
    false
}
