//! Visibility scope for document listing.

use docvault_entity::document::ListScope;
use docvault_entity::user::Identity;

/// Which documents `requester` may list for an optional login filter.
///
/// Without a filter, or with the requester's own login, the scope is the
/// requester's own documents (owned or granted). For another login it is
/// that login's documents, restricted to public ones unless the requester
/// is an admin.
pub fn list_scope(requester: &Identity, login_filter: Option<&str>) -> ListScope {
    match login_filter.map(str::trim).filter(|l| !l.is_empty()) {
        None => ListScope {
            subject: requester.login.clone(),
            public_only: false,
        },
        Some(login) if login == requester.login => ListScope {
            subject: requester.login.clone(),
            public_only: false,
        },
        Some(login) => ListScope {
            subject: login.to_string(),
            public_only: !requester.is_admin,
        },
    }
}
