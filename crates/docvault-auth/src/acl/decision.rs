//! The access decision for a single document.
//!
//! [`decide`] is pure: its verdict depends only on the document's
//! visibility, owner and grants, the requester's login and admin flag,
//! and whether a token accompanied the request.

use docvault_core::error::AppError;
use docvault_entity::document::{Document, DocumentSummary};
use docvault_entity::user::Identity;

/// What the caller wants to do with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Delete,
}

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AllowRead,
    AllowDelete,
    /// A token was required, or was supplied and did not validate.
    Unauthorized,
    /// The caller is anonymous or known but unrelated to the document.
    Forbidden,
}

impl Verdict {
    /// Convert a denial into the matching error.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::AllowRead | Self::AllowDelete => Ok(()),
            Self::Unauthorized => Err(AppError::authentication("Unauthorized.")),
            Self::Forbidden => Err(AppError::authorization("Access forbidden.")),
        }
    }
}

/// The document fields an access decision looks at.
#[derive(Debug, Clone, Copy)]
pub struct AccessTarget<'a> {
    pub is_public: bool,
    pub owner: &'a str,
    pub granted_to: &'a [String],
}

impl<'a> From<&'a Document> for AccessTarget<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            is_public: doc.is_public,
            owner: &doc.owner,
            granted_to: &doc.granted_to,
        }
    }
}

impl<'a> From<&'a DocumentSummary> for AccessTarget<'a> {
    fn from(doc: &'a DocumentSummary) -> Self {
        Self {
            is_public: doc.is_public,
            owner: &doc.owner,
            granted_to: &doc.granted_to,
        }
    }
}

/// Decide whether `requester` may perform `action` on `target`.
///
/// `requester` is the identity a token validated to; `token_present`
/// records whether any token was supplied at all, so `(None, true)` is a
/// token that failed validation.
pub fn decide(
    action: Action,
    target: AccessTarget<'_>,
    requester: Option<&Identity>,
    token_present: bool,
) -> Verdict {
    let related = requester.is_some_and(|r| {
        r.is_admin || r.login == target.owner || target.granted_to.iter().any(|g| *g == r.login)
    });

    match action {
        Action::Read => {
            if target.is_public || related {
                Verdict::AllowRead
            } else if requester.is_none() && token_present {
                Verdict::Unauthorized
            } else {
                Verdict::Forbidden
            }
        }
        Action::Delete => match requester {
            None => Verdict::Unauthorized,
            Some(_) if related => Verdict::AllowDelete,
            Some(_) => Verdict::Forbidden,
        },
    }
}
