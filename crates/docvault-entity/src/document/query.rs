//! List query: visibility scope, attribute filter, and limit.

use serde::Serialize;

use docvault_core::types::ListLimit;

use super::filter::AttributeFilter;
use super::model::DocumentSummary;

/// Which documents a list call may return, decided per candidate.
///
/// A candidate is visible when `subject` owns it or holds a grant on it,
/// and, if `public_only` is set, it is public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListScope {
    pub subject: String,
    pub public_only: bool,
}

impl ListScope {
    /// Whether a candidate document belongs in the result.
    pub fn admits(&self, doc: &DocumentSummary) -> bool {
        doc.involves(&self.subject) && (!self.public_only || doc.is_public)
    }
}

/// Full list request as handed to the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentQuery {
    pub scope: ListScope,
    pub filter: Option<AttributeFilter>,
    pub limit: ListLimit,
}

impl DocumentQuery {
    /// Whether a candidate passes both the scope and the attribute filter.
    pub fn admits(&self, doc: &DocumentSummary) -> bool {
        self.scope.admits(doc) && self.filter.as_ref().is_none_or(|f| f.matches(doc))
    }
}
