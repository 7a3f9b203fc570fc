//! Document domain entities.

pub mod draft;
pub mod filter;
pub mod mime;
pub mod model;
pub mod payload;
pub mod query;

pub use draft::{DocumentDraft, NewDocument};
pub use filter::{AttributeFilter, FilterKey, FilterValue};
pub use mime::AllowedMimeType;
pub use model::{Document, DocumentSummary};
pub use payload::DocumentPayload;
pub use query::{DocumentQuery, ListScope};
