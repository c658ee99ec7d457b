//! # verdict-referencing
//!
//! Schema indexing and JSON reference resolution for JSON Schema 2020-12 documents.
mod anchors;
mod error;
mod index;
pub mod meta;
mod pointer;
mod resolver;
mod specification;
pub mod uri;
mod vocabularies;

pub use anchors::{Anchor, AnchorKind};
pub use error::Error;
pub use index::{DocumentId, Index, IndexBuilder, Resource};
pub use pointer::unescape_segment;
pub use resolver::{Resolved, Resolver};
pub use specification::subresources_of;
pub use url::Url;
pub use vocabularies::{Vocabulary, VocabularySet};
