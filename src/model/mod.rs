//! Annotation data model.

mod annotation;
mod store;

pub use annotation::{AnnotationBox, BoxId, SelectionState};
pub use store::AnnotationStore;
