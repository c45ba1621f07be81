pub mod loader;
pub mod types;

pub use loader::{annotation_files, read_record};
pub use types::{AnnotationRecord, BoundingBox, Element, ElementId};
