//! Descriptor trees: serde records, JSON decoding, schema validation.

pub mod decode;
pub mod record;

pub use decode::{decode_attributes, decode_tree, validate};
pub use record::{AttributeSet, MenuDescriptor};
