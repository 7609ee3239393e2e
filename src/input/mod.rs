//! Parsed document input
pub mod document;

pub use document::{
    GENERATOR_KEY,
    RawRecord,
    document_value,
};
