//! Anthology collection extractor.
//!
//! Splits a flat anthology text file into document records and persists
//! collections as JSON:
//!   1. skip the fixed preamble ([`parser::PREAMBLE_LINES`])
//!   2. segment the remaining lines by blank-line runs ([`parser::segmenter`])
//!   3. save / reload the collection ([`store`])

pub mod document;
pub mod error;
pub mod parser;
pub mod settings;
pub mod stats;
pub mod store;

pub use document::Document;
pub use error::{CollectionError, Result};
pub use parser::{extract_collection, extract_collections, extract_from_reader, PREAMBLE_LINES};
pub use stats::CollectionStats;
pub use store::{load_collection_from_json, save_collection_as_json};
