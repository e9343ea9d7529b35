//! Ingestion of delimited text into datasets.

mod parser;

pub use parser::{Parser, ParserConfig};
