//! Loading and writing delimited data files.

mod parser;
mod source;
mod writer;

pub use parser::{Parser, ParserConfig};
pub use source::{SourceMetadata, format_name};
pub use writer::{write_delimited, write_json_records};
