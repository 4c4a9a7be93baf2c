//! Core types for yearly reservoir level records.
//!
//! Raw per-source text is parsed into [`record::YearlyRecord`]s by
//! [`parser::parse_yearly_csv`] and held per source in a
//! [`store::SourceStore`], which also performs year de-duplication.

pub mod parser;
pub mod record;
pub mod source;
pub mod store;
