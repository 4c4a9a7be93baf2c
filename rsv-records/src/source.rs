use serde::Serialize;
use std::path::PathBuf;

/// Embedded CSV data for the first default reservoir.
pub static CSV_EMBALSE_1: &str = include_str!("../../fixtures/embalse1.csv");

/// Embedded CSV data for the second default reservoir.
pub static CSV_EMBALSE_2: &str = include_str!("../../fixtures/embalse2.csv");

/// Identifiers of the default reservoirs, in display order.
pub const DEFAULT_SOURCE_IDS: [&str; 2] = ["embalse-1", "embalse-2"];

/// Where the raw text of a source comes from.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum SourceLocation {
    /// Text compiled into the binary.
    Embedded(&'static str),
    File(PathBuf),
    /// Fetched over HTTP(S).
    Url(String),
}

impl SourceLocation {
    /// Classify a user supplied location: `http://` and `https://` prefixes
    /// are URLs, everything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceLocation::Url(location.to_string())
        } else {
            SourceLocation::File(PathBuf::from(location))
        }
    }
}

/// A configured reservoir source.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SourceConfig {
    pub source_id: String,
    pub location: SourceLocation,
}

impl SourceConfig {
    pub fn new(source_id: impl Into<String>, location: SourceLocation) -> Self {
        SourceConfig {
            source_id: source_id.into(),
            location,
        }
    }

    /// The two bundled reservoirs.
    pub fn get_default_sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig::new(DEFAULT_SOURCE_IDS[0], SourceLocation::Embedded(CSV_EMBALSE_1)),
            SourceConfig::new(DEFAULT_SOURCE_IDS[1], SourceLocation::Embedded(CSV_EMBALSE_2)),
        ]
    }
}
