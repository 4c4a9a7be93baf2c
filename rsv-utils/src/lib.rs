//! Shared utility functions for RSV crates.

/// Calendar month helpers
pub mod months {
    /// English month names, index 0 = January.
    pub const MONTH_NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Name of the month at a zero-based index, if it exists.
    pub fn month_name(index: usize) -> Option<&'static str> {
        MONTH_NAMES.get(index).copied()
    }

}

/// Number formatting for reports
pub mod format {
    /// Placeholder printed for a missing reading.
    pub const MISSING: &str = "—";

    /// Format with one decimal, or the missing placeholder.
    pub fn format_tenths(value: Option<f64>) -> String {
        value.map_or_else(|| MISSING.to_string(), |v| format!("{:.1}", v))
    }

    /// Format a difference with an explicit sign, e.g. "+3.2" or "-0.5".
    pub fn format_signed_tenths(value: Option<f64>) -> String {
        match value {
            Some(v) if v >= 0.0 => format!("+{:.1}", v),
            Some(v) => format!("{:.1}", v),
            None => MISSING.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_tenths() {
            assert_eq!(format_tenths(Some(12.345)), "12.3");
            assert_eq!(format_tenths(None), MISSING);
        }

        #[test]
        fn test_format_signed_tenths() {
            assert_eq!(format_signed_tenths(Some(3.21)), "+3.2");
            assert_eq!(format_signed_tenths(Some(0.0)), "+0.0");
            assert_eq!(format_signed_tenths(Some(-0.54)), "-0.5");
            assert_eq!(format_signed_tenths(None), MISSING);
        }
    }
}

/// Parsing of `ID=LOCATION` source arguments
pub mod sources {
    use crate::error::SourceSpecError;

    /// Split a source argument into its identifier and location.
    pub fn parse_source_spec(spec: &str) -> Result<(String, String), SourceSpecError> {
        let (id, location) = spec
            .split_once('=')
            .ok_or_else(|| SourceSpecError(format!("expected ID=LOCATION, got '{}'", spec)))?;
        let id = id.trim();
        let location = location.trim();
        if id.is_empty() {
            return Err(SourceSpecError(format!("missing source id in '{}'", spec)));
        }
        if location.is_empty() {
            return Err(SourceSpecError(format!("missing location for source '{}'", id)));
        }
        Ok((id.to_string(), location.to_string()))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_source_spec() {
            let (id, location) = parse_source_spec("north=data/north.csv").unwrap();
            assert_eq!(id, "north");
            assert_eq!(location, "data/north.csv");
        }

        #[test]
        fn test_parse_source_spec_keeps_url_query() {
            let (id, location) =
                parse_source_spec("south=https://example.org/get?file=south.csv").unwrap();
            assert_eq!(id, "south");
            assert_eq!(location, "https://example.org/get?file=south.csv");
        }

        #[test]
        fn test_parse_source_spec_rejects_bad_input() {
            assert!(parse_source_spec("no-separator").is_err());
            assert!(parse_source_spec("=file.csv").is_err());
            assert!(parse_source_spec("north=").is_err());
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct SourceSpecError(pub String);

    impl fmt::Display for SourceSpecError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Source error: {}", self.0)
        }
    }

    impl std::error::Error for SourceSpecError {}
}
