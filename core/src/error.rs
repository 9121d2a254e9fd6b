use std::fmt;

/// Hvor i dokumentet en strukturfeil ble funnet (1-basert, i dokumentrekkefølge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub activity: Option<usize>,
    pub lap: Option<usize>,
    pub trackpoint: Option<usize>,
}

impl Location {
    pub fn document() -> Self {
        Self::default()
    }

    pub fn activity(activity: usize) -> Self {
        Self { activity: Some(activity), ..Self::default() }
    }

    pub fn lap(self, lap: usize) -> Self {
        Self { lap: Some(lap), ..self }
    }

    pub fn trackpoint(self, trackpoint: usize) -> Self {
        Self { trackpoint: Some(trackpoint), ..self }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(a) = self.activity {
            parts.push(format!("activity {a}"));
        }
        if let Some(l) = self.lap {
            parts.push(format!("lap {l}"));
        }
        if let Some(t) = self.trackpoint {
            parts.push(format!("trackpoint {t}"));
        }
        if parts.is_empty() {
            f.write_str("document")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("xml parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("malformed input: missing <{missing}> at {at}")]
    MalformedInput { missing: &'static str, at: Location },

    #[error("invalid IRI <{iri}>: {message}")]
    InvalidIri { iri: String, message: String },

    #[error("config parse at {path}: {message}")]
    Config { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ConvertError {
    pub fn missing(missing: &'static str, at: Location) -> Self {
        ConvertError::MalformedInput { missing, at }
    }

    /// Strukturfeil (manglende element), ikke ren XML-feil.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ConvertError::MalformedInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_lists_only_known_levels() {
        assert_eq!(Location::document().to_string(), "document");
        assert_eq!(Location::activity(2).lap(1).to_string(), "activity 2, lap 1");
        assert_eq!(
            Location::activity(1).lap(3).trackpoint(7).to_string(),
            "activity 1, lap 3, trackpoint 7"
        );
    }

    #[test]
    fn malformed_message_names_element_and_location() {
        let e = ConvertError::missing("Position", Location::activity(1).lap(1).trackpoint(4));
        assert!(e.is_malformed());
        assert_eq!(
            e.to_string(),
            "malformed input: missing <Position> at activity 1, lap 1, trackpoint 4"
        );
    }
}
