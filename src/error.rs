// src/error.rs
// Error types shared by the synthesis pipeline

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Tone shape name not in {sine, saw, triangle, square}.
    #[error("invalid tone generator type: '{0}' (expected sine, saw, triangle or square)")]
    InvalidToneShape(String),

    /// Code table entries that are empty or use symbols other than dit, dah and word gap.
    #[error("invalid morse codes provided: {}", format_entries(.entries))]
    InvalidCodeTable { entries: Vec<(char, String)> },

    /// A numeric parameter outside its accepted range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Nothing left to encode after trimming.
    #[error("no input provided")]
    EmptyInput,

    /// A token string carries symbols the sampler cannot render.
    #[error("synthesis integrity violated: {0}")]
    SynthesisIntegrity(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("code table JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Configuration errors are raised before any processing begins and abort the run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidToneShape(_) | Error::InvalidCodeTable { .. } | Error::InvalidParameter { .. }
        )
    }

    pub(crate) fn parameter(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

fn format_entries(entries: &[(char, String)]) -> String {
    entries
        .iter()
        .map(|(key, code)| format!("{:?} => {:?}", key, code))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(Error::InvalidToneShape("organ".into()).is_configuration());
        assert!(Error::parameter("frequency", "too low").is_configuration());
        assert!(!Error::EmptyInput.is_configuration());
        assert!(!Error::SynthesisIntegrity("x".into()).is_configuration());
    }

    #[test]
    fn test_code_table_message_lists_entries() {
        let err = Error::InvalidCodeTable {
            entries: vec![('A', String::new()), ('B', "-^".into())],
        };
        let msg = err.to_string();
        assert!(msg.contains("'A' => \"\""));
        assert!(msg.contains("'B' => \"-^\""));
    }
}
