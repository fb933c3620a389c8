use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("coefficient table unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed coefficient table: {0}")]
    MalformedSchema(String),

    #[error(
        "no matching formula found for using_own_eggs={using_own_eggs:?}, \
         attempted_ivf_previously={attempted_ivf_previously:?}, \
         reason_known={reason_known:?}"
    )]
    FormulaNotFound {
        using_own_eggs: String,
        attempted_ivf_previously: String,
        reason_known: String,
    },

    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} has invalid value {value}")]
    InvalidEnum { field: String, value: String },

    #[error("{field} must be {expected}. Got {value}")]
    OutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    #[error("{field} has invalid value {value}: {reason}")]
    InvalidCombination {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "exactly one of known reasons, unexplained_infertility or donotknow is required \
         ({active} selected)"
    )]
    AmbiguousDisclosure { active: usize },

    #[error("height of {feet}ft {inches}in cannot be used to derive BMI")]
    InvalidHeight { feet: u32, inches: u32 },

    #[error("config parse error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn invalid_enum(field: &str, value: &str) -> Self {
        Self::InvalidEnum {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn out_of_range(field: &str, value: &str, expected: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Validation failures are the caller's fault; everything else points at
    /// the table, the environment or the numeric edge cases.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::Required { .. }
                | Self::InvalidEnum { .. }
                | Self::OutOfRange { .. }
                | Self::InvalidCombination { .. }
                | Self::AmbiguousDisclosure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_faults() {
        assert!(EngineError::required("gravida").is_client_fault());
        assert!(EngineError::invalid_enum("ivf_used", "4").is_client_fault());
        assert!(EngineError::AmbiguousDisclosure { active: 2 }.is_client_fault());
    }

    #[test]
    fn table_and_numeric_errors_are_server_faults() {
        let not_found = EngineError::FormulaNotFound {
            using_own_eggs: "TRUE".to_string(),
            attempted_ivf_previously: "FALSE".to_string(),
            reason_known: "TRUE".to_string(),
        };
        assert!(!not_found.is_client_fault());
        assert!(!EngineError::MalformedSchema("bad".to_string()).is_client_fault());
        assert!(!EngineError::InvalidHeight { feet: 0, inches: 0 }.is_client_fault());
    }

    #[test]
    fn validation_messages_name_field_and_value() {
        let err = EngineError::out_of_range("age", "19", "between 20 and 50");
        assert_eq!(err.to_string(), "age must be between 20 and 50. Got 19");

        let err = EngineError::invalid_enum("gravida", "7");
        assert_eq!(err.to_string(), "gravida has invalid value 7");
    }
}
