use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdmetError {
    #[error("malformed SMILES {smiles:?}: {reason}")]
    MalformedSmiles { smiles: String, reason: String },
    #[error("no usable SMILES in request")]
    EmptyInput,
    #[error("prediction failed: {0}")]
    Prediction(String),
    #[error("could not read uploaded file: {0}")]
    FileRead(String),
}

impl AdmetError {
    pub fn malformed(smiles: &str, reason: impl ToString) -> Self {
        Self::MalformedSmiles {
            smiles: smiles.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Errors caused by the request itself, reported with a 4xx status.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Prediction(_))
    }
}

impl From<std::io::Error> for AdmetError {
    fn from(e: std::io::Error) -> Self {
        Self::FileRead(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for AdmetError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::FileRead(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AdmetError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Prediction(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(AdmetError::malformed("C(", "unclosed branch").is_client_error());
        assert!(AdmetError::EmptyInput.is_client_error());
        assert!(AdmetError::FileRead("bad utf-8".to_string()).is_client_error());
        assert!(!AdmetError::Prediction("model crashed".to_string()).is_client_error());
    }

    #[test]
    fn test_malformed_message_names_input() {
        let err = AdmetError::malformed("garbage$$", "parse error");
        assert_eq!(
            err.to_string(),
            "malformed SMILES \"garbage$$\": parse error"
        );
    }
}
