//! Domain error types.

/// Top-level error type for divvy.
#[derive(Debug, thiserror::Error)]
pub enum DivvyError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("api error: {reason}")]
    Api { reason: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DivvyError {
    fn from(err: reqwest::Error) -> Self {
        DivvyError::Api {
            reason: err.to_string(),
        }
    }
}

impl From<&DivvyError> for std::process::ExitCode {
    fn from(err: &DivvyError) -> Self {
        let code: u8 = match err {
            DivvyError::Io(_) => 1,
            DivvyError::ConfigParse { .. }
            | DivvyError::ConfigMissing { .. }
            | DivvyError::ConfigInvalid { .. } => 2,
            DivvyError::Store { .. } => 3,
            DivvyError::Api { .. } => 4,
            DivvyError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = DivvyError::ConfigMissing {
            section: "polygon".into(),
            key: "api_key".into(),
        };
        assert_eq!(err.to_string(), "missing config key [polygon] api_key");

        let err = DivvyError::NoData {
            symbol: "SCHD".into(),
        };
        assert_eq!(err.to_string(), "no price data for SCHD");
    }
}
