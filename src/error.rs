use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Template has {segments} literal segments but {values} values: expected exactly one more segment than values")]
    TemplateArity { segments: usize, values: usize },

    #[error("Invalid document config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Guard(#[from] GuardError),
}

/// Why a surface message was rejected. Only used for diagnostics: callers that
/// need a yes/no answer use the boolean guards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Message is not an envelope: expected an object with a string 'command'")]
    NotAnEnvelope,

    #[error("Command mismatch: expected '{expected}', found '{found}'")]
    CommandMismatch { expected: String, found: String },

    #[error("Unknown command '{command}'")]
    UnknownCommand { command: String },

    #[error("Command '{command}' requires an object 'data' payload")]
    MissingData { command: String },

    #[error("Invalid payload for command '{command}': {reason}")]
    InvalidPayload { command: String, reason: String },
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for BridgeError {
    fn from(err: serde_yaml::Error) -> Self {
        BridgeError::InvalidConfig(err.to_string())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}
