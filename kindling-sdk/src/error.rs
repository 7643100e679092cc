use std::ffi::NulError;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probe library returned a negative status from `getEvent`.
    #[error("probe returned error status {0}")]
    Status(i32),
    /// The probe library reported an event but left the slot null.
    #[error("probe reported status {status} but produced no event")]
    NullEvent { status: i32 },
    #[error("native probe already initialized in this process")]
    AlreadyInitialized,
    #[error("{field} contains an interior NUL byte")]
    InvalidIdentifier {
        field: &'static str,
        #[source]
        source: NulError,
    },
    #[error("malformed subscription `{0}`, expected NAME:CATEGORY")]
    MalformedSubscription(String),
    #[error("invalid probe config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// The raw probe status behind this error, if it came from `getEvent`.
    pub fn status(&self) -> Option<i32> {
        match self {
            ProbeError::Status(status) | ProbeError::NullEvent { status } => Some(*status),
            _ => None,
        }
    }
}
