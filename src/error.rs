use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single instruction produced no event.
///
/// These never abort a transaction; they are collected as diagnostics on the
/// [`TransactionResult`](crate::TransactionResult).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    #[error("program is not registered")]
    UnrecognizedProgram,

    #[error("no discriminator matched in the program family")]
    UnresolvedDiscriminator,

    #[error("instruction needs {required} accounts, got {got}")]
    InsufficientAccounts { required: usize, got: usize },

    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("instruction shape matched no category")]
    Unclassified,
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}
