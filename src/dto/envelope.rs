use serde::{Deserialize, Serialize};

/// Successful response body: `{ "result": … }`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

/// Failure response body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
