use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub status: String,
    pub message: String,
}

impl Health {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { status: "ok".into(), message: message.into() }
    }
}

/// Body used by every endpoint that only acknowledges an action.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
