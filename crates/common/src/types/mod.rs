use serde::{Deserialize, Serialize};

/// Body of the liveness probe served at `/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub hello: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self { hello: "world".to_string() }
    }
}
