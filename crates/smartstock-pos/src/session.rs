//! The signed-in operator.

use serde::Serialize;
use smartstock_client::ClientConfig;

/// Who is operating the till. The closure request carries this user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorSession {
    pub user_id: i64,
    pub name: String,
}

impl OperatorSession {
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        OperatorSession {
            user_id,
            name: name.into(),
        }
    }

    /// Reads `[operator]` from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        OperatorSession::new(config.operator.user_id, config.operator.name.clone())
    }
}
