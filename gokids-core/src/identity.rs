use serde::{Deserialize, Serialize};

/// The authenticated parent behind a request. Every operation in the
/// scheduling workflow takes this explicitly; there is no ambient
/// "current user" anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: i64,
}

impl SessionContext {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
