//! Response envelope shared by every HTTP endpoint.

use serde::{Deserialize, Serialize};

/// Standard envelope: `{success, data?, message?}`.
///
/// `message` carries the user-facing explanation on failure and is
/// propagated verbatim to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
