use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-item outcome of a create, update or delete call.
///
/// These endpoints answer `207 Multi-Status` with one block per resource
/// field, e.g. `{"campaigns": {"success": [...], "error": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiStatus {
    pub success: Vec<Value>,
    pub error: Vec<Value>,
}

impl MultiStatus {
    /// Reads the block stored under `field`, if there is one.
    #[must_use]
    pub fn from_response(response: &Value, field: &str) -> Option<Self> {
        let block = response.get(field)?;
        Self::deserialize(block).ok()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}
