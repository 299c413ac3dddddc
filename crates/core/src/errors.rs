use thiserror::Error;

/// Unified error type for the entire energy-marketplace-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Local input validation ──────────────────────────────────────
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Computation ─────────────────────────────────────────────────
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    // ── Remote / Network ────────────────────────────────────────────
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Remote error (HTTP {status}): {detail}")]
    Remote { status: u16, detail: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// True for failures that came back from (or never reached) the remote
    /// service, as opposed to local validation errors.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound(_)
                | CoreError::Conflict(_)
                | CoreError::Remote { .. }
                | CoreError::Network(_)
                | CoreError::Deserialization(_)
        )
    }

    /// True when the target of a lookup or mutation does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Filter values end up in the URL; keep them out of user-facing messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_decode() {
            CoreError::Deserialization(sanitized)
        } else {
            CoreError::Network(sanitized)
        }
    }
}
