//! Store error types.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing or invalid store configuration.
    #[error("store config error: {0}")]
    Config(String),

    /// The store rejected the query.
    #[error("store error {status_code}: {message}")]
    Api { status_code: u16, message: String },

    /// Authentication failed (401/403).
    #[error("store auth error: {0}")]
    Auth(String),

    /// No row with this id.
    #[error("credential \"{id}\" not found")]
    NotFound { id: String },

    /// The store accepted the insert but returned no row.
    #[error("store returned no row for the insert")]
    EmptyInsert,

    #[error("store request timed out")]
    Timeout,

    #[error("store network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("store json error: {0}")]
    Json(#[from] serde_json::Error),
}
