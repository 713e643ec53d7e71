pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text is not parseable JSON, even after the one-shot
    /// trailing-comma repair pass.
    #[error("mindmap JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The parsed value does not match the `{"Mindmap": {...}}` schema.
    #[error("mindmap schema error: {message}")]
    Schema { message: String },
}

impl Error {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}
