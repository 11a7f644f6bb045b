use thiserror::Error;

/// Failures of the commentary service. None of them reach the game: they are
/// turned into fallback text by [`crate::comment_or_fallback`].
#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("commentary service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("commentary response had no text")]
    EmptyResponse,

    #[error("commentary runtime could not start: {0}")]
    Runtime(#[from] std::io::Error),
}
