//! Commentary module - end-of-game text from an external service
//!
//! When a game is won or lost the front end asks for a short phrase about the
//! result. The game never depends on the service: any failure, empty answer or
//! timeout is replaced by a fixed string per outcome.
//!
//! # Pieces
//!
//! - [`Commentator`]: the async contract (`outcome`, `move_count` → text)
//! - [`FallbackCommentator`]: fixed strings, used when nothing is configured
//! - [`GeminiCommentator`]: Gemini `generateContent` over HTTPS
//! - [`comment_or_fallback`]: timeout and error boundary
//! - [`CommentaryRuntime`]: private tokio runtime bridged to the sync game loop
//!
//! # Environment Variables
//!
//! - `SHEEP_COMMENTARY_DISABLED`: `1` or `true` forces the fallback
//! - `SHEEP_COMMENTARY_API_KEY`, then `GEMINI_API_KEY`, then `API_KEY`
//! - `SHEEP_COMMENTARY_MODEL`: default `gemini-2.5-flash`
//! - `SHEEP_COMMENTARY_ENDPOINT`: default `https://generativelanguage.googleapis.com`
//! - `SHEEP_COMMENTARY_TIMEOUT_MS`: default 4000

pub mod commentator;
pub mod config;
pub mod error;
pub mod gemini;
pub mod runtime;

pub use tui_sheep_types as types;

pub use commentator::{comment_or_fallback, prompt, Commentator, FallbackCommentator};
pub use config::CommentaryConfig;
pub use error::CommentaryError;
pub use gemini::GeminiCommentator;
pub use runtime::{CommentaryReply, CommentaryRuntime};
