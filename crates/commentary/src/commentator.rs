//! The commentary contract and its always-available fallback.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::CommentaryError;
use crate::types::Outcome;

/// Produces a short phrase for a finished game.
#[async_trait]
pub trait Commentator: Send + Sync {
    async fn comment(&self, outcome: Outcome, move_count: u32) -> Result<String, CommentaryError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Used when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCommentator;

#[async_trait]
impl Commentator for FallbackCommentator {
    async fn comment(&self, outcome: Outcome, _move_count: u32) -> Result<String, CommentaryError> {
        Ok(outcome.unconfigured_commentary().to_string())
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// Prompt sent to a text-generation service.
pub fn prompt(outcome: Outcome, move_count: u32) -> String {
    match outcome {
        Outcome::Won => format!(
            "A player just cleared an extremely hard tile-matching game in the style of \
             Sheep a Sheep, using {move_count} moves. Write a short, wildly enthusiastic, \
             celebratory comment of at most two sentences that praises their genius."
        ),
        Outcome::Lost => format!(
            "A player just lost a Sheep a Sheep style tile-matching game after {move_count} \
             moves. The game is famous for being maddeningly difficult. Write a short, \
             humorous, slightly teasing but ultimately comforting comment of at most two \
             sentences, and mention how hard the game is."
        ),
    }
}

/// Ask `commentator` for text, falling back on error, empty text or timeout.
pub async fn comment_or_fallback(
    commentator: &dyn Commentator,
    outcome: Outcome,
    move_count: u32,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, commentator.comment(outcome, move_count)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            debug!(commentator = commentator.name(), len = text.len(), "commentary received");
            text.trim().to_string()
        }
        Ok(Ok(_)) => {
            warn!(commentator = commentator.name(), "commentary was empty");
            outcome.failed_commentary().to_string()
        }
        Ok(Err(e)) => {
            warn!(commentator = commentator.name(), error = %e, "commentary failed");
            outcome.failed_commentary().to_string()
        }
        Err(_) => {
            warn!(
                commentator = commentator.name(),
                timeout_ms = timeout.as_millis() as u64,
                "commentary timed out"
            );
            outcome.failed_commentary().to_string()
        }
    }
}
