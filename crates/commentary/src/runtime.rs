//! Commentary runtime integration.
//!
//! Bridges the sync game loop with the async commentary client. Requests are
//! spawned on a private tokio runtime; replies come back over a channel that
//! the game loop drains with [`CommentaryRuntime::try_recv`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::commentator::{comment_or_fallback, Commentator};
use crate::config::CommentaryConfig;
use crate::error::CommentaryError;
use crate::types::{Outcome, OutcomeEvent};

/// Text for one finished episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryReply {
    pub episode_id: u32,
    pub outcome: Outcome,
    pub text: String,
}

/// Running commentary service.
pub struct CommentaryRuntime {
    rt: Runtime,
    commentator: Arc<dyn Commentator>,
    timeout: Duration,
    reply_tx: mpsc::UnboundedSender<CommentaryReply>,
    reply_rx: mpsc::UnboundedReceiver<CommentaryReply>,
}

impl CommentaryRuntime {
    pub fn start(commentator: Arc<dyn Commentator>, timeout: Duration) -> Result<Self, CommentaryError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("sheep-commentary")
            .enable_all()
            .build()?;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        info!(commentator = commentator.name(), "commentary runtime started");
        Ok(Self {
            rt,
            commentator,
            timeout,
            reply_tx,
            reply_rx,
        })
    }

    /// Start with the commentator selected by `SHEEP_COMMENTARY_*` variables.
    pub fn start_from_env() -> Result<Self, CommentaryError> {
        let config = CommentaryConfig::from_env();
        Self::start(config.build_commentator()?, config.timeout)
    }

    pub fn commentator_name(&self) -> &'static str {
        self.commentator.name()
    }

    /// Ask for text about `event`; the reply arrives later via `try_recv`.
    pub fn request(&self, event: OutcomeEvent) {
        let commentator = Arc::clone(&self.commentator);
        let tx = self.reply_tx.clone();
        let timeout = self.timeout;

        debug!(episode = event.episode_id, outcome = event.outcome.as_str(), "commentary requested");
        self.rt.spawn(async move {
            let text =
                comment_or_fallback(commentator.as_ref(), event.outcome, event.move_count, timeout)
                    .await;
            let _ = tx.send(CommentaryReply {
                episode_id: event.episode_id,
                outcome: event.outcome,
                text,
            });
        });
    }

    pub fn try_recv(&mut self) -> Option<CommentaryReply> {
        self.reply_rx.try_recv().ok()
    }
}
