//! Posting service
//!
//! A run loads the content file, picks today's record, turns it into
//! messages and broadcasts them once. There is no retry and nothing is
//! recorded between runs.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::content;
use crate::error::{LinecastError, Result};
use crate::messages::build_messages;
use crate::platforms::Broadcaster;
use crate::selection::{select_explained, SelectionRule};
use crate::types::{BroadcastResponse, Message, PostRecord};

/// Today's post, selected and rendered but not yet sent
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPost {
    pub date: NaiveDate,
    pub selection: SelectionRule,
    pub record: PostRecord,
    pub messages: Vec<Message>,
}

/// Result of a completed broadcast
#[derive(Debug, Clone, Serialize)]
pub struct PostOutcome {
    #[serde(flatten)]
    pub post: PreparedPost,
    pub response: BroadcastResponse,
}

/// Load `content_path` and build the messages for `today`
///
/// # Errors
///
/// `LinecastError::ContentUnavailable` when the file is missing, malformed,
/// empty, or the selected record has neither text nor image.
pub fn prepare(content_path: &Path, today: NaiveDate) -> Result<PreparedPost> {
    let records = content::load(content_path);
    if records.is_empty() {
        return Err(LinecastError::ContentUnavailable(format!(
            "could not load any posts from {}",
            content_path.display()
        )));
    }

    let selection = select_explained(&records, today)?;
    match selection.rule {
        SelectionRule::ExactDate => debug!("Record pinned to {} selected", today),
        SelectionRule::DayOfYear { ordinal, index } => debug!(
            "No record pinned to {}, day {} selects index {} of {}",
            today,
            ordinal,
            index,
            records.len()
        ),
    }

    if !selection.record.is_postable() {
        return Err(LinecastError::ContentUnavailable(format!(
            "the post selected for {} has no text or image_url, nothing to send",
            today
        )));
    }

    Ok(PreparedPost {
        date: today,
        selection: selection.rule,
        record: selection.record.clone(),
        messages: build_messages(selection.record),
    })
}

#[derive(Clone)]
pub struct PostingService {
    broadcaster: Arc<dyn Broadcaster>,
}

impl PostingService {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// Broadcast an already prepared post
    pub async fn send(&self, post: PreparedPost) -> Result<PostOutcome> {
        info!(
            "Broadcasting {} message(s) for {} via {}",
            post.messages.len(),
            post.date,
            self.broadcaster.name()
        );

        let response = self.broadcaster.broadcast(&post.messages).await?;
        info!("Broadcast accepted with HTTP {}", response.status);

        Ok(PostOutcome { post, response })
    }

    /// Prepare and broadcast today's post
    pub async fn post(&self, content_path: &Path, today: NaiveDate) -> Result<PostOutcome> {
        let post = prepare(content_path, today)?;
        self.send(post).await
    }
}
