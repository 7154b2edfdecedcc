//! # Command layer
//!
//! One module per area of the tool. Every command that addresses an existing
//! slide fetches a fresh snapshot, resolves ordinals against it, assembles a
//! [`Batch`] and submits it. Nothing here prints; results come back as
//! [`CmdResult`] for the CLI to render.

use crate::config::SlidezConfig;
use crate::error::Result;
use crate::model::Presentation;
use crate::request::Batch;
use crate::service::DocumentService;
use crate::walker::TextMatch;
use std::collections::BTreeMap;

pub mod config;
pub mod export;
pub mod notes;
pub mod presentation;
pub mod shape;
pub mod slides;
pub mod style;
pub mod table;
pub mod text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Identifier of the element or document the command created.
    pub created_id: Option<String>,
    /// Plain text output (extracted text, notes of one slide).
    pub text: Option<String>,
    pub matches: Option<Vec<TextMatch>>,
    pub notes: Option<BTreeMap<String, String>>,
    pub config: Option<SlidezConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_created_id(mut self, id: impl Into<String>) -> Self {
        self.created_id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_matches(mut self, matches: Vec<TextMatch>) -> Self {
        self.matches = Some(matches);
        self
    }

    pub fn with_notes(mut self, notes: BTreeMap<String, String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_config(mut self, config: SlidezConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Fetches the snapshot a command resolves its ordinals against.
pub(crate) fn fetch<D: DocumentService>(docs: &D, presentation_id: &str) -> Result<Presentation> {
    docs.fetch_snapshot(presentation_id)
        .map_err(|e| e.during("getting presentation"))
}

/// Submits one batch. On failure nothing was applied.
pub(crate) fn submit<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    batch: Batch,
    during: &'static str,
) -> Result<()> {
    tracing::debug!(
        presentation = presentation_id,
        requests = batch.len(),
        "submitting batch"
    );
    docs.apply_batch(presentation_id, &batch)
        .map_err(|e| e.during(during))
}
