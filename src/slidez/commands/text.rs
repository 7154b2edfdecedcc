use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::request::{Batch, Request};
use crate::service::DocumentService;
use crate::walker::{extract_all_text, search_text};

#[derive(Debug, Clone)]
pub struct ReplaceText {
    pub find: String,
    pub replace: String,
}

/// Replaces every occurrence across the whole presentation, ignoring case.
pub fn replace<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: ReplaceText,
) -> Result<CmdResult> {
    if opts.find.is_empty() {
        let err = SlidezError::MalformedInput("search text must not be empty".to_string());
        return Err(err.during("replacing text"));
    }
    let batch = Batch::single(Request::replace_all_text(&opts.find, &opts.replace));
    submit(docs, presentation_id, batch, "replacing text")?;

    let message = format!("Text replaced: '{}' -> '{}'", opts.find, opts.replace);
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}

pub fn extract_all<D: DocumentService>(docs: &D, presentation_id: &str) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    Ok(CmdResult::default().with_text(extract_all_text(&snapshot)))
}

pub fn search<D: DocumentService>(
    docs: &D,
    presentation_id: &str,
    query: &str,
) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let matches = search_text(&snapshot, query);
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info(format!("No matches for '{}'", query)));
    }
    Ok(result.with_matches(matches))
}
