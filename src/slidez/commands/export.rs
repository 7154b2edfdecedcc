use super::{CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::service::{ExportFormat, FileService};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Export {
    pub format: ExportFormat,
    pub output: PathBuf,
}

/// Downloads the export and writes the bytes verbatim to `output`.
pub fn run<F: FileService>(files: &F, presentation_id: &str, opts: Export) -> Result<CmdResult> {
    let bytes = files
        .export_as(presentation_id, opts.format)
        .map_err(|e| e.during("exporting presentation"))?;
    fs::write(&opts.output, &bytes).map_err(|e| SlidezError::Io(e).during("writing export"))?;

    tracing::debug!(
        bytes = bytes.len(),
        path = %opts.output.display(),
        "export written"
    );
    let message = format!(
        "Presentation exported as {}: {}",
        opts.format.label(),
        opts.output.display()
    );
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}
