//! Remote collaborators: the document service and the file service.
//!
//! Commands talk to these traits only, so they run unchanged against the
//! Google HTTP backends in production and against the in-memory fakes in
//! tests.

use crate::error::Result;
use crate::model::Presentation;
use crate::request::Batch;

pub mod google;
pub mod memory;

/// Fetch, edit and create presentations.
pub trait DocumentService {
    /// Retrieves the full current tree of a presentation.
    fn fetch_snapshot(&self, presentation_id: &str) -> Result<Presentation>;

    /// Applies every request of `batch` in order, or none of them.
    fn apply_batch(&mut self, presentation_id: &str, batch: &Batch) -> Result<()>;

    /// Creates an empty presentation and returns its snapshot.
    fn create_document(&mut self, title: &str) -> Result<Presentation>;
}

/// Export and file placement.
pub trait FileService {
    fn export_as(&self, presentation_id: &str, format: ExportFormat) -> Result<Vec<u8>>;

    /// Adds the file to a folder.
    fn add_parent(&mut self, file_id: &str, folder_id: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Pptx,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Pptx => "PPTX",
        }
    }
}
