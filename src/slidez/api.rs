//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every slidez operation, whatever the front end.
//!
//! It dispatches to the matching command and returns `Result<CmdResult>`.
//! It does no business logic (that lives in `commands/*.rs`) and never writes
//! to stdout or stderr.
//!
//! ## Generic Over The Services
//!
//! `SlidesApi<D: DocumentService, F: FileService>`:
//! - Production: `SlidesApi<GoogleSlides, GoogleDrive>`
//! - Testing: `SlidesApi<InMemoryDocuments, InMemoryFiles>`
//!
//! so everything above the HTTP boundary can be tested without a network.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::service::{DocumentService, FileService};
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::Export;
pub use crate::commands::notes::AddNotes;
pub use crate::commands::presentation::CreatePresentation;
pub use crate::commands::shape::AddShape;
pub use crate::commands::slides::{AddSlide, MoveSlide};
pub use crate::commands::style::CopyTextStyle;
pub use crate::commands::table::{CreateTable, StyleCell, UpdateCell};
pub use crate::commands::text::ReplaceText;

pub struct SlidesApi<D: DocumentService, F: FileService> {
    documents: D,
    files: F,
    config_dir: PathBuf,
}

impl<D: DocumentService, F: FileService> SlidesApi<D, F> {
    pub fn new(documents: D, files: F, config_dir: PathBuf) -> Self {
        Self {
            documents,
            files,
            config_dir,
        }
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut D {
        &mut self.documents
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn create_presentation(&mut self, opts: CreatePresentation) -> Result<CmdResult> {
        commands::presentation::create(&mut self.documents, &mut self.files, opts)
    }

    pub fn add_slide(&mut self, presentation_id: &str, opts: AddSlide) -> Result<CmdResult> {
        commands::slides::add(&mut self.documents, presentation_id, opts)
    }

    pub fn duplicate_slide(
        &mut self,
        presentation_id: &str,
        slide_index: i64,
    ) -> Result<CmdResult> {
        commands::slides::duplicate(&mut self.documents, presentation_id, slide_index)
    }

    pub fn remove_slide(&mut self, presentation_id: &str, slide_index: i64) -> Result<CmdResult> {
        commands::slides::remove(&mut self.documents, presentation_id, slide_index)
    }

    pub fn move_slide(&mut self, presentation_id: &str, opts: MoveSlide) -> Result<CmdResult> {
        commands::slides::move_to(&mut self.documents, presentation_id, opts)
    }

    /// `order` is a comma separated list of slide indexes, e.g. `"2,0,1"`.
    pub fn reorder_slides(&mut self, presentation_id: &str, order: &str) -> Result<CmdResult> {
        commands::slides::reorder(&mut self.documents, presentation_id, order)
    }

    pub fn create_table(&mut self, presentation_id: &str, opts: CreateTable) -> Result<CmdResult> {
        commands::table::create(&mut self.documents, presentation_id, opts)
    }

    pub fn update_cell(&mut self, presentation_id: &str, opts: UpdateCell) -> Result<CmdResult> {
        commands::table::update_cell(&mut self.documents, presentation_id, opts)
    }

    pub fn style_cell(&mut self, presentation_id: &str, opts: StyleCell) -> Result<CmdResult> {
        commands::table::style_cell(&mut self.documents, presentation_id, opts)
    }

    pub fn copy_text_style(
        &mut self,
        presentation_id: &str,
        opts: CopyTextStyle,
    ) -> Result<CmdResult> {
        commands::style::copy_text_style(&mut self.documents, presentation_id, opts)
    }

    pub fn replace_text(&mut self, presentation_id: &str, opts: ReplaceText) -> Result<CmdResult> {
        commands::text::replace(&mut self.documents, presentation_id, opts)
    }

    pub fn extract_all_text(&self, presentation_id: &str) -> Result<CmdResult> {
        commands::text::extract_all(&self.documents, presentation_id)
    }

    pub fn search_text(&self, presentation_id: &str, query: &str) -> Result<CmdResult> {
        commands::text::search(&self.documents, presentation_id, query)
    }

    pub fn get_notes(&self, presentation_id: &str, slide_index: i64) -> Result<CmdResult> {
        commands::notes::get(&self.documents, presentation_id, slide_index)
    }

    pub fn add_notes(&mut self, presentation_id: &str, opts: AddNotes) -> Result<CmdResult> {
        commands::notes::add(&mut self.documents, presentation_id, opts)
    }

    pub fn extract_all_notes(&self, presentation_id: &str) -> Result<CmdResult> {
        commands::notes::extract_all(&self.documents, presentation_id)
    }

    pub fn add_shape(&mut self, presentation_id: &str, opts: AddShape) -> Result<CmdResult> {
        commands::shape::add(&mut self.documents, presentation_id, opts)
    }

    pub fn export(&self, presentation_id: &str, opts: Export) -> Result<CmdResult> {
        commands::export::run(&self.files, presentation_id, opts)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}
