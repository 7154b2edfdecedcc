use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::ids::new_id;
use crate::request::{Batch, CellLocation, Request, RgbColor};
use crate::resolve::resolve_slide;
use crate::service::DocumentService;

#[derive(Debug, Clone, Copy)]
pub struct CreateTable {
    pub slide_index: i64,
    pub rows: u32,
    pub columns: u32,
}

/// Cells are addressed by the table id returned at creation. The cell
/// coordinates are checked by the service when the batch is applied.
#[derive(Debug, Clone)]
pub struct UpdateCell {
    pub table_id: String,
    pub row: u32,
    pub column: u32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct StyleCell {
    pub table_id: String,
    pub row: u32,
    pub column: u32,
    /// `#RRGGBB`
    pub background: String,
}

pub fn create<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: CreateTable,
) -> Result<CmdResult> {
    let (rows, columns) = (opts.rows, opts.columns);
    if rows == 0 || columns == 0 {
        let message =
            format!("a table needs at least one row and one column, got {rows}x{columns}");
        return Err(SlidezError::MalformedInput(message).during("creating table"));
    }
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, opts.slide_index).map_err(|e| e.during("creating table"))?;

    let table_id = new_id("table");
    let request = Request::create_table(table_id.clone(), &slide.object_id, rows, columns);
    let batch = Batch::single(request);
    submit(docs, presentation_id, batch, "creating table")?;

    let message = format!("Table created ({}x{})", rows, columns);
    Ok(CmdResult::default()
        .with_created_id(table_id)
        .with_message(CmdMessage::success(message)))
}

pub fn update_cell<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: UpdateCell,
) -> Result<CmdResult> {
    let cell = CellLocation {
        row_index: opts.row,
        column_index: opts.column,
    };
    let batch = Batch::single(Request::insert_text(&opts.table_id, Some(cell), &opts.text));
    submit(docs, presentation_id, batch, "updating cell")?;

    let message = format!("Cell updated (row {}, col {})", opts.row, opts.column);
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}

pub fn style_cell<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: StyleCell,
) -> Result<CmdResult> {
    let color = RgbColor::from_hex(&opts.background).map_err(|e| e.during("styling cell"))?;
    let cell = CellLocation {
        row_index: opts.row,
        column_index: opts.column,
    };
    let batch = Batch::single(Request::cell_background(&opts.table_id, cell, color));
    submit(docs, presentation_id, batch, "styling cell")?;

    let message = format!("Cell styled (row {}, col {})", opts.row, opts.column);
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}
