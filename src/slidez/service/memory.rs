use super::{DocumentService, ExportFormat, FileService};
use crate::error::{Result, SlidezError};
use crate::model::{
    Page, PageElement, Presentation, Table, TableCell, TableRow, TextContent, TextElement, TextRun,
};
use crate::request::{Batch, CellLocation, Request};
use std::collections::HashMap;

/// In-memory document service for tests and development.
///
/// Batches are applied to a copy of the presentation which replaces the
/// stored one only if every request succeeds. References to unknown objects,
/// out-of-range cells and bad insertion indexes are rejected the way the
/// remote service rejects them.
#[derive(Debug, Default)]
pub struct InMemoryDocuments {
    presentations: HashMap<String, Presentation>,
    applied: Vec<(String, Batch)>,
    reject_next: Option<String>,
    created: usize,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.insert(presentation);
        self
    }

    pub fn insert(&mut self, presentation: Presentation) {
        self.presentations
            .insert(presentation.presentation_id.clone(), presentation);
    }

    pub fn presentation(&self, presentation_id: &str) -> Option<&Presentation> {
        self.presentations.get(presentation_id)
    }

    /// Batches that were applied, in submission order.
    pub fn applied_batches(&self) -> &[(String, Batch)] {
        &self.applied
    }

    /// Makes the next `apply_batch` fail with `Rejected(message)`.
    pub fn reject_next_batch(&mut self, message: impl Into<String>) {
        self.reject_next = Some(message.into());
    }
}

impl DocumentService for InMemoryDocuments {
    fn fetch_snapshot(&self, presentation_id: &str) -> Result<Presentation> {
        self.presentations
            .get(presentation_id)
            .cloned()
            .ok_or_else(|| SlidezError::NotFound(format!("presentation {}", presentation_id)))
    }

    fn apply_batch(&mut self, presentation_id: &str, batch: &Batch) -> Result<()> {
        let mut working = self.fetch_snapshot(presentation_id)?;
        if let Some(message) = self.reject_next.take() {
            return Err(SlidezError::Rejected(message));
        }
        for (i, request) in batch.requests().iter().enumerate() {
            apply(&mut working, request).map_err(|reason| {
                SlidezError::Rejected(format!("Invalid requests[{}]: {}", i, reason))
            })?;
        }
        let id = presentation_id.to_string();
        self.presentations.insert(id.clone(), working);
        self.applied.push((id, batch.clone()));
        Ok(())
    }

    fn create_document(&mut self, title: &str) -> Result<Presentation> {
        self.created += 1;
        let id = format!("memdoc_{}", self.created);
        let first = new_slide(&format!("{}_p1", id));
        let mut presentation = Presentation::new(id.clone(), vec![first]);
        presentation.title = title.to_string();
        self.insert(presentation.clone());
        Ok(presentation)
    }
}

/// In-memory file service. Exports must be seeded with [`InMemoryFiles::with_export`].
#[derive(Debug, Default)]
pub struct InMemoryFiles {
    exports: HashMap<(String, ExportFormat), Vec<u8>>,
    parents: Vec<(String, String)>,
}

impl InMemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(mut self, file_id: &str, format: ExportFormat, bytes: &[u8]) -> Self {
        self.exports
            .insert((file_id.to_string(), format), bytes.to_vec());
        self
    }

    /// `(file, folder)` pairs recorded by `add_parent`.
    pub fn parents(&self) -> &[(String, String)] {
        &self.parents
    }
}

impl FileService for InMemoryFiles {
    fn export_as(&self, presentation_id: &str, format: ExportFormat) -> Result<Vec<u8>> {
        self.exports
            .get(&(presentation_id.to_string(), format))
            .cloned()
            .ok_or_else(|| SlidezError::NotFound(format!("file {}", presentation_id)))
    }

    fn add_parent(&mut self, file_id: &str, folder_id: &str) -> Result<()> {
        self.parents
            .push((file_id.to_string(), folder_id.to_string()));
        Ok(())
    }
}

type Applied<T = ()> = std::result::Result<T, String>;

fn apply(pres: &mut Presentation, request: &Request) -> Applied {
    match request {
        Request::CreateSlide(req) => {
            ensure_unused(pres, &req.object_id)?;
            let slide = new_slide(&req.object_id);
            match req.insertion_index {
                Some(i) if i > pres.slides.len() => {
                    Err(format!("insertion index {} out of bounds", i))
                }
                Some(i) => {
                    pres.slides.insert(i, slide);
                    Ok(())
                }
                None => {
                    pres.slides.push(slide);
                    Ok(())
                }
            }
        }
        Request::DuplicateObject(req) => {
            let pos = slide_position(pres, &req.object_id)?;
            let suffix = unused_suffix(pres, &req.object_id);
            let mut copy = pres.slides[pos].clone();
            rename_page(&mut copy, &suffix);
            pres.slides.insert(pos + 1, copy);
            Ok(())
        }
        Request::DeleteObject(req) => {
            if let Ok(pos) = slide_position(pres, &req.object_id) {
                pres.slides.remove(pos);
                return Ok(());
            }
            for list in element_lists(pres) {
                if remove_from(list, &req.object_id) {
                    return Ok(());
                }
            }
            Err(format!("object {} not found", req.object_id))
        }
        Request::UpdateSlidesPosition(req) => {
            if req.insertion_index > pres.slides.len() {
                return Err(format!("insertion index {} out of bounds", req.insertion_index));
            }
            let mut positions = Vec::with_capacity(req.slide_object_ids.len());
            for id in &req.slide_object_ids {
                positions.push(slide_position(pres, id)?);
            }
            // The insertion index refers to the arrangement before the move.
            let target = req.insertion_index;
            let before = positions.iter().filter(|&&p| p < target).count();
            positions.sort_unstable();
            if positions.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err("slide listed more than once".to_string());
            }
            let moved: Vec<Page> = positions
                .iter()
                .rev()
                .map(|&p| pres.slides.remove(p))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            let mut at = target - before;
            for slide in moved {
                pres.slides.insert(at, slide);
                at += 1;
            }
            Ok(())
        }
        Request::CreateTable(req) => {
            ensure_unused(pres, &req.object_id)?;
            if req.rows == 0 || req.columns == 0 {
                return Err("tables need at least one row and column".to_string());
            }
            let page = page_mut(pres, &req.element_properties.page_object_id)?;
            let row = TableRow {
                table_cells: vec![TableCell::default(); req.columns as usize],
            };
            page.page_elements.push(PageElement {
                object_id: req.object_id.clone(),
                table: Some(Table {
                    rows: req.rows,
                    columns: req.columns,
                    table_rows: vec![row; req.rows as usize],
                }),
                ..Default::default()
            });
            Ok(())
        }
        Request::CreateShape(req) => {
            ensure_unused(pres, &req.object_id)?;
            let page = page_mut(pres, &req.element_properties.page_object_id)?;
            let shape = PageElement::empty_shape(req.object_id.clone(), &req.shape_type);
            page.page_elements.push(shape);
            Ok(())
        }
        Request::InsertText(req) => {
            let element = element_mut(pres, &req.object_id)?;
            let body = match req.cell_location {
                Some(cell) => cell_mut(element, cell)?,
                None => match element.shape.as_mut() {
                    Some(shape) => shape.text.get_or_insert_with(TextContent::default),
                    None => return Err(format!("object {} cannot hold text", req.object_id)),
                },
            };
            let run = TextRun {
                content: req.text.clone(),
                style: None,
            };
            let entry = TextElement {
                text_run: Some(run),
            };
            let at = req.insertion_index.min(body.text_elements.len());
            body.text_elements.insert(at, entry);
            Ok(())
        }
        Request::ReplaceAllText(req) => {
            if req.contains_text.text.is_empty() {
                return Err("search text must not be empty".to_string());
            }
            let needle = &req.contains_text.text;
            let replacement = &req.replace_text;
            for slide in &mut pres.slides {
                for_each_run(&mut slide.page_elements, &mut |run: &mut TextRun| {
                    run.content = replace_ignore_ascii_case(&run.content, needle, replacement);
                });
            }
            Ok(())
        }
        Request::UpdateTableCellProperties(req) => {
            let element = element_mut(pres, &req.object_id)?;
            cell_mut(element, req.table_range.location).map(|_| ())
        }
        Request::UpdateTextStyle(req) => {
            let element = element_mut(pres, &req.object_id)?;
            let body = element
                .shape
                .as_mut()
                .and_then(|shape| shape.text.as_mut())
                .ok_or_else(|| format!("object {} has no text", req.object_id))?;
            let runs = body
                .text_elements
                .iter_mut()
                .filter_map(|el| el.text_run.as_mut());
            for run in runs {
                let style = run.style.get_or_insert_with(serde_json::Map::new);
                for (key, value) in &req.style {
                    style.insert(key.clone(), value.clone());
                }
            }
            Ok(())
        }
    }
}

fn new_slide(object_id: &str) -> Page {
    let body = PageElement::empty_shape(format!("{}_notes_body", object_id), "TEXT_BOX");
    let notes = Page::new(format!("{}_notes", object_id), vec![body]);
    Page::new(object_id, vec![]).with_notes(notes)
}

fn slide_position(pres: &Presentation, object_id: &str) -> Applied<usize> {
    pres.slides
        .iter()
        .position(|slide| slide.object_id == object_id)
        .ok_or_else(|| format!("slide {} not found", object_id))
}

fn page_mut<'a>(pres: &'a mut Presentation, object_id: &str) -> Applied<&'a mut Page> {
    pres.slides
        .iter_mut()
        .find(|slide| slide.object_id == object_id)
        .ok_or_else(|| format!("page {} not found", object_id))
}

fn element_lists(pres: &mut Presentation) -> Vec<&mut Vec<PageElement>> {
    let mut lists = Vec::new();
    for slide in pres.slides.iter_mut() {
        lists.push(&mut slide.page_elements);
        if let Some(notes) = slide
            .slide_properties
            .as_mut()
            .and_then(|props| props.notes_page.as_mut())
        {
            lists.push(&mut notes.page_elements);
        }
    }
    lists
}

fn find_in<'a>(elements: &'a mut [PageElement], object_id: &str) -> Option<&'a mut PageElement> {
    for element in elements.iter_mut() {
        if element.object_id == object_id {
            return Some(element);
        }
        if let Some(group) = element.element_group.as_mut() {
            if let Some(found) = find_in(&mut group.children, object_id) {
                return Some(found);
            }
        }
    }
    None
}

fn element_mut<'a>(pres: &'a mut Presentation, object_id: &str) -> Applied<&'a mut PageElement> {
    element_lists(pres)
        .into_iter()
        .find_map(|list| find_in(list, object_id))
        .ok_or_else(|| format!("object {} not found", object_id))
}

fn remove_from(elements: &mut Vec<PageElement>, object_id: &str) -> bool {
    if let Some(pos) = elements.iter().position(|el| el.object_id == object_id) {
        elements.remove(pos);
        return true;
    }
    elements
        .iter_mut()
        .filter_map(|el| el.element_group.as_mut())
        .any(|group| remove_from(&mut group.children, object_id))
}

fn cell_mut(element: &mut PageElement, cell: CellLocation) -> Applied<&mut TextContent> {
    let Some(table) = element.table.as_mut() else {
        return Err(format!("object {} is not a table", element.object_id));
    };
    let (rows, columns) = (table.rows, table.columns);
    let (row, column) = (cell.row_index, cell.column_index);
    table
        .table_rows
        .get_mut(row as usize)
        .and_then(|cells| cells.table_cells.get_mut(column as usize))
        .map(|found| found.text.get_or_insert_with(TextContent::default))
        .ok_or_else(|| format!("cell ({row}, {column}) outside a {rows}x{columns} table"))
}

fn for_each_run(elements: &mut [PageElement], f: &mut dyn FnMut(&mut TextRun)) {
    for element in elements {
        let mut bodies: Vec<&mut TextContent> = Vec::new();
        let shape_text = element.shape.as_mut().and_then(|s| s.text.as_mut());
        bodies.extend(shape_text);
        if let Some(table) = element.table.as_mut() {
            for row in &mut table.table_rows {
                let cells = row.table_cells.iter_mut();
                bodies.extend(cells.filter_map(|cell| cell.text.as_mut()));
            }
        }
        for body in bodies {
            body.text_elements
                .iter_mut()
                .filter_map(|el| el.text_run.as_mut())
                .for_each(&mut *f);
        }
        if let Some(group) = element.element_group.as_mut() {
            for_each_run(&mut group.children, f);
        }
    }
}

fn replace_ignore_ascii_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let lower_hay = haystack.to_ascii_lowercase();
    let lower_needle = needle.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in lower_hay.match_indices(&lower_needle) {
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = start + needle.len();
    }
    out.push_str(&haystack[last..]);
    out
}

fn contains_object(pres: &Presentation, object_id: &str) -> bool {
    fn in_elements(elements: &[PageElement], object_id: &str) -> bool {
        elements.iter().any(|el| {
            el.object_id == object_id
                || el
                    .element_group
                    .as_ref()
                    .is_some_and(|group| in_elements(&group.children, object_id))
        })
    }
    pres.slides.iter().any(|slide| {
        slide.object_id == object_id
            || in_elements(&slide.page_elements, object_id)
            || slide.notes_page().is_some_and(|notes| {
                notes.object_id == object_id || in_elements(&notes.page_elements, object_id)
            })
    })
}

fn ensure_unused(pres: &Presentation, object_id: &str) -> Applied {
    if contains_object(pres, object_id) {
        return Err(format!("object id {} already exists", object_id));
    }
    Ok(())
}

fn unused_suffix(pres: &Presentation, object_id: &str) -> String {
    let mut n = 1;
    loop {
        let suffix = format!("_copy{}", n);
        if !contains_object(pres, &format!("{}{}", object_id, suffix)) {
            return suffix;
        }
        n += 1;
    }
}

fn rename_page(page: &mut Page, suffix: &str) {
    fn rename_elements(elements: &mut [PageElement], suffix: &str) {
        for el in elements {
            el.object_id.push_str(suffix);
            if let Some(group) = el.element_group.as_mut() {
                rename_elements(&mut group.children, suffix);
            }
        }
    }
    page.object_id.push_str(suffix);
    rename_elements(&mut page.page_elements, suffix);
    if let Some(notes) = page
        .slide_properties
        .as_mut()
        .and_then(|props| props.notes_page.as_mut())
    {
        notes.object_id.push_str(suffix);
        rename_elements(&mut notes.page_elements, suffix);
    }
}
