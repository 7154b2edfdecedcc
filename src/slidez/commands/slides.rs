use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::ids::new_id;
use crate::request::{Batch, Request};
use crate::resolve::{parse_ordinals, resolve_reorder, resolve_slide};
use crate::service::DocumentService;

#[derive(Debug, Clone)]
pub struct AddSlide {
    /// Predefined layout name, e.g. `BLANK` or `TITLE_AND_BODY`.
    pub layout: String,
    /// Insertion index; `None` appends.
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct MoveSlide {
    pub slide_index: i64,
    pub position: i64,
}

pub fn add<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: AddSlide,
) -> Result<CmdResult> {
    let slide_id = new_id("slide");
    let request = Request::create_slide(slide_id.clone(), &opts.layout, opts.position);
    let batch = Batch::single(request);
    submit(docs, presentation_id, batch, "adding slide")?;

    let message = format!("Slide added with layout {}", opts.layout);
    Ok(CmdResult::default()
        .with_created_id(slide_id)
        .with_message(CmdMessage::success(message)))
}

pub fn duplicate<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    slide_index: i64,
) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, slide_index).map_err(|e| e.during("duplicating slide"))?;
    let batch = Batch::single(Request::duplicate_object(&slide.object_id));
    submit(docs, presentation_id, batch, "duplicating slide")?;

    Ok(CmdResult::default().with_message(CmdMessage::success("Slide duplicated")))
}

pub fn remove<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    slide_index: i64,
) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, slide_index).map_err(|e| e.during("removing slide"))?;
    let batch = Batch::single(Request::delete_object(&slide.object_id));
    submit(docs, presentation_id, batch, "removing slide")?;

    Ok(CmdResult::default().with_message(CmdMessage::success("Slide removed")))
}

pub fn move_to<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: MoveSlide,
) -> Result<CmdResult> {
    let position = usize::try_from(opts.position).map_err(|_| {
        let message = format!("position must not be negative, got {}", opts.position);
        SlidezError::MalformedInput(message).during("moving slide")
    })?;
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, opts.slide_index).map_err(|e| e.during("moving slide"))?;
    let batch = Batch::single(Request::move_slide(&slide.object_id, position));
    submit(docs, presentation_id, batch, "moving slide")?;

    let message = format!("Slide moved to position {}", position);
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}

/// Moves the listed slides so that the i-th listed slide ends up at position i.
pub fn reorder<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    order: &str,
) -> Result<CmdResult> {
    let during = "reordering slides";
    let ordinals = parse_ordinals(order).map_err(|e| e.during(during))?;
    let snapshot = fetch(docs, presentation_id)?;
    let resolved = resolve_reorder(&snapshot, &ordinals).map_err(|e| e.during(during))?;

    let requests = resolved
        .iter()
        .map(|(position, slide_id)| Request::move_slide(slide_id, *position))
        .collect();
    let batch = Batch::from_requests(requests)?;
    submit(docs, presentation_id, batch, during)?;

    Ok(CmdResult::default().with_message(CmdMessage::success("Slides reordered")))
}
