use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::request::{Batch, Request};
use crate::resolve::{resolve_position, resolve_slide};
use crate::service::DocumentService;
use crate::walker::{extract_all_notes, slide_notes};

#[derive(Debug, Clone)]
pub struct AddNotes {
    pub slide_index: i64,
    pub text: String,
}

/// Raw notes text of one slide, empty if it has no notes page.
pub fn get<D: DocumentService>(
    docs: &D,
    presentation_id: &str,
    slide_index: i64,
) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, slide_index).map_err(|e| e.during("getting notes"))?;
    Ok(CmdResult::default().with_text(slide_notes(slide)))
}

/// Inserts text at the start of the slide's speaker-notes placeholder, which
/// is the first shape on its notes page.
pub fn add<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: AddNotes,
) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let resolved = resolve_position(&snapshot, opts.slide_index);
    let (ordinal, slide) = resolved.map_err(|e| e.during("adding notes"))?;

    let notes_page = slide
        .notes_page()
        .filter(|page| !page.page_elements.is_empty())
        .ok_or_else(|| SlidezError::NotesUnavailable(ordinal).during("adding notes"))?;
    let body = notes_page
        .page_elements
        .iter()
        .find(|el| el.is_text_container())
        .ok_or_else(|| SlidezError::NotesShapeNotFound(ordinal).during("adding notes"))?;

    let batch = Batch::single(Request::insert_text(&body.object_id, None, &opts.text));
    submit(docs, presentation_id, batch, "adding notes")?;

    let message = format!("Notes added to slide {}", ordinal);
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}

pub fn extract_all<D: DocumentService>(docs: &D, presentation_id: &str) -> Result<CmdResult> {
    let snapshot = fetch(docs, presentation_id)?;
    let notes = extract_all_notes(&snapshot);
    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::warning("No speaker notes found"));
    }
    Ok(result.with_notes(notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{deck, DECK};
    use crate::model::{Page, PageElement, Presentation};
    use crate::service::memory::InMemoryDocuments;

    fn add_to(docs: &mut InMemoryDocuments, slide_index: i64, text: &str) -> Result<CmdResult> {
        add(
            docs,
            DECK,
            AddNotes {
                slide_index,
                text: text.into(),
            },
        )
    }

    fn single_slide_with_notes(notes: Page) -> InMemoryDocuments {
        let slide = Page::new("s0", vec![]).with_notes(notes);
        InMemoryDocuments::new().with_presentation(Presentation::new(DECK, vec![slide]))
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut docs = deck(2);
        add_to(&mut docs, 1, "speak slowly").unwrap();
        let text = get(&docs, DECK, 1).unwrap().text.unwrap();
        assert_eq!(text, "speak slowly");
        assert_eq!(get(&docs, DECK, 0).unwrap().text.unwrap(), "");
    }

    #[test]
    fn get_without_notes_page_is_empty() {
        let pres = Presentation::new(DECK, vec![Page::new("s0", vec![])]);
        let docs = InMemoryDocuments::new().with_presentation(pres);
        assert_eq!(get(&docs, DECK, 0).unwrap().text.unwrap(), "");
    }

    #[test]
    fn add_needs_a_notes_page_with_elements() {
        let slides = vec![
            Page::new("s0", vec![]),
            Page::new("s1", vec![]).with_notes(Page::new("n1", vec![])),
        ];
        let mut docs = InMemoryDocuments::new().with_presentation(Presentation::new(DECK, slides));
        for index in [0, 1] {
            let err = add_to(&mut docs, index, "x").unwrap_err();
            let expected = index as usize;
            assert!(matches!(err.root(), SlidezError::NotesUnavailable(i) if *i == expected));
        }
    }

    #[test]
    fn add_reports_the_slide_it_wrote_to() {
        let mut docs = deck(3);
        let result = add_to(&mut docs, 2, "wrap up").unwrap();
        assert_eq!(result.messages[0].content, "Notes added to slide 2");
    }

    #[test]
    fn add_rejects_negative_index_without_writing() {
        let mut docs = deck(2);
        let err = add_to(&mut docs, -1, "x").unwrap_err();
        assert!(matches!(
            err.root(),
            SlidezError::OutOfRange { index: -1, len: 2 }
        ));
        assert!(docs.applied_batches().is_empty());
    }

    #[test]
    fn add_needs_a_shape_on_the_notes_page() {
        let notes = Page::new("n0", vec![PageElement::table("t", &[&["a"]])]);
        let mut docs = single_slide_with_notes(notes);
        let err = add_to(&mut docs, 0, "x").unwrap_err();
        assert!(matches!(err.root(), SlidezError::NotesShapeNotFound(0)));
        assert!(docs.applied_batches().is_empty());
    }

    #[test]
    fn add_prepends_to_existing_notes() {
        let notes = Page::new("n0", vec![PageElement::text_box("body", &["world"])]);
        let mut docs = single_slide_with_notes(notes);
        add_to(&mut docs, 0, "hello ").unwrap();
        assert_eq!(get(&docs, DECK, 0).unwrap().text.unwrap(), "hello world");
    }

    #[test]
    fn extract_all_skips_slides_without_notes() {
        let mut docs = deck(3);
        add_to(&mut docs, 2, "  closing remarks \n").unwrap();
        let result = extract_all(&docs, DECK).unwrap();
        let notes = result.notes.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes["slide_2"], "closing remarks");
    }

    #[test]
    fn extract_all_warns_when_empty() {
        let docs = deck(2);
        let result = extract_all(&docs, DECK).unwrap();
        assert!(result.notes.unwrap().is_empty());
        assert_eq!(result.messages[0].content, "No speaker notes found");
    }
}
