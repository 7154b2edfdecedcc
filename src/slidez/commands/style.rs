use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::model::{PageElement, Presentation};
use crate::request::{Batch, Request};
use crate::service::DocumentService;

#[derive(Debug, Clone)]
pub struct CopyTextStyle {
    pub source_id: String,
    pub target_id: String,
}

/// Applies the style of the source's first styled run to all text of the target.
pub fn copy_text_style<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: CopyTextStyle,
) -> Result<CmdResult> {
    const DURING: &str = "copying text style";
    let snapshot = fetch(docs, presentation_id)?;

    let missing = |id: &str| SlidezError::NotFound(format!("element {}", id)).during(DURING);
    let source = find_element(&snapshot, &opts.source_id).ok_or_else(|| missing(&opts.source_id))?;
    if find_element(&snapshot, &opts.target_id).is_none() {
        return Err(missing(&opts.target_id));
    }
    let style = first_style(source).ok_or_else(|| {
        let message = format!("element {} has no styled text", opts.source_id);
        SlidezError::MalformedInput(message).during(DURING)
    })?;

    let batch = Batch::single(Request::text_style_all(&opts.target_id, style));
    submit(docs, presentation_id, batch, DURING)?;

    Ok(CmdResult::default().with_message(CmdMessage::success("Text style copied")))
}

fn find_element<'a>(snapshot: &'a Presentation, object_id: &str) -> Option<&'a PageElement> {
    fn search<'a>(elements: &'a [PageElement], object_id: &str) -> Option<&'a PageElement> {
        elements.iter().find_map(|el| {
            if el.object_id == object_id {
                return Some(el);
            }
            el.element_group
                .as_ref()
                .and_then(|group| search(&group.children, object_id))
        })
    }
    snapshot
        .slides
        .iter()
        .find_map(|slide| search(&slide.page_elements, object_id))
}

fn first_style(element: &PageElement) -> Option<serde_json::Map<String, serde_json::Value>> {
    element
        .shape
        .as_ref()?
        .text
        .as_ref()?
        .runs()
        .filter_map(|run| run.style.as_ref())
        .find(|style| !style.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, TextContent};
    use crate::service::memory::InMemoryDocuments;
    use serde_json::json;

    const DECK: &str = "deck";

    fn styled_deck() -> InMemoryDocuments {
        let mut source = PageElement::text_box("title", &["", "Big"]);
        let mut style = serde_json::Map::new();
        style.insert("bold".into(), json!(true));
        style.insert("fontSize".into(), json!({"magnitude": 32, "unit": "PT"}));
        if let Some(text) = source.shape.as_mut().and_then(|s| s.text.as_mut()) {
            text.text_elements[0].text_run.as_mut().unwrap().style = Some(serde_json::Map::new());
            text.text_elements[1].text_run.as_mut().unwrap().style = Some(style);
        }
        let plain = PageElement::text_box("body", &["small words"]);
        let group = PageElement::group("g", vec![plain]);
        let slide = Page::new("s0", vec![source, group]);
        InMemoryDocuments::new().with_presentation(Presentation::new(DECK, vec![slide]))
    }

    fn opts(source: &str, target: &str) -> CopyTextStyle {
        CopyTextStyle {
            source_id: source.into(),
            target_id: target.into(),
        }
    }

    #[test]
    fn copies_first_non_empty_style_to_whole_target() {
        let mut docs = styled_deck();
        let request = opts("title", "body");
        copy_text_style(&mut docs, DECK, request).unwrap();

        let (_, batch) = &docs.applied_batches()[0];
        match &batch.requests()[0] {
            Request::UpdateTextStyle(req) => {
                assert_eq!(req.object_id, "body");
                assert_eq!(req.fields, "bold,fontSize");
                assert_eq!(req.style["bold"], json!(true));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn missing_elements_are_not_found() {
        let mut docs = styled_deck();
        for (source, target) in [("nope", "body"), ("title", "nope")] {
            let request = opts(source, target);
            let err = copy_text_style(&mut docs, DECK, request).unwrap_err();
            assert!(matches!(err.root(), SlidezError::NotFound(m) if m.contains("nope")));
        }
    }

    #[test]
    fn unstyled_source_is_malformed() {
        let mut docs = styled_deck();
        let request = opts("body", "title");
        let err = copy_text_style(&mut docs, DECK, request).unwrap_err();
        assert!(matches!(err.root(), SlidezError::MalformedInput(_)));
        assert!(docs.applied_batches().is_empty());
    }

    #[test]
    fn empty_body_has_no_style() {
        let mut el = PageElement::empty_shape("x", "RECTANGLE");
        assert!(first_style(&el).is_none());
        el.shape.as_mut().unwrap().text = Some(TextContent::default());
        assert!(first_style(&el).is_none());
    }
}
