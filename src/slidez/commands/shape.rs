use super::{fetch, submit, CmdMessage, CmdResult};
use crate::error::{Result, SlidezError};
use crate::ids::new_id;
use crate::request::{Batch, Request};
use crate::resolve::resolve_slide;
use crate::service::DocumentService;

#[derive(Debug, Clone)]
pub struct AddShape {
    pub slide_index: i64,
    /// Shape category such as `RECTANGLE`, `ELLIPSE` or `TEXT_BOX`.
    pub shape_type: String,
}

pub fn add<D: DocumentService>(
    docs: &mut D,
    presentation_id: &str,
    opts: AddShape,
) -> Result<CmdResult> {
    let shape_type = opts.shape_type.trim().to_ascii_uppercase();
    if shape_type.is_empty() {
        let err = SlidezError::MalformedInput("shape type must not be empty".to_string());
        return Err(err.during("adding shape"));
    }
    let snapshot = fetch(docs, presentation_id)?;
    let slide = resolve_slide(&snapshot, opts.slide_index).map_err(|e| e.during("adding shape"))?;

    let shape_id = new_id("shape");
    let request = Request::create_shape(shape_id.clone(), &slide.object_id, &shape_type);
    let batch = Batch::single(request);
    submit(docs, presentation_id, batch, "adding shape")?;

    let message = format!("Shape added: {}", shape_type);
    Ok(CmdResult::default()
        .with_created_id(shape_id)
        .with_message(CmdMessage::success(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{deck, DECK};

    #[test]
    fn adds_shape_to_resolved_slide() {
        let mut docs = deck(2);
        let result = add(
            &mut docs,
            DECK,
            AddShape {
                slide_index: 1,
                shape_type: "ellipse".into(),
            },
        )
        .unwrap();

        let id = result.created_id.unwrap();
        let slide = &docs.presentation(DECK).unwrap().slides[1];
        let shape = slide
            .page_elements
            .iter()
            .find(|el| el.object_id == id)
            .and_then(|el| el.shape.as_ref())
            .unwrap();
        assert_eq!(shape.shape_type.as_deref(), Some("ELLIPSE"));
        assert_eq!(result.messages[0].content, "Shape added: ELLIPSE");
    }

    #[test]
    fn out_of_range_slide_fails() {
        let mut docs = deck(1);
        let err = add(
            &mut docs,
            DECK,
            AddShape {
                slide_index: 1,
                shape_type: "RECTANGLE".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err.root(), SlidezError::OutOfRange { .. }));
    }
}
