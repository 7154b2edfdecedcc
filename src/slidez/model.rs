//! Snapshot types for a presentation as returned by the document service.
//!
//! A [`Presentation`] is an immutable point-in-time copy of the remote tree:
//! slides hold page elements, page elements hold text (shapes), cell grids
//! (tables) or nested elements (groups). Every slide may own a notes page,
//! which is structurally a slide of its own.
//!
//! Field names follow the remote wire format (camelCase). Anything the tool
//! does not look at is ignored on deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub presentation_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Page>,
}

/// A slide or a notes page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_properties: Option<SlideProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_page: Option<Box<Page>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_group: Option<Group>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

/// One entry of a text body. Paragraph markers and auto text carry no
/// `text_run` and are skipped by every text operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub children: Vec<PageElement>,
}

impl Presentation {
    pub fn new(presentation_id: impl Into<String>, slides: Vec<Page>) -> Self {
        Self {
            presentation_id: presentation_id.into(),
            title: String::new(),
            slides,
        }
    }
}

impl Page {
    pub fn new(object_id: impl Into<String>, page_elements: Vec<PageElement>) -> Self {
        Self {
            object_id: object_id.into(),
            page_elements,
            slide_properties: None,
        }
    }

    pub fn with_notes(mut self, notes: Page) -> Self {
        self.slide_properties = Some(SlideProperties {
            notes_page: Some(Box::new(notes)),
        });
        self
    }

    pub fn notes_page(&self) -> Option<&Page> {
        self.slide_properties
            .as_ref()
            .and_then(|props| props.notes_page.as_deref())
    }
}

impl PageElement {
    /// A shape whose text body holds one run per entry of `runs`.
    pub fn text_box(object_id: impl Into<String>, runs: &[&str]) -> Self {
        Self {
            object_id: object_id.into(),
            shape: Some(Shape {
                shape_type: Some("TEXT_BOX".to_string()),
                text: Some(TextContent::from_runs(runs)),
            }),
            ..Default::default()
        }
    }

    /// A shape with no text body at all.
    pub fn empty_shape(object_id: impl Into<String>, shape_type: &str) -> Self {
        Self {
            object_id: object_id.into(),
            shape: Some(Shape {
                shape_type: Some(shape_type.to_string()),
                text: None,
            }),
            ..Default::default()
        }
    }

    /// A table whose cells are given row by row.
    pub fn table(object_id: impl Into<String>, cells: &[&[&str]]) -> Self {
        let table_rows: Vec<TableRow> = cells
            .iter()
            .map(|row| TableRow {
                table_cells: row
                    .iter()
                    .map(|content| TableCell {
                        text: (!content.is_empty()).then(|| TextContent::from_runs(&[*content])),
                    })
                    .collect(),
            })
            .collect();
        Self {
            object_id: object_id.into(),
            table: Some(Table {
                rows: table_rows.len() as u32,
                columns: cells.first().map(|row| row.len()).unwrap_or(0) as u32,
                table_rows,
            }),
            ..Default::default()
        }
    }

    pub fn group(object_id: impl Into<String>, children: Vec<PageElement>) -> Self {
        Self {
            object_id: object_id.into(),
            element_group: Some(Group { children }),
            ..Default::default()
        }
    }

    /// Whether the element can hold speaker-notes text. Shapes qualify even
    /// while their body is still empty.
    pub fn is_text_container(&self) -> bool {
        self.shape.is_some()
    }
}

impl TextContent {
    pub fn from_runs(runs: &[&str]) -> Self {
        Self {
            text_elements: runs
                .iter()
                .map(|content| TextElement {
                    text_run: Some(TextRun {
                        content: content.to_string(),
                        style: None,
                    }),
                })
                .collect(),
        }
    }

    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.text_elements
            .iter()
            .filter_map(|el| el.text_run.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_remote_shape_and_ignores_unknown_fields() {
        let json = r#"{
            "presentationId": "pres-1",
            "title": "Deck",
            "revisionId": "abc",
            "slides": [{
                "objectId": "g1",
                "pageElements": [{
                    "objectId": "g1_title",
                    "size": {"width": {"magnitude": 3000000, "unit": "EMU"}},
                    "shape": {
                        "shapeType": "TEXT_BOX",
                        "text": {"textElements": [
                            {"endIndex": 6, "paragraphMarker": {"style": {}}},
                            {"endIndex": 6, "textRun": {"content": "Hello\n", "style": {"bold": true}}}
                        ]}
                    }
                }],
                "slideProperties": {
                    "layoutObjectId": "p1",
                    "notesPage": {"objectId": "g1_notes", "pageElements": []}
                }
            }]
        }"#;

        let pres: Presentation = serde_json::from_str(json).unwrap();
        assert_eq!(pres.slides.len(), 1);
        let slide = &pres.slides[0];
        assert_eq!(slide.notes_page().unwrap().object_id, "g1_notes");

        let shape = slide.page_elements[0].shape.as_ref().unwrap();
        let text = shape.text.as_ref().unwrap();
        let runs: Vec<&str> = text.runs().map(|r| r.content.as_str()).collect();
        assert_eq!(runs, vec!["Hello\n"]);
        assert_eq!(
            text.runs().next().unwrap().style.as_ref().unwrap()["bold"],
            serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let pres: Presentation = serde_json::from_str(r#"{"presentationId": "p"}"#).unwrap();
        assert!(pres.slides.is_empty());
        assert!(pres.title.is_empty());
    }

    #[test]
    fn table_builder_fills_dimensions() {
        let el = PageElement::table("t", &[&["a", "b"], &["", "d"]]);
        let table = el.table.unwrap();
        assert_eq!((table.rows, table.columns), (2, 2));
        assert!(table.table_rows[1].table_cells[0].text.is_none());
    }
}
