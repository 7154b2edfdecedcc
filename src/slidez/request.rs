//! Primitive edit operations and the batch that carries them.
//!
//! Each [`Request`] variant serializes to the remote wire shape, externally
//! tagged and camelCased: `{"createSlide": {"objectId": "slide_…"}}`.
//! A [`Batch`] is never empty; the service applies it all-or-nothing, in order.

use crate::error::{Result, SlidezError};
use serde::{Deserialize, Serialize};

/// Default geometry for new tables, in points.
pub const TABLE_SIZE: (f64, f64) = (400.0, 200.0);
pub const TABLE_OFFSET: (f64, f64) = (50.0, 50.0);
/// Default geometry for new shapes, in points.
pub const SHAPE_SIZE: (f64, f64) = (100.0, 100.0);
pub const SHAPE_OFFSET: (f64, f64) = (100.0, 100.0);

const CELL_BACKGROUND_FIELDS: &str = "tableCellBackgroundFill.solidFill.color";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlide),
    DuplicateObject(ObjectRef),
    DeleteObject(ObjectRef),
    UpdateSlidesPosition(UpdateSlidesPosition),
    CreateTable(CreateTable),
    InsertText(InsertText),
    ReplaceAllText(ReplaceAllText),
    UpdateTableCellProperties(UpdateTableCellProperties),
    CreateShape(CreateShape),
    UpdateTextStyle(UpdateTextStyle),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlide {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<usize>,
    pub slide_layout_reference: LayoutReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlidesPosition {
    pub slide_object_ids: Vec<String>,
    pub insertion_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    pub object_id: String,
    pub element_properties: ElementProperties,
    pub rows: u32,
    pub columns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text: String,
    pub insertion_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllText {
    pub contains_text: SubstringMatch,
    pub replace_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstringMatch {
    pub text: String,
    pub match_case: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableCellProperties {
    pub object_id: String,
    pub table_range: TableRange,
    pub table_cell_properties: TableCellProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    pub location: CellLocation,
    pub row_span: u32,
    pub column_span: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellLocation {
    pub row_index: u32,
    pub column_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellProperties {
    pub table_cell_background_fill: BackgroundFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundFill {
    pub solid_fill: SolidFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    pub color: OpaqueColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShape {
    pub object_id: String,
    pub shape_type: String,
    pub element_properties: ElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub object_id: String,
    pub style: serde_json::Map<String, serde_json::Value>,
    pub text_range: TextRange,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRange {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    pub page_object_id: String,
    pub size: Size,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: String,
}

impl ElementProperties {
    /// Places an element of `size` at `offset` on the given page, unscaled, in points.
    pub fn on_page(page_object_id: &str, size: (f64, f64), offset: (f64, f64)) -> Self {
        let pt = |magnitude| Dimension {
            magnitude,
            unit: "PT".to_string(),
        };
        Self {
            page_object_id: page_object_id.to_string(),
            size: Size {
                width: pt(size.0),
                height: pt(size.1),
            },
            transform: Transform {
                scale_x: 1.0,
                scale_y: 1.0,
                translate_x: offset.0,
                translate_y: offset.1,
                unit: "PT".to_string(),
            },
        }
    }
}

impl RgbColor {
    /// Parses `#RRGGBB` or `RRGGBB` into channel fractions in `[0, 1]`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SlidezError::MalformedInput(format!(
                "color must be #RRGGBB, got '{}'",
                input
            )));
        }
        let channel = |range: std::ops::Range<usize>| -> Result<f64> {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| SlidezError::MalformedInput(format!("bad color '{}'", input)))
        };
        Ok(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }
}

impl Request {
    pub fn create_slide(object_id: String, layout: &str, insertion_index: Option<usize>) -> Self {
        Request::CreateSlide(CreateSlide {
            object_id,
            insertion_index,
            slide_layout_reference: LayoutReference {
                predefined_layout: layout.to_string(),
            },
        })
    }

    pub fn duplicate_object(object_id: &str) -> Self {
        Request::DuplicateObject(ObjectRef {
            object_id: object_id.to_string(),
        })
    }

    pub fn delete_object(object_id: &str) -> Self {
        Request::DeleteObject(ObjectRef {
            object_id: object_id.to_string(),
        })
    }

    pub fn move_slide(object_id: &str, insertion_index: usize) -> Self {
        Request::UpdateSlidesPosition(UpdateSlidesPosition {
            slide_object_ids: vec![object_id.to_string()],
            insertion_index,
        })
    }

    pub fn create_table(object_id: String, page_object_id: &str, rows: u32, columns: u32) -> Self {
        let properties = ElementProperties::on_page(page_object_id, TABLE_SIZE, TABLE_OFFSET);
        Request::CreateTable(CreateTable {
            object_id,
            element_properties: properties,
            rows,
            columns,
        })
    }

    /// Inserts `text` at the start of a shape, or of one cell when `cell` is set.
    pub fn insert_text(object_id: &str, cell: Option<CellLocation>, text: &str) -> Self {
        Request::InsertText(InsertText {
            object_id: object_id.to_string(),
            cell_location: cell,
            text: text.to_string(),
            insertion_index: 0,
        })
    }

    pub fn replace_all_text(find: &str, replace: &str) -> Self {
        Request::ReplaceAllText(ReplaceAllText {
            contains_text: SubstringMatch {
                text: find.to_string(),
                match_case: false,
            },
            replace_text: replace.to_string(),
        })
    }

    pub fn cell_background(table_id: &str, cell: CellLocation, color: RgbColor) -> Self {
        Request::UpdateTableCellProperties(UpdateTableCellProperties {
            object_id: table_id.to_string(),
            table_range: TableRange {
                location: cell,
                row_span: 1,
                column_span: 1,
            },
            table_cell_properties: TableCellProperties {
                table_cell_background_fill: BackgroundFill {
                    solid_fill: SolidFill {
                        color: OpaqueColor { rgb_color: color },
                    },
                },
            },
            fields: CELL_BACKGROUND_FIELDS.to_string(),
        })
    }

    pub fn create_shape(object_id: String, page_object_id: &str, shape_type: &str) -> Self {
        let properties = ElementProperties::on_page(page_object_id, SHAPE_SIZE, SHAPE_OFFSET);
        Request::CreateShape(CreateShape {
            object_id,
            shape_type: shape_type.to_string(),
            element_properties: properties,
        })
    }

    /// Applies every field of `style` to the whole text of `object_id`.
    pub fn text_style_all(
        object_id: &str,
        style: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let fields = style.keys().cloned().collect::<Vec<_>>().join(",");
        Request::UpdateTextStyle(UpdateTextStyle {
            object_id: object_id.to_string(),
            style,
            text_range: TextRange {
                kind: "ALL".to_string(),
            },
            fields,
        })
    }
}

/// An ordered, non-empty list of requests submitted as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    requests: Vec<Request>,
}

impl Batch {
    pub fn single(request: Request) -> Self {
        Self {
            requests: vec![request],
        }
    }

    pub fn from_requests(requests: Vec<Request>) -> Result<Self> {
        if requests.is_empty() {
            return Err(SlidezError::MalformedInput(
                "a batch needs at least one request".to_string(),
            ));
        }
        Ok(Self { requests })
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_slide_wire_shape() {
        let req = Request::create_slide("slide_1".into(), "BLANK", None);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"createSlide": {
                "objectId": "slide_1",
                "slideLayoutReference": {"predefinedLayout": "BLANK"}
            }})
        );
    }

    #[test]
    fn cell_background_wire_shape() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        let cell = CellLocation {
            row_index: 1,
            column_index: 2,
        };
        let req = Request::cell_background("tbl", cell, color);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"updateTableCellProperties": {
                "objectId": "tbl",
                "tableRange": {
                    "location": {"rowIndex": 1, "columnIndex": 2},
                    "rowSpan": 1,
                    "columnSpan": 1
                },
                "tableCellProperties": {
                    "tableCellBackgroundFill": {"solidFill": {"color": {"rgbColor": {
                        "red": 1.0, "green": 0.0, "blue": 0.0
                    }}}}
                },
                "fields": "tableCellBackgroundFill.solidFill.color"
            }})
        );
    }

    #[test]
    fn replace_is_case_insensitive() {
        let req = Request::replace_all_text("foo", "bar");
        let value = serde_json::to_value(req).unwrap();
        let contains = &value["replaceAllText"]["containsText"];
        assert_eq!(contains["matchCase"], json!(false));
    }

    #[test]
    fn table_uses_default_geometry() {
        let req = Request::create_table("t".into(), "p", 2, 3);
        let value = serde_json::to_value(req).unwrap();
        let props = &value["createTable"]["elementProperties"];
        let width = json!({"magnitude": 400.0, "unit": "PT"});
        assert_eq!(props["pageObjectId"], json!("p"));
        assert_eq!(props["size"]["width"], width);
        assert_eq!(props["transform"]["translateX"], json!(50.0));
        assert_eq!(value["createTable"]["rows"], json!(2));
    }

    #[test]
    fn text_style_lists_every_field() {
        let mut style = serde_json::Map::new();
        style.insert("bold".into(), json!(true));
        style.insert("fontFamily".into(), json!("Arial"));
        let req = Request::text_style_all("box", style);
        let value = serde_json::to_value(req).unwrap();
        let update = &value["updateTextStyle"];
        assert_eq!(update["fields"], json!("bold,fontFamily"));
        assert_eq!(update["textRange"], json!({"type": "ALL"}));
    }

    #[test]
    fn hex_colors() {
        let c = RgbColor::from_hex("00ff80").unwrap();
        assert_eq!(c.red, 0.0);
        assert_eq!(c.green, 1.0);
        assert!((c.blue - 128.0 / 255.0).abs() < f64::EPSILON);

        for bad in ["", "#FFF", "#GG0000", "red", "#1234567"] {
            let parsed = RgbColor::from_hex(bad);
            assert!(
                matches!(parsed, Err(SlidezError::MalformedInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(Batch::from_requests(vec![]).is_err());
        let batch = Batch::single(Request::delete_object("x"));
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({"requests": [{"deleteObject": {"objectId": "x"}}]})
        );
    }
}
