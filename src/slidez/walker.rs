//! Text traversal over a snapshot.
//!
//! Elements are visited depth-first, left to right. A shape with a text body
//! yields one block; a table yields one block holding its cells row by row;
//! a group contributes the blocks of its children. Runs keep their
//! boundaries: search tests each run on its own, so a match that spans two
//! runs is not reported.

use crate::model::{Page, PageElement, Presentation, TextContent};
use serde::Serialize;
use std::collections::BTreeMap;

/// Appended after every slide by [`extract_all_text`], including the last.
pub const SLIDE_DELIMITER: &str = "\n---\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    pub slide_index: usize,
    pub object_id: String,
    pub text: String,
}

/// The text bodies owned by one element, in reading order.
struct Block<'a> {
    object_id: &'a str,
    bodies: Vec<&'a TextContent>,
}

impl Block<'_> {
    fn flatten(&self) -> String {
        self.bodies
            .iter()
            .flat_map(|body| body.runs())
            .map(|run| run.content.as_str())
            .collect()
    }
}

fn collect_blocks<'a>(elements: &'a [PageElement], out: &mut Vec<Block<'a>>) {
    for element in elements {
        if let Some(body) = element.shape.as_ref().and_then(|s| s.text.as_ref()) {
            out.push(Block {
                object_id: &element.object_id,
                bodies: vec![body],
            });
        }
        if let Some(table) = &element.table {
            let bodies: Vec<&TextContent> = table
                .table_rows
                .iter()
                .flat_map(|row| row.table_cells.iter())
                .filter_map(|cell| cell.text.as_ref())
                .collect();
            if !bodies.is_empty() {
                out.push(Block {
                    object_id: &element.object_id,
                    bodies,
                });
            }
        }
        if let Some(group) = &element.element_group {
            collect_blocks(&group.children, out);
        }
    }
}

fn blocks(page: &Page) -> Vec<Block<'_>> {
    let mut out = Vec::new();
    collect_blocks(&page.page_elements, &mut out);
    out
}

/// Raw concatenation of every run on a page, with no separators.
pub fn page_text(page: &Page) -> String {
    blocks(page).iter().map(Block::flatten).collect()
}

/// Every slide's text, one line per text block, each slide followed by
/// [`SLIDE_DELIMITER`].
pub fn extract_all_text(snapshot: &Presentation) -> String {
    let mut text = String::new();
    for slide in &snapshot.slides {
        for block in blocks(slide) {
            text.push_str(&block.flatten());
            text.push('\n');
        }
        text.push_str(SLIDE_DELIMITER);
    }
    text
}

/// Case-insensitive search of each text run, in slide then element order.
pub fn search_text(snapshot: &Presentation, query: &str) -> Vec<TextMatch> {
    let needle = query.to_lowercase();
    let mut matches = Vec::new();
    for (slide_index, slide) in snapshot.slides.iter().enumerate() {
        for block in blocks(slide) {
            for run in block.bodies.iter().flat_map(|body| body.runs()) {
                if run.content.to_lowercase().contains(&needle) {
                    matches.push(TextMatch {
                        slide_index,
                        object_id: block.object_id.to_string(),
                        text: run.content.clone(),
                    });
                }
            }
        }
    }
    matches
}

/// Raw notes text of one slide; empty when the slide has no notes page.
pub fn slide_notes(slide: &Page) -> String {
    slide.notes_page().map(page_text).unwrap_or_default()
}

/// Notes keyed `slide_<index>`, each trimmed. Slides without a notes page or
/// whose notes hold no text at all are left out.
pub fn extract_all_notes(snapshot: &Presentation) -> BTreeMap<String, String> {
    snapshot
        .slides
        .iter()
        .enumerate()
        .filter_map(|(index, slide)| {
            let notes = slide.notes_page().map(page_text)?;
            if notes.is_empty() {
                return None;
            }
            Some((format!("slide_{}", index), notes.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageElement;

    fn single_run_deck(texts: &[&str]) -> Presentation {
        Presentation::new(
            "deck",
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    Page::new(
                        format!("s{}", i),
                        vec![PageElement::text_box(format!("box{}", i), &[t])],
                    )
                })
                .collect(),
        )
    }

    fn notes_slide(id: &str, runs: &[&str]) -> Page {
        let body = PageElement::text_box(format!("{}_body", id), runs);
        let notes = Page::new(format!("{}_notes", id), vec![body]);
        Page::new(id, vec![]).with_notes(notes)
    }

    #[test]
    fn extract_applies_delimiter_after_every_slide() {
        let pres = single_run_deck(&["Hello", "World"]);
        assert_eq!(extract_all_text(&pres), "Hello\n\n---\n\nWorld\n\n---\n\n");
    }

    #[test]
    fn extract_of_empty_slide_is_only_the_delimiter() {
        let slide = Page::new("s0", vec![PageElement::empty_shape("e", "RECTANGLE")]);
        let pres = Presentation::new("d", vec![slide]);
        assert_eq!(extract_all_text(&pres), SLIDE_DELIMITER);
    }

    #[test]
    fn extract_descends_into_groups_and_tables() {
        let one = PageElement::text_box("a", &["one"]);
        let two = PageElement::text_box("b", &["two"]);
        let group = PageElement::group("g", vec![one, two]);
        let table = PageElement::table("t", &[&["r0c0", "r0c1"], &["", "r1c1"]]);
        let pres = Presentation::new("d", vec![Page::new("s0", vec![group, table])]);
        assert_eq!(extract_all_text(&pres), "one\ntwo\nr0c0r0c1r1c1\n\n---\n\n");
    }

    #[test]
    fn search_matches_whole_run_case_insensitively() {
        let pres = single_run_deck(&["Hello", "World"]);
        assert_eq!(
            search_text(&pres, "wor"),
            vec![TextMatch {
                slide_index: 1,
                object_id: "box1".into(),
                text: "World".into(),
            }]
        );
    }

    #[test]
    fn search_does_not_span_runs() {
        let runs = PageElement::text_box("b", &["Hel", "lo wo", "rld"]);
        let slide = Page::new("s0", vec![runs]);
        let pres = Presentation::new("d", vec![slide]);
        assert_eq!(search_text(&pres, "lo wo").len(), 1);
        assert!(search_text(&pres, "hello").is_empty());
        assert!(search_text(&single_run_deck(&["World"]), "lo wo").is_empty());
    }

    #[test]
    fn search_reports_table_id_for_cell_match() {
        let slide = Page::new("s0", vec![PageElement::table("tbl", &[&["x", "Total"]])]);
        let pres = Presentation::new("d", vec![slide]);
        let found = search_text(&pres, "total");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].object_id, "tbl");
    }

    #[test]
    fn match_serializes_with_snake_case_keys() {
        let m = TextMatch {
            slide_index: 0,
            object_id: "o".into(),
            text: "t".into(),
        };
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"slide_index":0,"object_id":"o","text":"t"}"#
        );
    }

    #[test]
    fn notes_are_trimmed_and_missing_pages_skipped() {
        let with_notes = notes_slide("s0", &["  remember this  "]);
        let empty_body = PageElement::empty_shape("s2_body", "TEXT_BOX");
        let notes_page = Page::new("n2", vec![empty_body]);
        let empty_notes = Page::new("s2", vec![]).with_notes(notes_page);
        let slides = vec![with_notes, Page::new("s1", vec![]), empty_notes];
        let pres = Presentation::new("d", slides);

        let notes = extract_all_notes(&pres);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes["slide_0"], "remember this");
    }

    #[test]
    fn whitespace_only_notes_keep_their_slide() {
        let slides = vec![notes_slide("s0", &["\n"]), notes_slide("s1", &["  "])];
        let pres = Presentation::new("d", slides);

        let notes = extract_all_notes(&pres);
        assert_eq!(notes.get("slide_0").map(String::as_str), Some(""));
        assert_eq!(notes.get("slide_1").map(String::as_str), Some(""));
    }

    #[test]
    fn slide_notes_are_raw() {
        let slide = notes_slide("s0", &[" a", "b\n"]);
        assert_eq!(slide_notes(&slide), " ab\n");
        assert_eq!(slide_notes(&Page::new("s1", vec![])), "");
    }
}
