//! End-to-end flows through `SlidesApi` backed by the in-memory services.

use slidez::api::{
    AddNotes, AddSlide, CreatePresentation, CreateTable, MoveSlide, ReplaceText, SlidesApi,
    UpdateCell,
};
use slidez::error::SlidezError;
use slidez::model::{Page, PageElement, Presentation};
use slidez::request::Request;
use slidez::service::memory::{InMemoryDocuments, InMemoryFiles};
use tempfile::TempDir;

type TestApi = SlidesApi<InMemoryDocuments, InMemoryFiles>;

fn api_with(deck: Presentation) -> (TestApi, TempDir) {
    let dir = TempDir::new().unwrap();
    let api = SlidesApi::new(
        InMemoryDocuments::new().with_presentation(deck),
        InMemoryFiles::new(),
        dir.path().to_path_buf(),
    );
    (api, dir)
}

fn numbered_deck(n: usize) -> Presentation {
    let slides = (0..n)
        .map(|i| {
            let text_box = PageElement::text_box(format!("t{}", i), &["x"]);
            Page::new(format!("s{}", i), vec![text_box])
        })
        .collect();
    Presentation::new("deck", slides)
}

fn order(api: &TestApi) -> Vec<String> {
    api.documents()
        .presentation("deck")
        .unwrap()
        .slides
        .iter()
        .map(|s| s.object_id.clone())
        .collect()
}

#[test]
fn out_of_range_slide_is_rejected_without_submitting() {
    let (mut api, _dir) = api_with(numbered_deck(3));
    for index in [3, -1, 99] {
        let err = api.remove_slide("deck", index).unwrap_err();
        assert!(matches!(err.root(), SlidezError::OutOfRange { len: 3, .. }));
    }
    assert!(api.documents().applied_batches().is_empty());
    assert_eq!(order(&api), ["s0", "s1", "s2"]);
}

#[test]
fn reorder_moves_listed_slides_to_the_front() {
    let (mut api, _dir) = api_with(numbered_deck(4));
    api.reorder_slides("deck", "2,0,1").unwrap();
    assert_eq!(order(&api), ["s2", "s0", "s1", "s3"]);

    let (_, batch) = &api.documents().applied_batches()[0];
    assert_eq!(batch.len(), 3);
    assert!(batch
        .requests()
        .iter()
        .all(|r| matches!(r, Request::UpdateSlidesPosition(_))));
}

#[test]
fn rejected_reorder_changes_nothing() {
    let (mut api, _dir) = api_with(numbered_deck(4));
    api.documents_mut()
        .reject_next_batch("Invalid requests[1]: backend unavailable");
    let err = api.reorder_slides("deck", "3,2").unwrap_err();
    assert!(matches!(err.root(), SlidezError::Rejected(_)));
    assert_eq!(order(&api), ["s0", "s1", "s2", "s3"]);
    assert!(api.documents().applied_batches().is_empty());
}

#[test]
fn move_slide_then_extract_reflects_new_order() {
    let deck = Presentation::new(
        "deck",
        vec![
            Page::new("s0", vec![PageElement::text_box("a", &["Hello"])]),
            Page::new("s1", vec![PageElement::text_box("b", &["World"])]),
        ],
    );
    let (mut api, _dir) = api_with(deck);
    assert_eq!(
        api.extract_all_text("deck").unwrap().text.unwrap(),
        "Hello\n\n---\n\nWorld\n\n---\n\n"
    );

    api.move_slide(
        "deck",
        MoveSlide {
            slide_index: 1,
            position: 0,
        },
    )
    .unwrap();
    assert_eq!(
        api.extract_all_text("deck").unwrap().text.unwrap(),
        "World\n\n---\n\nHello\n\n---\n\n"
    );
}

#[test]
fn search_matches_within_single_runs_only() {
    let deck = Presentation::new(
        "deck",
        vec![
            Page::new("s0", vec![PageElement::text_box("a", &["Hello"])]),
            Page::new("s1", vec![PageElement::text_box("b", &["World"])]),
        ],
    );
    let (api, _dir) = api_with(deck);

    let found = api.search_text("deck", "wor").unwrap().matches.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slide_index, 1);
    assert_eq!(found[0].object_id, "b");
    assert_eq!(found[0].text, "World");

    let none = api.search_text("deck", "lo wo").unwrap();
    assert!(none.matches.unwrap().is_empty());
    assert_eq!(none.messages.len(), 1);
}

#[test]
fn notes_are_collected_by_slide() {
    let written = PageElement::text_box("n0_body", &["  remember this\n"]);
    let blank = PageElement::empty_shape("n1_body", "TEXT_BOX");
    let deck = Presentation::new(
        "deck",
        vec![
            Page::new("s0", vec![]).with_notes(Page::new("n0", vec![written])),
            Page::new("s1", vec![]).with_notes(Page::new("n1", vec![blank])),
        ],
    );
    let (api, _dir) = api_with(deck);
    let notes = api.extract_all_notes("deck").unwrap().notes.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes["slide_0"], "remember this");
}

#[test]
fn new_slide_accepts_notes() {
    let (mut api, _dir) = api_with(numbered_deck(2));
    let created = api
        .add_slide(
            "deck",
            AddSlide {
                layout: "BLANK".into(),
                position: Some(1),
            },
        )
        .unwrap()
        .created_id
        .unwrap();
    assert_eq!(order(&api)[1], created);

    api.add_notes(
        "deck",
        AddNotes {
            slide_index: 1,
            text: "intro".into(),
        },
    )
    .unwrap();
    assert_eq!(api.get_notes("deck", 1).unwrap().text.unwrap(), "intro");
}

#[test]
fn table_cells_and_replace_show_up_in_extracted_text() {
    let (mut api, _dir) = api_with(numbered_deck(1));
    let table_id = api
        .create_table(
            "deck",
            CreateTable {
                slide_index: 0,
                rows: 2,
                columns: 2,
            },
        )
        .unwrap()
        .created_id
        .unwrap();
    api.update_cell(
        "deck",
        UpdateCell {
            table_id: table_id.clone(),
            row: 1,
            column: 0,
            text: "Q3 revenue".into(),
        },
    )
    .unwrap();
    api.replace_text(
        "deck",
        ReplaceText {
            find: "REVENUE".into(),
            replace: "costs".into(),
        },
    )
    .unwrap();

    let text = api.extract_all_text("deck").unwrap().text.unwrap();
    assert!(text.contains("Q3 costs"));

    let err = api
        .update_cell(
            "deck",
            UpdateCell {
                table_id,
                row: 5,
                column: 0,
                text: "x".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err.root(), SlidezError::Rejected(_)));
}

#[test]
fn created_presentation_is_filed_into_folder() {
    let dir = TempDir::new().unwrap();
    let mut api = SlidesApi::new(
        InMemoryDocuments::new(),
        InMemoryFiles::new(),
        dir.path().to_path_buf(),
    );
    let result = api
        .create_presentation(CreatePresentation {
            title: "Quarterly".into(),
            folder: Some("folder1".into()),
        })
        .unwrap();
    let id = result.created_id.unwrap();
    let created = api.documents().presentation(&id).unwrap();
    assert_eq!(created.slides.len(), 1);
    assert_eq!(api.files().parents(), [(id, "folder1".to_string())]);
}
