use foyeajx_core::{Alignment, FormattingState, Note};
use foyeajx_notes::{export_html, load_notes, save_notes, NoteStore, StoreError};

fn note(title: &str, content: &str) -> Note {
    Note::new().with_content(title, content)
}

#[test]
fn store_roundtrip() {
    let mut store = NoteStore::new();
    let mut first = note("Groceries", "<div>milk, <b>eggs</b></div>");
    first.formatting = FormattingState {
        italic: true,
        alignment: Alignment::Right,
        ..FormattingState::default()
    };
    first.images.push("data:image/png;base64,AAAA".into());
    let first_id = first.id.clone();
    store.upsert(first);
    store.upsert(note("Ideas", "<p>write more rust</p>"));
    store.toggle_star(&first_id).unwrap();

    let path = std::path::Path::new("target/test_notes.foyeajx.json");
    save_notes(path, &store).unwrap();
    let loaded = load_notes(path).unwrap();

    assert_eq!(store, loaded);
    assert!(loaded.get(&first_id).unwrap().is_starred);
}

#[test]
fn missing_file_loads_empty() {
    let store = load_notes("target/no_such_notes_file.json").unwrap();
    assert!(store.is_empty());
}

#[test]
fn legacy_blob_without_optional_fields_loads() {
    let path = std::path::Path::new("target/test_notes_legacy.json");
    std::fs::create_dir_all("target").unwrap();
    std::fs::write(
        path,
        r#"[{"id":"1700000000000","title":"old","content":"hi","date":"3 MAR"}]"#,
    )
    .unwrap();

    let store = load_notes(path).unwrap();
    let old = store.get("1700000000000").unwrap();
    assert_eq!(old.language, "en");
    assert_eq!(old.formatting, FormattingState::default());
    assert!(old.images.is_empty());
}

#[test]
fn upsert_replaces_in_place_and_prepends_new() {
    let mut store = NoteStore::new();
    let a = note("a", "1");
    let b = note("b", "2");
    let a_id = a.id.clone();
    assert!(store.upsert(a.clone()));
    assert!(store.upsert(b));

    let mut edited = a;
    edited.content = "1 edited".into();
    assert!(!store.upsert(edited));

    let titles: Vec<_> = store.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["b", "a"]);
    assert_eq!(store.get(&a_id).unwrap().content, "1 edited");
}

#[test]
fn search_matches_title_or_content_ignoring_case() {
    let mut store = NoteStore::new();
    store.upsert(note("Rust Notes", "borrowck"));
    store.upsert(note("shopping", "<b>Rusty</b> nails"));
    store.upsert(note("other", "nothing here"));

    assert_eq!(store.search("rust").len(), 2);
    assert_eq!(store.search("NAILS").len(), 1);
    assert_eq!(store.search("   ").len(), 3);
    assert!(store.search("zzz").is_empty());
}

#[test]
fn pinned_first_keeps_relative_order() {
    let mut store = NoteStore::new();
    let oldest = note("oldest", "");
    let oldest_id = oldest.id.clone();
    store.upsert(oldest);
    store.upsert(note("middle", ""));
    store.upsert(note("newest", ""));
    store.toggle_pin(&oldest_id).unwrap();

    let order: Vec<_> = store.pinned_first().iter().map(|n| n.title.clone()).collect();
    assert_eq!(order, ["oldest", "newest", "middle"]);
}

#[test]
fn starred_view_and_unknown_ids() {
    let mut store = NoteStore::new();
    let a = note("a", "");
    let a_id = a.id.clone();
    store.upsert(a);
    store.upsert(note("b", ""));

    assert!(store.toggle_star(&a_id).unwrap());
    assert_eq!(store.starred().len(), 1);
    assert!(!store.toggle_star(&a_id).unwrap());
    assert!(store.starred().is_empty());

    assert_eq!(
        store.remove("missing"),
        Err(StoreError::UnknownNote {
            note_id: "missing".into()
        })
    );
    assert_eq!(store.remove(&a_id).unwrap().title, "a");
    assert_eq!(store.len(), 1);
}

#[test]
fn images_can_be_attached_and_removed() {
    let mut store = NoteStore::new();
    let a = note("a", "");
    let id = a.id.clone();
    store.upsert(a);

    store.add_image(&id, "data:image/png;base64,x").unwrap();
    store.add_image(&id, "data:image/png;base64,y").unwrap();
    assert_eq!(store.remove_image(&id, 0).unwrap(), "data:image/png;base64,x");
    assert!(matches!(
        store.remove_image(&id, 5),
        Err(StoreError::ImageOutOfRange { index: 5, len: 1, .. })
    ));
}

#[test]
fn export_writes_raw_markup() {
    let n = note("Export Me", "<h1>Hello</h1>");
    let path = export_html(&n, "target/exports").unwrap();
    assert!(path.ends_with("Export Me.html"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "<h1>Hello</h1>");
}
