//! Integration tests for the edit session

use pagecraft_common::{check_integrity, RealFileSystem};
use pagecraft_document::{tree, Element, ElementKind, ElementPatch, Viewport};
use pagecraft_editor::{
    CannedGenerator, ContentGenerator, DragGesture, DragSource, DropTarget, EditSession,
    EditorConfig, EditorError, FileStore, HistoryConfig, MemoryStore, MutationResult, NoopReason,
    Project,
};

fn session_with(elements: Vec<Element>) -> EditSession {
    EditSession::from_project(
        &EditorConfig::default(),
        Project {
            elements,
            ..Project::default()
        },
    )
    .unwrap()
}

/// `[a, b, c]` at the root plus `box { inner }`
fn page() -> Vec<Element> {
    vec![
        Element::new("a", ElementKind::Paragraph).with_content("A"),
        Element::new("b", ElementKind::Paragraph).with_content("B"),
        Element::new("c", ElementKind::Paragraph).with_content("C"),
        Element::new("box", ElementKind::Container)
            .with_children(vec![Element::new("inner", ElementKind::Button)]),
    ]
}

fn root_ids(session: &EditSession) -> Vec<&str> {
    session.elements().iter().map(|e| e.id.as_str()).collect()
}

fn drag(session: &mut EditSession, active: &str, over: Option<&str>) -> MutationResult {
    session.handle_drag_refs(active, over).unwrap()
}

#[test]
fn test_history_is_linear() {
    let mut session = session_with(page());

    session
        .update_properties("a", ElementPatch::content("A1"))
        .unwrap();
    session
        .update_properties("a", ElementPatch::content("A2"))
        .unwrap();
    assert!(session.undo());

    // Editing after undo discards the redo branch
    session
        .update_properties("b", ElementPatch::content("B1"))
        .unwrap();
    assert!(!session.can_redo());

    let labels: Vec<String> = session
        .history_entries()
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(labels, vec!["Initial State", "Change 1", "Change 2"]);
    assert!(session.history_entries()[2].is_current);

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.elements()[0].content, "A");
    assert_eq!(session.elements()[1].content, "B");
    assert!(!session.undo());
}

#[test]
fn test_navigation_records_nothing() {
    let mut session = session_with(page());
    session.delete_node("a").unwrap();
    session.delete_node("b").unwrap();
    let recorded = session.history().len();

    assert!(session.undo());
    assert!(session.redo());
    assert!(session.jump_to(0));
    assert!(!session.jump_to(99));

    assert_eq!(session.history().len(), recorded);
    assert_eq!(root_ids(&session), vec!["a", "b", "c", "box"]);
    assert_eq!(session.history().cursor(), 0);
}

#[test]
fn test_versions_increase_with_every_change() {
    let mut session = session_with(page());
    let first = session
        .set_style_property("a", "color", "red", None)
        .unwrap();
    assert_eq!(first, MutationResult::Applied { version: 1 });

    session.undo();
    assert_eq!(session.version(), 2);

    let unchanged = session
        .remove_style_property("a", "color", None)
        .unwrap();
    assert_eq!(unchanged, MutationResult::noop(NoopReason::Unchanged));
    assert_eq!(session.version(), 2);
}

#[test]
fn test_stale_ids_are_noops() {
    let mut session = session_with(page());
    let result = session
        .update_properties("ghost", ElementPatch::content("x"))
        .unwrap();
    assert_eq!(
        result,
        MutationResult::noop(NoopReason::NotFound {
            node_id: "ghost".to_string()
        })
    );
    assert_eq!(
        session.delete_node("ghost").unwrap(),
        MutationResult::noop(NoopReason::NotFound {
            node_id: "ghost".to_string()
        })
    );
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_deleting_selection_clears_it() {
    let mut session = session_with(page());
    assert!(session.select(Some("a")));
    session.delete_node("a").unwrap();
    assert!(session.selected().is_none());

    // Deleting an ancestor takes the selection with it
    assert!(session.select(Some("inner")));
    session.delete_node("box").unwrap();
    assert_eq!(session.selected_id(), None);
}

#[test]
fn test_history_navigation_clears_stale_selection() {
    let mut session = session_with(page());
    drag(&mut session, "palette:button", Some("canvas"));
    let new_id = session.selected_id().unwrap().to_string();

    session.undo();
    assert!(session.selected().is_none());
    session.redo();
    assert!(session.selected().is_none());
    assert!(tree::contains_id(session.elements(), &new_id));
}

#[test]
fn test_selection_is_resolved_against_live_tree() {
    let mut session = session_with(page());
    session.select(Some("inner"));
    session
        .update_properties("inner", ElementPatch::content("Buy"))
        .unwrap();
    assert_eq!(session.selected().unwrap().content, "Buy");

    session.undo();
    assert_eq!(session.selected().unwrap().content, "");
}

#[test]
fn test_drag_reorder_forward() {
    let mut session = session_with(page());
    drag(&mut session, "a", Some("c"));
    assert_eq!(root_ids(&session), vec!["b", "c", "a", "box"]);
}

#[test]
fn test_drag_reorder_backward() {
    let mut session = session_with(page());
    drag(&mut session, "c", Some("a"));
    assert_eq!(root_ids(&session), vec!["c", "a", "b", "box"]);
    assert!(check_integrity(session.elements()).is_empty());
}

#[test]
fn test_drag_across_parents_lands_before_target() {
    let mut session = session_with(page());
    drag(&mut session, "b", Some("inner"));

    assert_eq!(root_ids(&session), vec!["a", "c", "box"]);
    let container = tree::find_by_id(session.elements(), "box").unwrap();
    let children: Vec<&str> = container.children.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(children, vec!["b", "inner"]);
    assert_eq!(container.children[0].parent_id.as_deref(), Some("box"));
    assert!(check_integrity(session.elements()).is_empty());
}

#[test]
fn test_drag_into_own_subtree_is_rejected() {
    let mut session = session_with(vec![Element::new("outer", ElementKind::Container)
        .with_children(vec![Element::new("mid", ElementKind::Container)
            .with_children(vec![Element::new("leaf", ElementKind::Paragraph)])])]);

    let result = drag(&mut session, "outer", Some("leaf"));
    assert_eq!(result, MutationResult::noop(NoopReason::WouldCreateCycle));
    assert_eq!(session.history().len(), 1);

    assert_eq!(
        drag(&mut session, "mid", Some("mid")),
        MutationResult::noop(NoopReason::DroppedOnSelf)
    );
}

#[test]
fn test_drag_without_target() {
    let mut session = session_with(page());
    assert_eq!(
        drag(&mut session, "a", None),
        MutationResult::noop(NoopReason::NoDropTarget)
    );
    assert_eq!(
        drag(&mut session, "a", Some("canvas")),
        MutationResult::noop(NoopReason::NoDropTarget)
    );
    assert_eq!(
        drag(&mut session, "palette:image", None),
        MutationResult::noop(NoopReason::NoDropTarget)
    );
}

#[test]
fn test_palette_drops() {
    let mut session = session_with(page());

    // Canvas appends at the root and selects the new node
    drag(&mut session, "palette:heading-1", Some("canvas"));
    let heading = session.selected().unwrap();
    assert_eq!(heading.kind, ElementKind::Heading1);
    assert_eq!(session.elements().last().unwrap().id, heading.id);

    // Container targets receive the node as their last child
    drag(&mut session, "palette:paragraph", Some("box"));
    let container = tree::find_by_id(session.elements(), "box").unwrap();
    assert_eq!(container.children.len(), 2);
    assert_eq!(container.children[1].id, session.selected_id().unwrap());

    // A leaf target hands the node to the leaf's parent
    drag(&mut session, "palette:image", Some("inner"));
    let container = tree::find_by_id(session.elements(), "box").unwrap();
    assert_eq!(container.children.len(), 3);
    assert_eq!(container.children[2].kind, ElementKind::Image);

    let stale = drag(&mut session, "palette:image", Some("ghost"));
    assert_eq!(
        stale,
        MutationResult::noop(NoopReason::NotFound {
            node_id: "ghost".to_string()
        })
    );
    assert!(check_integrity(session.elements()).is_empty());
}

#[test]
fn test_unknown_palette_kind_is_an_error() {
    let mut session = session_with(page());
    assert!(matches!(
        session.handle_drag_refs("palette:marquee", Some("canvas")),
        Err(EditorError::Tree(_))
    ));
}

#[test]
fn test_palette_defaults_follow_viewport() {
    let mut session = session_with(Vec::new());
    session.set_viewport(Viewport::Narrow);
    let gesture = DragGesture::new(
        DragSource::Palette(ElementKind::Heading1),
        Some(DropTarget::Canvas),
    );
    session.handle_drag_end(&gesture).unwrap();
    let narrow = session.selected().unwrap().style.clone();

    session.set_viewport(Viewport::Wide);
    session.handle_drag_end(&gesture).unwrap();
    let wide = session.selected().unwrap().style.clone();

    assert_ne!(narrow.get("fontSize"), wide.get("fontSize"));
}

#[test]
fn test_drag_preview() {
    let session = session_with(page());
    let preview = session
        .drag_preview(&DragSource::Palette(ElementKind::Button))
        .unwrap();
    assert!(!tree::contains_id(session.elements(), &preview.id));
    assert_eq!(
        session
            .drag_preview(&DragSource::Element("b".to_string()))
            .unwrap()
            .content,
        "B"
    );
    assert!(session
        .drag_preview(&DragSource::Element("ghost".to_string()))
        .is_none());
}

#[test]
fn test_template_replaces_page() {
    let mut session = session_with(page());
    session.select(Some("a"));

    let result = session.apply_template_by_id("landing-page").unwrap();
    assert!(result.is_applied());
    assert!(!tree::contains_id(session.elements(), "a"));
    assert!(session.selected().is_none());
    assert!(check_integrity(session.elements()).is_empty());

    // Undo brings the old page back
    session.undo();
    assert_eq!(root_ids(&session), vec!["a", "b", "c", "box"]);

    assert!(matches!(
        session.apply_template_by_id("missing"),
        Err(EditorError::UnknownTemplate(_))
    ));
}

#[test]
fn test_sections_append_with_fresh_ids() {
    let mut session = session_with(page());
    session.apply_section_by_id("features-1").unwrap();
    session.apply_section_by_id("features-1").unwrap();

    assert_eq!(session.elements().len(), 4 + 2 + 2);
    assert!(check_integrity(session.elements()).is_empty());
    assert_eq!(&root_ids(&session)[..4], &["a", "b", "c", "box"]);
}

#[test]
fn test_generated_content_appends_paragraph() {
    let mut session = session_with(page());
    let mut generator = CannedGenerator::default();

    session
        .generate_content(&mut generator, "A hero section for a bakery")
        .unwrap();
    let last = session.elements().last().unwrap();
    assert_eq!(last.kind, ElementKind::Paragraph);
    assert!(last.content.starts_with("# Welcome"));
    assert_eq!(last.parent_id, None);
}

struct FailingGenerator;

impl ContentGenerator for FailingGenerator {
    fn generate(&mut self, _prompt: &str) -> Result<String, EditorError> {
        Err(EditorError::Storage("offline".to_string()))
    }
}

#[test]
fn test_failed_generation_changes_nothing() {
    let mut session = session_with(page());
    let result = session.generate_content(&mut FailingGenerator, "anything");
    assert!(matches!(result, Err(EditorError::Generator(_))));
    assert_eq!(session.elements().len(), 4);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_history_retention_cap() {
    let config = EditorConfig {
        history: HistoryConfig { max_entries: 3 },
        ..EditorConfig::default()
    };
    let mut session = EditSession::from_project(
        &config,
        Project {
            elements: page(),
            ..Project::default()
        },
    )
    .unwrap();

    for i in 0..5 {
        session
            .update_properties("a", ElementPatch::content(format!("v{i}")))
            .unwrap();
    }
    assert_eq!(session.history().len(), 3);
    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.elements()[0].content, "v2");
}

#[test]
fn test_render_tree_clamps_columns() {
    let mut session = session_with(vec![Element::new("cols", ElementKind::Columns3)
        .with_children(vec![Element::new("x", ElementKind::Paragraph)])]);

    session.set_viewport(Viewport::Narrow);
    let narrow = session.render_tree();
    assert_eq!(narrow[0].columns, Some(1));

    session.set_viewport(Viewport::Wide);
    let wide = session.render_tree();
    assert_eq!(wide[0].columns, Some(3));
    assert_eq!(wide[0].children.len(), 3);
    assert!(wide[0].children[2].is_placeholder());
    assert_eq!(
        wide[0].style.get("gridTemplateColumns").map(String::as_str),
        Some("repeat(3, 1fr)")
    );
}

#[test]
fn test_responsive_override_wins_at_its_viewport() {
    let mut session = session_with(page());
    session
        .set_style_property("a", "fontSize", "20px", None)
        .unwrap();
    session
        .set_style_property("a", "fontSize", "14px", Some(Viewport::Narrow))
        .unwrap();

    assert_eq!(session.resolved_style("a").unwrap()["fontSize"], "20px");
    session.set_viewport(Viewport::Narrow);
    assert_eq!(session.resolved_style("a").unwrap()["fontSize"], "14px");
}

#[test]
fn test_save_and_reopen_in_memory() -> anyhow::Result<()> {
    let mut session = session_with(page());
    session.set_theme_preset("dark")?;
    session.update_properties("a", ElementPatch::content("Saved"))?;

    let mut store = MemoryStore::new();
    session.save(&mut store)?;

    let reopened = EditSession::open(&EditorConfig::default(), &store)?;
    assert_eq!(reopened.elements(), session.elements());
    assert_eq!(reopened.theme(), session.theme());
    assert!(!reopened.can_undo());
    Ok(())
}

#[test]
fn test_reopened_session_never_reuses_ids() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = EditorConfig::default();
    let mut store = FileStore::new(RealFileSystem, dir.path().join(&config.storage_dir));

    let mut session = EditSession::new(&config)?;
    drag(&mut session, "palette:button", Some("canvas"));
    drag(&mut session, "palette:button", Some("canvas"));
    session.save(&mut store)?;

    let mut reopened = EditSession::open(&config, &store)?;
    reopened.handle_drag_refs("palette:button", Some("canvas"))?;
    assert_eq!(reopened.elements().len(), 3);
    assert!(check_integrity(reopened.elements()).is_empty());
    Ok(())
}
