//! Integration tests for the editing session
//! Drives the session the way a host shell does: selection notifications,
//! keydowns, pointer presses and toolbar verbs, checking the resulting tree.

use doc_model::{DocumentTree, NodeId, NodeType, Position, SectionKind, SelectionRange};
use edit_engine::{
    EditorSession, EditorSettings, FocusCycle, ImageSource, Key, KeyEvent, KeydownResult,
    Modifiers, PointerEvent, TargetKind,
};

/// Session over a one-paragraph body, caret saved at `caret`
fn session(body: &str, caret: usize) -> (EditorSession, NodeId, NodeId) {
    let tree = DocumentTree::with_text("Header", body, "Footer");
    let mut s = EditorSession::new(tree, EditorSettings::default());
    let para = s.tree().paragraphs(s.tree().section(SectionKind::Body))[0];
    let text = s.tree().children(para)[0];
    assert!(s.set_caret(Position::new(text, caret)));
    assert!(s.save_selection());
    (s, para, text)
}

fn body_paragraphs(s: &EditorSession) -> Vec<NodeId> {
    s.tree().paragraphs(s.tree().section(SectionKind::Body))
}

fn press(s: &mut EditorSession, key: Key) -> KeydownResult {
    s.on_key_down(&KeyEvent::new(key))
}

/// Character offset of `node` inside its paragraph's text
fn offset_in(s: &EditorSession, para: NodeId, node: NodeId) -> usize {
    s.tree()
        .text_segments(para, Some(node))
        .iter()
        .filter(|seg| s.tree().compare_order(seg.node_id, node) == Some(std::cmp::Ordering::Less))
        .map(|seg| seg.len())
        .sum()
}

// ================== Selection ==================

#[test]
fn test_restore_reapplies_saved_range() {
    let (mut s, _, text) = session("Hello world", 3);
    let saved = s.stored_range().unwrap();

    assert!(s.select(SelectionRange::new(Position::new(text, 6), Position::new(text, 11))));
    assert_ne!(s.selection(), Some(saved));
    assert!(s.restore_selection());
    assert_eq!(s.selection(), Some(saved));
}

#[test]
fn test_selection_outside_root_is_not_saved() {
    let (mut s, _, _) = session("Body", 2);
    let saved = s.stored_range();

    let header = s.tree().paragraphs(s.tree().section(SectionKind::Header))[0];
    let header_text = s.tree().children(header)[0];
    assert!(s.set_caret(Position::new(header_text, 1)));
    assert!(!s.on_selection_change());
    assert_eq!(s.stored_range(), saved);

    s.focus_section(SectionKind::Header);
    assert!(s.on_selection_change());
    assert_eq!(s.stored_range().unwrap().start, Position::new(header_text, 1));
}

// ================== Structural keys ==================

#[test]
fn test_enter_splits_at_caret() {
    let (mut s, para, _) = session("HelloWorld", 5);
    assert_eq!(press(&mut s, Key::Enter), KeydownResult::Handled);

    let paras = body_paragraphs(&s);
    assert_eq!(paras.len(), 2);
    assert_eq!(paras[0], para);
    assert_eq!(s.tree().text_content(paras[0]), "Hello");
    assert_eq!(s.tree().text_content(paras[1]), "World");
    assert_eq!(s.focused_paragraph(), Some(paras[1]));
    assert_eq!(s.stored_range().unwrap().start, Position::start_of(paras[1]));
}

#[test]
fn test_enter_in_empty_paragraph_adds_one_after() {
    let tree = DocumentTree::with_text("", "", "");
    let mut s = EditorSession::new(tree, EditorSettings::default());
    let para = body_paragraphs(&s)[0];
    assert!(s.set_caret(Position::start_of(para)));
    assert!(s.save_selection());

    assert_eq!(press(&mut s, Key::Enter), KeydownResult::Handled);
    let paras = body_paragraphs(&s);
    assert_eq!(paras.len(), 2);
    assert_eq!(paras[0], para);
    assert!(s.tree().is_empty_paragraph(paras[1]));
}

#[test]
fn test_enter_on_section_keeps_selected_paragraph_text() {
    let (mut s, para, _) = session("Hello", 0);
    let body = s.tree().section(SectionKind::Body);
    assert!(s.focus_paragraph(para));
    assert!(s.set_caret(Position::new(body, 1)));
    assert!(s.save_selection());

    assert_eq!(press(&mut s, Key::Enter), KeydownResult::Handled);
    let paras = body_paragraphs(&s);
    assert_eq!(paras.len(), 2);
    assert_eq!(s.tree().text_content(body), "Hello");
    assert_eq!(s.tree().text_content(paras[0]), "Hello");
    assert_eq!(s.stored_range().unwrap().start, Position::start_of(paras[1]));
}

#[test]
fn test_shift_enter_breaks_line_in_place() {
    let (mut s, para, _) = session("ab", 1);
    let event = KeyEvent::new(Key::Enter).with_modifiers(Modifiers::shift());
    assert!(s.on_key_down(&event).prevents_default());

    assert_eq!(body_paragraphs(&s).len(), 1);
    let breaks = s
        .tree()
        .descendants(para)
        .into_iter()
        .filter(|&n| s.tree().is_type(n, NodeType::LineBreak))
        .count();
    assert_eq!(breaks, 1);
}

#[test]
fn test_tab_then_backspace_restores_paragraph() {
    let (mut s, para, _) = session("ab", 1);
    let before = s.tree().text_content(para);

    assert_eq!(press(&mut s, Key::Tab), KeydownResult::Handled);
    let tabs = |s: &EditorSession| {
        s.tree()
            .descendants(para)
            .into_iter()
            .filter(|&n| s.tree().is_type(n, NodeType::Tab))
            .count()
    };
    assert_eq!(tabs(&s), 1);

    assert_eq!(press(&mut s, Key::Backspace), KeydownResult::Handled);
    assert_eq!(tabs(&s), 0);
    assert_eq!(s.tree().text_content(para), before);
}

#[test]
fn test_delete_before_image_selects_it_for_native_deletion() {
    let (mut s, para, text) = session("ab", 2);
    let image = s.tree_mut().create_image("a.png");
    s.tree_mut().append_child(para, image).unwrap();
    let nodes = s.tree().node_count();

    let result = press(&mut s, Key::Delete);
    assert_eq!(result, KeydownResult::PassThrough);
    assert!(!result.prevents_default());
    assert_eq!(s.tree().node_count(), nodes);
    assert_eq!(s.selection(), s.tree().range_around(image));

    // Plain text next to the caret is left to the host
    assert!(s.set_caret(Position::new(text, 1)));
    assert!(s.save_selection());
    assert_eq!(press(&mut s, Key::Delete), KeydownResult::NotHandled);
}

#[test]
fn test_shortcuts_stay_native() {
    let (mut s, _, _) = session("ab", 1);
    let undo = KeyEvent::new(Key::Character('z')).with_modifiers(Modifiers::ctrl());
    assert_eq!(s.on_key_down(&undo), KeydownResult::NotHandled);
}

// ================== Inline object motion ==================

#[test]
fn test_word_motion_round_trip() {
    let (mut s, para, text) = session("Hello brave world", 0);
    let image = s.tree_mut().create_image("a.png");
    s.tree_mut().insert_at(Position::new(text, 6), image).unwrap();
    assert_eq!(offset_in(&s, para, image), 6);

    assert!(s.move_word_right(image));
    assert_eq!(offset_in(&s, para, image), 11);
    assert!(s.move_word_left(image));
    assert_eq!(offset_in(&s, para, image), 6);
    assert_eq!(s.tree().text_content(para), "Hello brave world");
}

#[test]
fn test_word_motion_at_start_is_a_no_op() {
    let (mut s, para, text) = session("Hello", 0);
    let image = s.tree_mut().create_image("a.png");
    s.tree_mut().insert_before(text, image).unwrap();
    let children = s.tree().children(para).to_vec();

    assert!(!s.move_word_left(image));
    assert_eq!(s.tree().children(para), children.as_slice());
}

// ================== Tables ==================

#[test]
fn test_ctrl_click_cycles_table_row_column() {
    let (mut s, _, _) = session("x", 1);
    let table = s.insert_table(3, 3).unwrap();
    let cell = s.tree().cell_at(table, 1, 2).unwrap();
    let ctrl = PointerEvent::new(cell).with_modifiers(Modifiers::ctrl());

    assert_eq!(s.table_selection().cycle(), FocusCycle::Table);
    assert!(s.on_pointer_down(&ctrl));
    assert_eq!(s.table_selection().cycle(), FocusCycle::Row);
    assert_eq!(
        s.table_selection().rows().selected(),
        vec![s.tree().row_of(cell).unwrap()]
    );
    assert!(s.on_pointer_down(&ctrl));
    assert_eq!(s.table_selection().cycle(), FocusCycle::Column);
    assert_eq!(s.table_selection().cols().selected(table), vec![2]);
    assert!(s.on_pointer_down(&ctrl));
    assert_eq!(s.table_selection().cycle(), FocusCycle::Table);
    assert!(!s.table_selection().rows().is_engaged());
    assert_eq!(s.focused_table(), Some(table));
}

#[test]
fn test_table_not_inserted_inside_cell() {
    let (mut s, _, _) = session("x", 0);
    let table = s.insert_table(2, 2).unwrap();
    assert!(s.tree().cell_of(s.stored_range().unwrap().start.node_id).is_some());
    assert_eq!(s.insert_table(2, 2), None);
    assert_eq!(s.tree().table_cells(table).len(), 4);
}

// ================== Target resolution ==================

#[test]
fn test_target_priority_follows_focus() {
    let (mut s, para, text) = session("Hello world", 5);
    let image = s
        .insert_image(ImageSource::DataUri("data:image/png;base64,AA".into()), None)
        .unwrap()
        .unwrap();
    assert_eq!(s.target_kind(), TargetKind::Image);

    s.insert_table(1, 2).unwrap();
    assert_eq!(s.focused_image(), Some(image));
    assert_eq!(s.target_kind(), TargetKind::Cell, "cells win over images");

    s.on_pointer_down(&PointerEvent::new(para));
    assert_eq!(s.target_kind(), TargetKind::Paragraph);

    s.on_pointer_down(&PointerEvent::new(image));
    assert_eq!(s.target_kind(), TargetKind::Image);

    s.on_pointer_down(&PointerEvent::new(para));
    assert!(s.select(SelectionRange::new(Position::new(text, 0), Position::new(text, 2))));
    assert!(s.save_selection());
    assert_eq!(s.target_kind(), TargetKind::Text);
}

#[test]
fn test_verbs_route_to_resolved_target() {
    let (mut s, para, _) = session("Hello world", 5);
    let image = s
        .insert_image(ImageSource::DataUri("data:image/png;base64,AA".into()), None)
        .unwrap()
        .unwrap();

    assert!(s.increase());
    assert_eq!(s.tree().get(image).unwrap().style.width, Some(330.0));
    assert_eq!(s.tree().get(para).unwrap().style.width, None);

    s.on_pointer_down(&PointerEvent::new(para));
    assert!(s.increase());
    assert_eq!(s.tree().get(para).unwrap().style.width, Some(710.0));
    assert_eq!(s.tree().get(image).unwrap().style.width, Some(330.0));
}
