use specmark_editor::interaction::{InteractionState, Key, KeyEvent, Modifiers, PointerEvent, WheelEvent};
use specmark_editor::model::{BoundingBox, DomainContext, Point, Rect};
use specmark_editor::{Alignment, DistributeAxis, EditorMode, EditorSession, EventOutcome, Handle, InputQueue};
use specmark_settings::EditorConfig;

fn boxed(x: f64, y: f64, w: f64, h: f64, label: &str) -> BoundingBox {
    BoundingBox::from_rect(Rect::new(x, y, w, h), &DomainContext::default()).with_label(label)
}

fn session_with(records: Vec<BoundingBox>) -> EditorSession {
    let mut session = EditorSession::default();
    session.load_boxes(records).unwrap();
    session
}

fn three_boxes() -> EditorSession {
    session_with(vec![
        boxed(10.0, 10.0, 20.0, 20.0, "a"),
        boxed(100.0, 10.0, 20.0, 20.0, "b"),
        boxed(300.0, 300.0, 20.0, 20.0, "c"),
    ])
}

fn click(session: &mut EditorSession, x: f64, y: f64, modifiers: Modifiers) -> EventOutcome {
    session.handle_event(PointerEvent::down(x, y).with_modifiers(modifiers));
    session.handle_event(PointerEvent::up(x, y).with_modifiers(modifiers))
}

fn ctrl_wheel(x: f64, delta_y: f64) -> WheelEvent {
    WheelEvent {
        position: Point::new(x, 0.0),
        delta_x: 0.0,
        delta_y,
        modifiers: Modifiers::ctrl(),
    }
}

// Drawing

#[test]
fn test_draw_commits_on_pointer_up() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);

    assert_eq!(session.handle_event(PointerEvent::down(96.0, 0.0)), EventOutcome::Preview);
    assert_eq!(session.handle_event(PointerEvent::moved(200.0, 100.0)), EventOutcome::Preview);
    assert!(session.boxes().is_empty());
    match session.interaction() {
        InteractionState::Drawing(state) => {
            assert_eq!(state.current_box, Some(Rect::new(96.0, 0.0, 104.0, 100.0)));
        }
        other => panic!("expected drawing, got {}", other.name()),
    }

    assert_eq!(session.handle_event(PointerEvent::up(288.0, 195.0)), EventOutcome::Committed);
    let b = session.boxes().get(0).unwrap();
    assert_eq!(b.rect(), Rect::new(96.0, 0.0, 192.0, 195.0));
    assert!((b.start_time - 1.0).abs() < 1e-9);
    assert!((b.end_time - 3.0).abs() < 1e-9);
    assert!((b.min_frequency.unwrap() - 10_000.0).abs() < 1e-6);
    assert_eq!(b.label, "None");
    assert_eq!(session.selection().selected(), &[0]);
    assert!(session.interaction().is_idle());
    assert!(session.can_undo());
}

#[test]
fn test_click_in_draw_mode_is_cancelled() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);

    assert_eq!(click(&mut session, 100.0, 100.0, Modifiers::NONE), EventOutcome::Cancelled);
    assert!(session.boxes().is_empty());
    assert!(session.interaction().is_idle());
    assert!(!session.can_undo());
}

#[test]
fn test_draw_is_constrained_to_spectrogram_band() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);
    session.handle_event(PointerEvent::down(900.0, 300.0));
    session.handle_event(PointerEvent::up(990.0, 600.0));

    // x clamps to the last content pixel, the height to the band.
    let b = session.boxes().get(0).unwrap();
    assert_eq!(b.rect(), Rect::new(900.0, 300.0, 59.0, 90.0));
}

#[test]
fn test_draw_snaps_when_enabled() {
    let mut config = EditorConfig::default();
    config.geometry.snap_to_grid = true;
    let mut session = EditorSession::new(config, DomainContext::default());
    session.set_mode(EditorMode::Draw);

    session.handle_event(PointerEvent::down(13.0, 17.0));
    session.handle_event(PointerEvent::up(58.0, 44.0));
    assert_eq!(
        session.boxes().get(0).unwrap().rect(),
        Rect::new(10.0, 20.0, 50.0, 30.0)
    );
}

#[test]
fn test_escape_cancels_drawing() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);
    session.handle_event(PointerEvent::down(10.0, 10.0));
    session.handle_event(PointerEvent::moved(80.0, 80.0));

    assert_eq!(session.handle_event(KeyEvent::new(Key::Escape)), EventOutcome::Cancelled);
    assert_eq!(session.handle_event(PointerEvent::up(80.0, 80.0)), EventOutcome::Ignored);
    assert!(session.boxes().is_empty());
}

#[test]
fn test_drawing_over_existing_box_starts_drag() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 50.0, 50.0, "a")]);
    session.set_mode(EditorMode::Draw);
    session.handle_event(PointerEvent::down(120.0, 120.0));
    assert!(matches!(session.interaction(), InteractionState::Dragging(_)));
}

// Dragging

#[test]
fn test_drag_previews_then_commits() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 50.0, 50.0, "a")]);

    session.handle_event(PointerEvent::down(120.0, 120.0));
    assert_eq!(session.selection().selected(), &[0]);
    session.handle_event(PointerEvent::moved(170.0, 140.0));

    // Committed state is untouched until release; the frame shows the preview.
    assert_eq!(session.boxes().get(0).unwrap().x, 100.0);
    let frame = session.render_frame();
    assert_eq!(frame.boxes[0].rect(), Rect::new(150.0, 120.0, 50.0, 50.0));

    assert_eq!(session.handle_event(PointerEvent::up(170.0, 140.0)), EventOutcome::Committed);
    let b = session.boxes().get(0).unwrap();
    assert_eq!(b.rect(), Rect::new(150.0, 120.0, 50.0, 50.0));
    assert!((b.start_time - 1.5625).abs() < 1e-9);
    assert_eq!(b.label, "a");
}

#[test]
fn test_drag_is_clamped_at_edge() {
    let mut session = session_with(vec![boxed(900.0, 0.0, 50.0, 50.0, "a")]);
    session.handle_event(PointerEvent::down(910.0, 10.0));
    session.handle_event(PointerEvent::up(950.0, 10.0));
    assert_eq!(session.boxes().get(0).unwrap().x, 910.0);
}

#[test]
fn test_escape_cancels_drag() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 50.0, 50.0, "a")]);
    session.handle_event(PointerEvent::down(120.0, 120.0));
    session.handle_event(PointerEvent::moved(300.0, 300.0));

    assert_eq!(session.handle_event(KeyEvent::new(Key::Escape)), EventOutcome::Cancelled);
    assert_eq!(session.render_frame().boxes[0].x, 100.0);
    assert_eq!(session.handle_event(PointerEvent::up(300.0, 300.0)), EventOutcome::Ignored);
    assert_eq!(session.boxes().get(0).unwrap().x, 100.0);
    assert!(!session.can_undo());
}

#[test]
fn test_click_without_movement_only_selects() {
    let mut session = three_boxes();
    assert_eq!(click(&mut session, 110.0, 20.0, Modifiers::NONE), EventOutcome::Preview);
    assert_eq!(session.selection().selected(), &[1]);
    assert!(!session.can_undo());
}

#[test]
fn test_group_drag_keeps_relative_layout() {
    let mut session = three_boxes();
    session.select_all();

    // Box 0 is 10px from the left edge; the whole group stops there.
    session.handle_event(PointerEvent::down(110.0, 20.0));
    session.handle_event(PointerEvent::up(60.0, 20.0));

    let xs: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![0.0, 90.0, 290.0]);
    assert_eq!(session.selection().len(), 3);
}

#[test]
fn test_mode_switch_discards_gesture() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 50.0, 50.0, "a")]);
    session.handle_event(PointerEvent::down(120.0, 120.0));
    session.handle_event(PointerEvent::moved(200.0, 200.0));
    session.set_mode(EditorMode::Draw);
    assert!(session.interaction().is_idle());
    assert_eq!(session.boxes().get(0).unwrap().x, 100.0);
}

#[test]
fn test_delete_during_drag_leaves_other_boxes_intact() {
    let mut session = three_boxes();
    session.handle_event(PointerEvent::down(20.0, 20.0));
    session.handle_event(PointerEvent::moved(60.0, 20.0));
    assert_eq!(session.selection().selected(), &[0]);

    assert!(session.delete_selected());
    assert!(session.interaction().is_idle());
    assert_eq!(session.handle_event(PointerEvent::up(60.0, 20.0)), EventOutcome::Ignored);

    let labels: Vec<&str> = session.boxes().iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["b", "c"]);
    assert_eq!(session.boxes().get(0).unwrap().x, 100.0);

    assert!(session.undo());
    assert_eq!(session.boxes().get(0).unwrap().x, 10.0);
    assert!(!session.can_undo());
}

// Resizing

#[test]
fn test_resize_selected_box_by_handle() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 100.0, 100.0, "a")]);
    session.select(0);

    session.handle_event(PointerEvent::down(200.0, 200.0));
    match session.interaction() {
        InteractionState::Resizing(state) => assert_eq!(state.handle, Handle::Se),
        other => panic!("expected resizing, got {}", other.name()),
    }
    session.handle_event(PointerEvent::moved(250.0, 260.0));
    assert_eq!(
        session.render_frame().boxes[0].rect(),
        Rect::new(100.0, 100.0, 150.0, 160.0)
    );
    assert_eq!(session.boxes().get(0).unwrap().width, 100.0);

    assert_eq!(session.handle_event(PointerEvent::up(250.0, 260.0)), EventOutcome::Committed);
    assert_eq!(
        session.boxes().get(0).unwrap().rect(),
        Rect::new(100.0, 100.0, 150.0, 160.0)
    );
}

#[test]
fn test_resize_stops_at_minimum_size() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 100.0, 100.0, "a")]);
    session.select(0);

    session.handle_event(PointerEvent::down(100.0, 100.0));
    session.handle_event(PointerEvent::up(300.0, 300.0));
    assert_eq!(
        session.boxes().get(0).unwrap().rect(),
        Rect::new(190.0, 190.0, 10.0, 10.0)
    );
}

#[test]
fn test_duplicate_during_resize_discards_resize() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 100.0, 100.0, "a")]);
    session.select(0);
    session.handle_event(PointerEvent::down(200.0, 200.0));
    session.handle_event(PointerEvent::moved(250.0, 260.0));

    assert!(session.duplicate_selected());
    assert!(session.interaction().is_idle());
    assert_eq!(session.handle_event(PointerEvent::up(250.0, 260.0)), EventOutcome::Ignored);

    assert_eq!(session.boxes().len(), 2);
    assert_eq!(
        session.boxes().get(0).unwrap().rect(),
        Rect::new(100.0, 100.0, 100.0, 100.0)
    );
    assert_eq!(session.selection().selected(), &[1]);
}

#[test]
fn test_corner_of_unselected_box_drags() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 100.0, 100.0, "a")]);
    session.handle_event(PointerEvent::down(200.0, 200.0));
    assert!(matches!(session.interaction(), InteractionState::Dragging(_)));
}

// Selection

#[test]
fn test_rubber_band_selection() {
    let mut session = three_boxes();

    assert_eq!(session.handle_event(PointerEvent::down(0.0, 0.0)), EventOutcome::Preview);
    session.handle_event(PointerEvent::moved(150.0, 50.0));
    match session.interaction() {
        InteractionState::Selecting(state) => assert_eq!(state.selected_indices, vec![0, 1]),
        other => panic!("expected selecting, got {}", other.name()),
    }
    assert!(session.render_frame().preview_rect().is_some());

    session.handle_event(PointerEvent::up(150.0, 50.0));
    assert_eq!(session.selection().selected(), &[0, 1]);
}

#[test]
fn test_rubber_band_drawn_backwards() {
    let mut session = three_boxes();
    session.handle_event(PointerEvent::down(150.0, 50.0));
    session.handle_event(PointerEvent::up(0.0, 0.0));
    assert_eq!(session.selection().selected(), &[0, 1]);
}

#[test]
fn test_shift_rubber_band_extends_selection() {
    let mut session = three_boxes();
    session.select(2);

    session.handle_event(PointerEvent::down(0.0, 0.0).with_modifiers(Modifiers::shift()));
    session.handle_event(PointerEvent::up(150.0, 50.0).with_modifiers(Modifiers::shift()));
    assert_eq!(session.selection().selected(), &[2, 0, 1]);
}

#[test]
fn test_shift_click_toggles() {
    let mut session = three_boxes();
    click(&mut session, 20.0, 20.0, Modifiers::NONE);
    click(&mut session, 110.0, 20.0, Modifiers::shift());
    assert_eq!(session.selection().selected(), &[0, 1]);

    click(&mut session, 20.0, 20.0, Modifiers::shift());
    assert_eq!(session.selection().selected(), &[1]);
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let mut session = three_boxes();
    session.select_all();
    click(&mut session, 600.0, 200.0, Modifiers::NONE);
    assert!(session.selection().is_empty());
}

// Viewport

#[test]
fn test_ctrl_wheel_zooms_to_cursor() {
    let mut session = EditorSession::default();

    assert_eq!(session.handle_event(ctrl_wheel(480.0, -1.0)), EventOutcome::ViewportChanged);
    assert!((session.viewport().zoom() - 1.2).abs() < 1e-12);
    assert!((session.viewport().scroll_offset() - 96.0).abs() < 1e-9);

    // The world point under the cursor did not move.
    let world = session.stage_to_world(Point::new(480.0, 0.0));
    assert!((world.x - 480.0).abs() < 1e-9);
}

#[test]
fn test_wheel_at_zoom_limit_is_ignored() {
    let mut session = EditorSession::default();
    assert_eq!(session.handle_event(ctrl_wheel(100.0, 1.0)), EventOutcome::Ignored);
    assert_eq!(session.viewport().zoom(), 1.0);
}

#[test]
fn test_plain_wheel_scrolls() {
    let mut session = EditorSession::default();
    session.handle_event(ctrl_wheel(480.0, -1.0));

    let outcome = session.handle_event(WheelEvent {
        position: Point::new(480.0, 0.0),
        delta_x: 0.0,
        delta_y: 50.0,
        modifiers: Modifiers::NONE,
    });
    assert_eq!(outcome, EventOutcome::ViewportChanged);
    assert!((session.viewport().scroll_offset() - 146.0).abs() < 1e-9);
}

#[test]
fn test_drawing_after_zoom_uses_live_scroll() {
    let mut session = EditorSession::default();
    session.handle_event(ctrl_wheel(480.0, -1.0));
    session.set_mode(EditorMode::Draw);

    // Stage 0 is world (0 + 96) / 1.2 = 80.
    session.handle_event(PointerEvent::down(0.0, 0.0));
    session.handle_event(PointerEvent::up(120.0, 50.0));
    let b = session.boxes().get(0).unwrap();
    assert!((b.x - 80.0).abs() < 1e-9);
    assert!((b.width - 100.0).abs() < 1e-9);
}

// Keyboard

#[test]
fn test_delete_key_removes_selection() {
    let mut session = three_boxes();
    session.select(1);
    assert_eq!(session.handle_event(KeyEvent::new(Key::Delete)), EventOutcome::Committed);

    let labels: Vec<&str> = session.boxes().iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "c"]);
    assert!(session.selection().is_empty());
    assert_eq!(session.handle_event(KeyEvent::new(Key::Backspace)), EventOutcome::Ignored);
}

#[test]
fn test_duplicate_key_selects_copies() {
    let mut session = three_boxes();
    session.select(0);
    assert_eq!(session.handle_event(KeyEvent::new(Key::Duplicate)), EventOutcome::Committed);

    assert_eq!(session.boxes().len(), 4);
    let copy = session.boxes().get(3).unwrap();
    assert_eq!(copy.rect(), Rect::new(30.0, 30.0, 20.0, 20.0));
    assert_eq!(copy.label, "a");
    assert_eq!(session.selection().selected(), &[3]);
}

#[test]
fn test_duplicate_near_edge_is_clamped() {
    let mut session = session_with(vec![boxed(950.0, 380.0, 10.0, 10.0, "edge")]);
    session.select(0);
    assert!(session.duplicate_selected());
    assert_eq!(
        session.boxes().get(1).unwrap().rect(),
        Rect::new(950.0, 380.0, 10.0, 10.0)
    );
}

#[test]
fn test_select_all_key() {
    let mut session = three_boxes();
    assert_eq!(session.handle_event(KeyEvent::new(Key::SelectAll)), EventOutcome::Preview);
    assert_eq!(session.selection().len(), 3);

    let mut empty = EditorSession::default();
    assert_eq!(empty.handle_event(KeyEvent::new(Key::SelectAll)), EventOutcome::Ignored);
}

#[test]
fn test_keys_ignored_mid_gesture() {
    let mut session = three_boxes();
    session.handle_event(PointerEvent::down(20.0, 20.0));
    session.handle_event(PointerEvent::moved(40.0, 40.0));

    assert_eq!(session.handle_event(KeyEvent::new(Key::Delete)), EventOutcome::Ignored);
    assert_eq!(session.boxes().len(), 3);
    assert!(matches!(session.interaction(), InteractionState::Dragging(_)));
}

#[test]
fn test_escape_when_idle_clears_selection() {
    let mut session = three_boxes();
    session.select(0);
    assert_eq!(session.handle_event(KeyEvent::new(Key::Escape)), EventOutcome::Preview);
    assert!(session.selection().is_empty());
    assert_eq!(session.handle_event(KeyEvent::new(Key::Escape)), EventOutcome::Ignored);
}

// History

#[test]
fn test_undo_redo_keys() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);
    session.handle_event(PointerEvent::down(10.0, 10.0));
    session.handle_event(PointerEvent::up(60.0, 60.0));

    assert_eq!(session.handle_event(KeyEvent::new(Key::Undo)), EventOutcome::Committed);
    assert!(session.boxes().is_empty());
    assert!(session.selection().is_empty());
    assert_eq!(session.handle_event(KeyEvent::new(Key::Undo)), EventOutcome::Ignored);

    assert_eq!(session.handle_event(KeyEvent::new(Key::Redo)), EventOutcome::Committed);
    assert_eq!(session.boxes().len(), 1);
    assert!(!session.can_redo());
}

#[test]
fn test_undo_restores_moved_box() {
    let mut session = session_with(vec![boxed(100.0, 100.0, 50.0, 50.0, "a")]);
    session.handle_event(PointerEvent::down(120.0, 120.0));
    session.handle_event(PointerEvent::up(220.0, 120.0));
    assert_eq!(session.boxes().get(0).unwrap().x, 200.0);

    assert!(session.undo());
    assert_eq!(session.boxes().get(0), Some(&boxed(100.0, 100.0, 50.0, 50.0, "a")));
}

#[test]
fn test_undo_discards_active_gesture() {
    let mut session = three_boxes();
    session.select(0);
    assert!(session.delete_selected());

    session.handle_event(PointerEvent::down(110.0, 20.0));
    session.handle_event(PointerEvent::moved(150.0, 20.0));
    assert!(session.undo());
    assert!(session.interaction().is_idle());
    assert_eq!(session.boxes().len(), 3);
}

#[test]
fn test_history_depth_limit() {
    let mut config = EditorConfig::default();
    config.history.max_depth = 2;
    let mut session = EditorSession::new(config, DomainContext::default());
    session.set_mode(EditorMode::Draw);
    for i in 0..3 {
        let x = 10.0 + i as f64 * 100.0;
        session.handle_event(PointerEvent::down(x, 10.0));
        session.handle_event(PointerEvent::up(x + 50.0, 60.0));
    }
    assert_eq!(session.boxes().len(), 3);

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.boxes().len(), 1);
}

#[test]
fn test_load_clears_history() {
    let mut session = three_boxes();
    session.select(0);
    session.delete_selected();
    session.load_boxes(vec![boxed(0.0, 0.0, 10.0, 10.0, "x")]).unwrap();
    assert!(!session.can_undo());
    assert!(!session.is_modified());
}

// Operations

#[test]
fn test_align_selected() {
    let mut session = session_with(vec![
        boxed(10.0, 10.0, 20.0, 20.0, "a"),
        boxed(100.0, 40.0, 20.0, 20.0, "b"),
    ]);
    session.select_all();

    assert!(session.align_selected(Alignment::Top));
    let ys: Vec<f64> = session.boxes().iter().map(|b| b.y).collect();
    assert_eq!(ys, vec![10.0, 10.0]);
    // Already aligned: nothing to commit.
    assert!(!session.align_selected(Alignment::Top));

    assert!(session.undo());
    assert_eq!(session.boxes().get(1).unwrap().y, 40.0);
}

#[test]
fn test_center_alignment_leaving_bounds_is_rejected() {
    let mut session = session_with(vec![
        boxed(0.0, 0.0, 10.0, 10.0, "a"),
        boxed(0.0, 50.0, 500.0, 10.0, "b"),
    ]);
    session.select_all();

    // The wide box would have to start left of the canvas.
    assert!(!session.align_selected(Alignment::CenterHorizontal));
    let xs: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![0.0, 0.0]);
    assert!(!session.can_undo());
}

#[test]
fn test_center_alignment_is_idempotent() {
    let mut session = session_with(vec![
        boxed(100.0, 0.0, 10.0, 10.0, "a"),
        boxed(200.0, 50.0, 300.0, 10.0, "b"),
    ]);
    session.select_all();

    assert!(session.align_selected(Alignment::CenterHorizontal));
    let xs: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![222.5, 77.5]);

    assert!(!session.align_selected(Alignment::CenterHorizontal));
    let again: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(again, xs);

    assert!(session.undo());
    assert!(!session.can_undo());
}

#[test]
fn test_align_with_empty_selection() {
    let mut session = three_boxes();
    assert!(!session.align_selected(Alignment::Left));
    assert!(!session.can_undo());
}

#[test]
fn test_distribute_selected() {
    let mut session = session_with(vec![
        boxed(0.0, 0.0, 10.0, 10.0, "a"),
        boxed(30.0, 0.0, 10.0, 10.0, "b"),
        boxed(200.0, 0.0, 10.0, 10.0, "c"),
    ]);
    session.select_all();

    assert!(session.distribute_selected(DistributeAxis::Horizontal));
    let xs: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![0.0, 100.0, 200.0]);

    session.select(0);
    assert!(!session.distribute_selected(DistributeAxis::Horizontal));
}

#[test]
fn test_distribution_leaving_bounds_is_rejected() {
    let mut session = session_with(vec![
        boxed(0.0, 0.0, 10.0, 10.0, "a"),
        boxed(10.0, 20.0, 900.0, 10.0, "b"),
        boxed(200.0, 40.0, 10.0, 10.0, "c"),
    ]);
    session.select_all();

    assert!(!session.distribute_selected(DistributeAxis::Horizontal));
    let xs: Vec<f64> = session.boxes().iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![0.0, 10.0, 200.0]);
    assert!(!session.can_undo());
}

#[test]
fn test_snap_selected_to_grid() {
    let mut session = session_with(vec![boxed(13.0, 26.0, 44.9, 5.1, "a")]);
    session.select(0);
    assert!(session.snap_selected_to_grid());
    assert_eq!(
        session.boxes().get(0).unwrap().rect(),
        Rect::new(10.0, 30.0, 40.0, 10.0)
    );
}

#[test]
fn test_merge_selected_and_undo() {
    let mut session = three_boxes();
    let originals = session.boxes().to_records();

    session.select_all();
    click(&mut session, 310.0, 310.0, Modifiers::shift());
    assert_eq!(session.selection().selected(), &[0, 1]);

    assert!(session.merge_selected());
    assert_eq!(session.boxes().len(), 2);
    assert_eq!(session.boxes().get(0).unwrap().label, "c");
    let merged = session.boxes().get(1).unwrap();
    assert_eq!(merged.rect(), Rect::new(10.0, 10.0, 110.0, 20.0));
    assert_eq!(merged.label, "a");
    assert_eq!(session.selection().selected(), &[1]);

    assert!(session.undo());
    assert_eq!(session.boxes().as_slice(), originals.as_slice());
}

#[test]
fn test_merge_needs_two_boxes() {
    let mut session = three_boxes();
    session.select(0);
    assert!(!session.merge_selected());
    assert_eq!(session.boxes().len(), 3);
}

#[test]
fn test_overlap_groups() {
    let mut session = session_with(vec![
        boxed(0.0, 0.0, 50.0, 50.0, "a"),
        boxed(200.0, 0.0, 50.0, 50.0, "b"),
        boxed(40.0, 40.0, 50.0, 50.0, "c"),
    ]);
    assert_eq!(session.overlap_groups(), vec![vec![0, 2], vec![1]]);

    assert!(session.select_overlap_group(2));
    assert_eq!(session.selection().selected(), &[0, 2]);
    assert!(!session.select_overlap_group(9));
}

#[test]
fn test_set_context_rederives_times() {
    let mut session = session_with(vec![boxed(96.0, 0.0, 96.0, 195.0, "a")]);
    session.set_context(DomainContext::new(20.0, 20_000.0, Default::default()));
    let b = session.boxes().get(0).unwrap();
    assert!((b.start_time - 2.0).abs() < 1e-9);
    assert!((b.end_time - 4.0).abs() < 1e-9);
    assert!(!session.can_undo());
}

#[test]
fn test_set_context_drops_boxes_without_time_range() {
    let mut session = session_with(vec![boxed(96.0, 0.0, 96.0, 195.0, "a")]);
    session.select(0);

    // With no duration every box spans zero seconds.
    session.set_context(DomainContext::new(0.0, 20_000.0, Default::default()));
    assert!(session.boxes().is_empty());
    assert!(session.selection().is_empty());
}

// Queue

#[test]
fn test_input_queue_applies_in_order() {
    let mut session = EditorSession::default();
    session.set_mode(EditorMode::Draw);

    let mut queue = InputQueue::new();
    queue.push(PointerEvent::down(10.0, 10.0));
    queue.push(PointerEvent::moved(30.0, 30.0));
    queue.push(PointerEvent::up(60.0, 60.0));
    assert_eq!(queue.len(), 3);

    assert!(queue.flush(&mut session));
    assert!(queue.is_empty());
    assert_eq!(session.boxes().len(), 1);

    queue.push(PointerEvent::down(100.0, 100.0));
    queue.push(PointerEvent::moved(150.0, 150.0));
    queue.push(KeyEvent::new(Key::Escape));
    queue.push(PointerEvent::up(150.0, 150.0));
    queue.flush(&mut session);
    assert_eq!(session.boxes().len(), 1);

    assert!(!queue.flush(&mut session));
}
