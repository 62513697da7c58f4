use specmark_core::{Error, ValidationError};
use specmark_editor::model::{BoundingBox, DomainContext, Rect};
use specmark_editor::serialization::AnnotationDocument;
use specmark_editor::{EditorMode, EditorSession, PointerEvent};
use specmark_settings::PersistenceSettings;
use tempfile::TempDir;

fn records() -> Vec<BoundingBox> {
    let ctx = DomainContext::default();
    vec![
        BoundingBox::from_rect(Rect::new(96.0, 0.0, 192.0, 195.0), &ctx).with_label("call"),
        BoundingBox::from_rect(Rect::new(480.0, 100.0, 96.0, 50.0), &ctx).with_label("song"),
    ]
}

fn assert_same_boxes(actual: &[BoundingBox], expected: &[BoundingBox]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a.rect(), e.rect());
        assert_eq!(a.label, e.label);
        assert!((a.start_time - e.start_time).abs() < 1e-9);
        assert!((a.end_time - e.end_time).abs() < 1e-9);
    }
}

#[test]
fn test_session_save_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.json");

    let mut session = EditorSession::default();
    session.load_boxes(records()).unwrap();
    session.save_to_file(&path).unwrap();

    let document = AnnotationDocument::load_from_file(&path, &PersistenceSettings::default()).unwrap();
    assert!(document.saved_at.is_some());
    assert_eq!(document.version, "1.0");
    assert_same_boxes(&document.bounding_boxes, &records());

    let mut reloaded = EditorSession::default();
    reloaded.load_from_file(&path).unwrap();
    assert_same_boxes(reloaded.boxes().as_slice(), session.boxes().as_slice());
    assert!(!reloaded.is_modified());
}

#[test]
fn test_recording_id_survives_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.json");

    let mut document = AnnotationDocument::new(records()).with_recording_id(42);
    document
        .save_to_file(&path, &PersistenceSettings::default())
        .unwrap();

    let mut session = EditorSession::default();
    session.load_from_file(&path).unwrap();
    assert_eq!(session.recording_id(), Some(42));
    assert_eq!(session.to_document().recording_id, Some(42));
}

#[test]
fn test_invalid_record_rejected_with_index() {
    let mut boxes = records();
    boxes[1].width = 0.0;
    let json = AnnotationDocument::new(boxes).to_json().unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, json).unwrap();

    let mut session = EditorSession::default();
    session.load_boxes(records()).unwrap();
    let err = session.load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { index: 1, .. }));
    assert!(err.is_geometry_error());
    // Rejected loads leave the session as it was.
    assert_eq!(session.boxes().len(), 2);
}

#[test]
fn test_record_limits_rejected_with_index() {
    let mut boxes = records();
    boxes[0].label = "   ".to_string();
    let document = AnnotationDocument::new(boxes);

    let err = document
        .validate(&PersistenceSettings::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation {
            index: 0,
            source: ValidationError::EmptyLabel
        }
    ));
}

#[test]
fn test_save_refuses_invalid_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    let mut boxes = records();
    boxes[0].end_time = 7200.0;
    let mut document = AnnotationDocument::new(boxes);

    assert!(document
        .save_to_file(&path, &PersistenceSettings::default())
        .is_err());
    assert!(document.saved_at.is_none());
    assert!(!path.exists());
}

#[test]
fn test_legacy_field_names_and_defaults() {
    let json = r#"{
        "bounding_boxes": [
            {
                "x": 10.0, "y": 20.0, "width": 30.0, "height": 40.0,
                "start_time": 0.1, "end_time": 0.4,
                "extra_metadata": {"source": "import"}
            }
        ]
    }"#;
    let document = AnnotationDocument::from_json(json).unwrap();
    assert_eq!(document.version, "1.0");
    let record = &document.bounding_boxes[0];
    assert_eq!(record.label, "None");
    assert_eq!(
        record.metadata.as_ref().and_then(|m| m.get("source")),
        Some(&serde_json::json!("import"))
    );
}

#[test]
fn test_pending_changes_track_edits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.json");

    let mut session = EditorSession::default();
    session.load_boxes(records()).unwrap();
    assert!(session.pending_changes().is_empty());

    session.set_mode(EditorMode::Draw);
    session.handle_event(PointerEvent::down(700.0, 10.0));
    session.handle_event(PointerEvent::up(800.0, 60.0));

    let changes = session.pending_changes();
    assert_eq!(changes.added.len(), 1);
    assert_eq!(changes.added[0].0, 2);
    assert_eq!(changes.change_count(), 1);

    session.select(0);
    assert!(session.delete_selected());
    let changes = session.pending_changes();
    // Index-based: everything shifted down by one.
    assert_eq!(changes.modified.len(), 2);
    assert!(changes.added.is_empty());
    assert!(changes.removed.is_empty());

    session.save_to_file(&path).unwrap();
    assert!(!session.is_modified());
}
