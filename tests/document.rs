use eframe_mapmaker::element::factory;
use eframe_mapmaker::{Document, Element, ElementId, ElementKind, ElementType};
use egui::{Color32, Pos2, Rect, Vec2, pos2};

fn mountain(x: f32) -> ElementType {
    let rect = Rect::from_min_size(pos2(x, 0.0), Vec2::splat(50.0));
    factory::create_region(ElementKind::Mountain, rect, Color32::BROWN).unwrap()
}

#[test]
fn test_append_preserves_order() {
    let mut document = Document::new();
    let first = mountain(0.0);
    let second = factory::create_city(pos2(10.0, 10.0), 5.0, Color32::RED);
    let ids = [first.id(), second.id()];

    document.append(first);
    document.append(second);

    let stored: Vec<ElementId> = document.elements().iter().map(|e| e.id()).collect();
    assert_eq!(stored, ids);
    assert!(document.is_dirty());
}

#[test]
fn test_snapshot_is_independent_of_later_edits() {
    let mut document = Document::new();
    let river = factory::create_river(pos2(0.0, 0.0), 3.0, Color32::BLUE);
    let river_id = river.id();
    document.append(river);

    let snapshot = document.snapshot();

    document
        .get_mut(river_id)
        .and_then(|e| e.as_river_mut())
        .unwrap()
        .add_point(pos2(20.0, 20.0));
    document.append(mountain(100.0));

    assert_eq!(snapshot.len(), 1);
    match &snapshot.elements()[0] {
        ElementType::River(river) => assert_eq!(river.points().len(), 1),
        other => panic!("Expected river, got {:?}", other.kind()),
    }
}

#[test]
fn test_restore_replaces_contents() {
    let mut document = Document::new();
    document.append(mountain(0.0));
    let snapshot = document.snapshot();

    document.clear();
    document.append(mountain(200.0));
    document.append(mountain(300.0));
    document.take_dirty();

    document.restore(&snapshot);
    assert_eq!(document.len(), 1);
    assert_eq!(document.elements(), snapshot.elements());
    assert!(document.take_dirty());
    assert!(!document.is_dirty());
}

#[test]
fn test_remove_selected_unknown_id_is_noop() {
    let mut document = Document::new();
    document.append(mountain(0.0));
    document.take_dirty();

    assert!(document.remove_selected(ElementId::new()).is_none());
    assert_eq!(document.len(), 1);
    assert!(!document.is_dirty());
}

#[test]
fn test_remove_selected_keeps_remaining_order() {
    let mut document = Document::new();
    let elements: Vec<ElementType> = (0..3).map(|i| mountain(i as f32 * 60.0)).collect();
    let ids: Vec<ElementId> = elements.iter().map(|e| e.id()).collect();
    for element in elements {
        document.append(element);
    }

    let removed = document.remove_selected(ids[1]).unwrap();
    assert_eq!(removed.id(), ids[1]);

    let remaining: Vec<ElementId> = document.elements().iter().map(|e| e.id()).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

#[test]
fn test_element_at_prefers_topmost() {
    let mut document = Document::new();
    let below = mountain(0.0);
    let above = mountain(25.0);
    let above_id = above.id();
    document.append(below);
    document.append(above);

    assert_eq!(document.element_at(pos2(30.0, 10.0)).map(|e| e.id()), Some(above_id));
    assert!(document.element_at(Pos2::new(500.0, 500.0)).is_none());
}

#[test]
fn test_from_elements_starts_dirty() {
    let document = Document::from_elements(vec![mountain(0.0)]);
    assert_eq!(document.len(), 1);
    assert!(document.is_dirty());
}

/// Two copies of one city sharing an id, at different positions
fn cities_sharing_an_id() -> Vec<ElementType> {
    let city = factory::create_city(pos2(10.0, 10.0), 5.0, Color32::RED);
    let mut json = serde_json::to_value(&city).unwrap();
    json["center"] = serde_json::json!({ "x": 50.0, "y": 50.0 });
    let twin: ElementType = serde_json::from_value(json).unwrap();
    assert_eq!(twin.id(), city.id());
    vec![city, twin]
}

#[test]
fn test_from_elements_makes_ids_unique() {
    let elements = cities_sharing_an_id();
    let original_id = elements[0].id();
    let document = Document::from_elements(elements);

    let ids: Vec<ElementId> = document.elements().iter().map(|e| e.id()).collect();
    assert_eq!(ids[0], original_id);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(document.elements()[1].rect().center(), pos2(50.0, 50.0));
}

#[test]
fn test_deserialized_document_has_unique_ids() {
    let json = serde_json::to_string(&cities_sharing_an_id()).unwrap();
    let document: Document = serde_json::from_str(&json).unwrap();

    assert_eq!(document.len(), 2);
    assert_ne!(document.elements()[0].id(), document.elements()[1].id());
}
