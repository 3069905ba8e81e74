use eframe_mapmaker::element::factory;
use eframe_mapmaker::{
    Document, Element, ElementKind, ElementType, GestureOutcome, GestureState, IgnoreReason, InputEvent,
    InteractionController, RenderSurface, ToolSettings,
};
use egui::{Color32, Pos2, pos2};

/// Render surface that remembers what it was asked to paint
#[derive(Default)]
struct RecordingSurface {
    renders: usize,
    last: Vec<ElementType>,
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, elements: &[ElementType]) {
        self.renders += 1;
        self.last = elements.to_vec();
    }
}

fn setup() -> (InteractionController, RecordingSurface) {
    (InteractionController::new(ToolSettings::default()), RecordingSurface::default())
}

fn drag(
    controller: &mut InteractionController,
    surface: &mut RecordingSurface,
    from: Pos2,
    to: Pos2,
) -> GestureOutcome {
    controller.pointer_down(from, surface);
    controller.pointer_move(to, surface);
    controller.pointer_up(to, surface)
}

fn kinds(controller: &InteractionController) -> Vec<ElementKind> {
    controller.document().elements().iter().map(|e| e.kind()).collect()
}

#[test]
fn test_box_drag_commits_region() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Forest), &mut surface);

    let outcome = drag(&mut controller, &mut surface, pos2(100.0, 80.0), pos2(40.0, 20.0));

    assert_eq!(outcome, GestureOutcome::Committed);
    assert_eq!(kinds(&controller), vec![ElementKind::Forest]);
    let rect = controller.document().elements()[0].rect();
    assert_eq!(rect.min, pos2(40.0, 20.0));
    assert_eq!(rect.max, pos2(100.0, 80.0));
    assert_eq!(controller.history().len(), 2);
    assert_eq!(surface.renders, 1);
    assert_eq!(surface.last.len(), 1);
    assert!(controller.state().is_idle());
}

#[test]
fn test_small_box_is_ignored() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Lake), &mut surface);

    // Exactly the minimum size is still too small
    let outcome = drag(&mut controller, &mut surface, pos2(10.0, 10.0), pos2(15.0, 40.0));
    assert_eq!(outcome, GestureOutcome::Ignored(IgnoreReason::TooSmall));

    let outcome = drag(&mut controller, &mut surface, pos2(10.0, 10.0), pos2(50.0, 13.0));
    assert_eq!(outcome, GestureOutcome::Ignored(IgnoreReason::TooSmall));

    assert!(controller.document().is_empty());
    assert_eq!(controller.history().len(), 1);
    assert_eq!(surface.renders, 0);
}

#[test]
fn test_city_is_placed_at_press_position() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::City), &mut surface);

    let outcome = drag(&mut controller, &mut surface, pos2(30.0, 30.0), pos2(200.0, 200.0));

    assert_eq!(outcome, GestureOutcome::Committed);
    let city = &controller.document().elements()[0];
    assert_eq!(city.kind(), ElementKind::City);
    assert_eq!(city.rect().center(), pos2(30.0, 30.0));
    assert_eq!(city.color(), ElementKind::City.default_color());
}

#[test]
fn test_river_grows_and_commits_once() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::River), &mut surface);

    assert_eq!(controller.pointer_down(pos2(0.0, 0.0), &mut surface), GestureOutcome::Updated);
    assert!(matches!(controller.state(), GestureState::DrawingPolyline { .. }));
    for i in 1..=3 {
        controller.pointer_move(pos2(i as f32 * 10.0, 5.0), &mut surface);
    }
    assert_eq!(controller.history().len(), 1);

    assert_eq!(controller.pointer_up(pos2(30.0, 5.0), &mut surface), GestureOutcome::Committed);
    assert_eq!(controller.history().len(), 2);

    match &controller.document().elements()[0] {
        ElementType::River(river) => assert_eq!(river.points().len(), 4),
        other => panic!("Expected river, got {:?}", other.kind()),
    }
    // Press, three moves and the commit
    assert_eq!(surface.renders, 5);
}

#[test]
fn test_single_point_river_is_kept() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::River), &mut surface);

    controller.pointer_down(pos2(5.0, 5.0), &mut surface);
    assert_eq!(controller.pointer_up(pos2(5.0, 5.0), &mut surface), GestureOutcome::Committed);

    let river = &controller.document().elements()[0];
    assert_eq!(river.kind(), ElementKind::River);
    assert!(!river.is_drawable());
}

#[test]
fn test_leave_finishes_river() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::River), &mut surface);

    controller.pointer_down(pos2(0.0, 0.0), &mut surface);
    controller.pointer_move(pos2(10.0, 10.0), &mut surface);

    assert_eq!(controller.pointer_leave(&mut surface), GestureOutcome::Committed);
    assert!(controller.state().is_idle());
    assert_eq!(controller.history().len(), 2);

    // Returning to the canvas does not reopen the river
    assert_eq!(
        controller.pointer_move(pos2(20.0, 20.0), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::NoGesture)
    );
}

#[test]
fn test_leave_drops_box_drag() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Desert), &mut surface);

    controller.pointer_down(pos2(0.0, 0.0), &mut surface);
    controller.pointer_move(pos2(100.0, 100.0), &mut surface);
    assert_eq!(
        controller.pointer_leave(&mut surface),
        GestureOutcome::Ignored(IgnoreReason::Cancelled)
    );

    assert_eq!(
        controller.pointer_up(pos2(100.0, 100.0), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::NoGesture)
    );
    assert!(controller.document().is_empty());
    assert_eq!(controller.history().len(), 1);
}

#[test]
fn test_text_waits_for_submission() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Text), &mut surface);

    let anchor = pos2(50.0, 60.0);
    assert_eq!(
        controller.pointer_down(anchor, &mut surface),
        GestureOutcome::TextRequested { anchor }
    );
    assert_eq!(controller.state(), &GestureState::AwaitingText { anchor });

    // Other pointer input is refused while the prompt is open
    assert_eq!(
        controller.pointer_down(pos2(0.0, 0.0), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::Busy)
    );
    assert_eq!(
        controller.pointer_up(pos2(0.0, 0.0), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::Busy)
    );

    assert_eq!(controller.submit_text(Some("Amazonas"), &mut surface), GestureOutcome::Committed);
    assert_eq!(kinds(&controller), vec![ElementKind::Text]);
    assert!(controller.state().is_idle());
}

#[test]
fn test_empty_or_cancelled_text_adds_nothing() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Text), &mut surface);

    controller.pointer_down(pos2(1.0, 1.0), &mut surface);
    assert_eq!(
        controller.submit_text(Some(""), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::EmptyText)
    );

    controller.pointer_down(pos2(1.0, 1.0), &mut surface);
    assert_eq!(
        controller.submit_text(None, &mut surface),
        GestureOutcome::Ignored(IgnoreReason::EmptyText)
    );

    assert!(controller.document().is_empty());
    assert_eq!(controller.history().len(), 1);
    assert_eq!(
        controller.submit_text(Some("late"), &mut surface),
        GestureOutcome::Ignored(IgnoreReason::NoGesture)
    );
}

#[test]
fn test_undo_redo_republish_snapshots() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Mountain), &mut surface);
    drag(&mut controller, &mut surface, pos2(0.0, 0.0), pos2(50.0, 50.0));
    controller.select_tool(Some(ElementKind::Lake), &mut surface);
    drag(&mut controller, &mut surface, pos2(60.0, 0.0), pos2(120.0, 50.0));

    assert_eq!(controller.undo(&mut surface), GestureOutcome::Restored);
    assert_eq!(kinds(&controller), vec![ElementKind::Mountain]);
    assert_eq!(surface.last.len(), 1);

    assert_eq!(controller.undo(&mut surface), GestureOutcome::Restored);
    assert!(controller.document().is_empty());
    assert_eq!(
        controller.undo(&mut surface),
        GestureOutcome::Ignored(IgnoreReason::NothingToUndo)
    );

    assert_eq!(controller.redo(&mut surface), GestureOutcome::Restored);
    assert_eq!(controller.redo(&mut surface), GestureOutcome::Restored);
    assert_eq!(kinds(&controller), vec![ElementKind::Mountain, ElementKind::Lake]);
    assert_eq!(
        controller.redo(&mut surface),
        GestureOutcome::Ignored(IgnoreReason::NothingToRedo)
    );
}

#[test]
fn test_new_commit_after_undo_drops_redo() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Mountain), &mut surface);
    drag(&mut controller, &mut surface, pos2(0.0, 0.0), pos2(50.0, 50.0));
    controller.undo(&mut surface);

    controller.select_tool(Some(ElementKind::Lake), &mut surface);
    drag(&mut controller, &mut surface, pos2(0.0, 0.0), pos2(50.0, 50.0));

    assert!(!controller.can_redo());
    assert_eq!(controller.history().len(), 2);
    assert_eq!(kinds(&controller), vec![ElementKind::Lake]);
}

#[test]
fn test_undo_finishes_river_first() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::River), &mut surface);
    controller.pointer_down(pos2(0.0, 0.0), &mut surface);
    controller.pointer_move(pos2(10.0, 0.0), &mut surface);

    // The river is committed and then immediately undone
    assert_eq!(controller.undo(&mut surface), GestureOutcome::Restored);
    assert!(controller.document().is_empty());
    assert!(controller.can_redo());
}

#[test]
fn test_switching_tool_mid_river_commits_it() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::River), &mut surface);
    controller.pointer_down(pos2(0.0, 0.0), &mut surface);
    controller.pointer_move(pos2(10.0, 0.0), &mut surface);

    assert_eq!(
        controller.select_tool(Some(ElementKind::City), &mut surface),
        GestureOutcome::Committed
    );
    assert_eq!(controller.tool(), Some(ElementKind::City));
    assert_eq!(controller.history().len(), 2);
}

#[test]
fn test_select_and_delete() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::Forest), &mut surface);
    drag(&mut controller, &mut surface, pos2(0.0, 0.0), pos2(40.0, 40.0));
    controller.select_tool(None, &mut surface);

    let forest_id = controller.document().elements()[0].id();
    assert_eq!(
        controller.pointer_down(pos2(20.0, 20.0), &mut surface),
        GestureOutcome::Selected(Some(forest_id))
    );
    controller.pointer_up(pos2(20.0, 20.0), &mut surface);

    assert_eq!(controller.delete_selected(&mut surface), GestureOutcome::Committed);
    assert!(controller.document().is_empty());
    assert_eq!(controller.selected(), None);
    assert_eq!(
        controller.delete_selected(&mut surface),
        GestureOutcome::Ignored(IgnoreReason::NothingSelected)
    );

    assert_eq!(controller.undo(&mut surface), GestureOutcome::Restored);
    assert_eq!(kinds(&controller), vec![ElementKind::Forest]);
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let (mut controller, mut surface) = setup();
    assert_eq!(
        controller.pointer_down(pos2(20.0, 20.0), &mut surface),
        GestureOutcome::Selected(None)
    );
}

#[test]
fn test_clear_is_undoable() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::City), &mut surface);
    drag(&mut controller, &mut surface, pos2(5.0, 5.0), pos2(5.0, 5.0));

    assert_eq!(controller.clear(&mut surface), GestureOutcome::Committed);
    assert!(controller.document().is_empty());
    assert!(surface.last.is_empty());

    controller.undo(&mut surface);
    assert_eq!(kinds(&controller), vec![ElementKind::City]);
}

#[test]
fn test_new_map_resets_history() {
    let (mut controller, mut surface) = setup();
    controller.select_tool(Some(ElementKind::City), &mut surface);
    drag(&mut controller, &mut surface, pos2(5.0, 5.0), pos2(5.0, 5.0));

    assert_eq!(controller.new_map(&mut surface), GestureOutcome::Restored);
    assert!(controller.document().is_empty());
    assert_eq!(controller.history().len(), 1);
    assert!(!controller.can_undo());
}

#[test]
fn test_loaded_map_can_be_undone_to_empty() {
    let (mut controller, mut surface) = setup();
    let document = Document::from_elements(vec![
        factory::create_city(pos2(1.0, 1.0), 5.0, Color32::RED),
        factory::create_text(pos2(10.0, 40.0), "Lima", 16.0, Color32::BLACK),
    ]);

    assert_eq!(controller.load_document(document, &mut surface), GestureOutcome::Committed);
    assert_eq!(controller.history().len(), 2);
    assert_eq!(surface.last.len(), 2);

    controller.undo(&mut surface);
    assert!(controller.document().is_empty());
}

#[test]
fn test_history_limit_is_honoured() {
    let history = eframe_mapmaker::History::with_limit(3);
    let mut controller = InteractionController::with_history(ToolSettings::default(), history);
    let mut surface = RecordingSurface::default();
    controller.select_tool(Some(ElementKind::City), &mut surface);

    for i in 0..5 {
        let pos = pos2(i as f32 * 20.0, 10.0);
        drag(&mut controller, &mut surface, pos, pos);
    }

    assert_eq!(controller.history().len(), 3);
    assert!(controller.undo(&mut surface) == GestureOutcome::Restored);
    assert!(controller.undo(&mut surface) == GestureOutcome::Restored);
    assert_eq!(
        controller.undo(&mut surface),
        GestureOutcome::Ignored(IgnoreReason::NothingToUndo)
    );
    assert_eq!(controller.document().len(), 3);
}

#[test]
fn test_events_are_dispatched() {
    let (mut controller, mut surface) = setup();
    let events = [
        InputEvent::SelectTool(Some(ElementKind::Mountain)),
        InputEvent::PointerDown { pos: pos2(0.0, 0.0) },
        InputEvent::PointerMove { pos: pos2(30.0, 30.0) },
        InputEvent::PointerUp { pos: pos2(30.0, 30.0) },
    ];
    let outcomes: Vec<GestureOutcome> = events
        .into_iter()
        .map(|event| controller.handle_event(event, &mut surface))
        .collect();

    assert_eq!(outcomes.last(), Some(&GestureOutcome::Committed));
    assert_eq!(kinds(&controller), vec![ElementKind::Mountain]);
}

#[test]
fn test_custom_colors_apply_to_new_elements() {
    let mut settings = ToolSettings::default();
    settings.set_color(ElementKind::Desert, Color32::KHAKI);
    let mut controller = InteractionController::new(settings);
    let mut surface = RecordingSurface::default();

    controller.select_tool(Some(ElementKind::Desert), &mut surface);
    drag(&mut controller, &mut surface, pos2(0.0, 0.0), pos2(30.0, 30.0));

    assert_eq!(controller.document().elements()[0].color(), Color32::KHAKI);
}

#[test]
fn test_delete_removes_the_clicked_twin() {
    let city = factory::create_city(pos2(10.0, 10.0), 5.0, Color32::RED);
    let mut twin = serde_json::to_value(&city).unwrap();
    twin["center"] = serde_json::json!({ "x": 50.0, "y": 50.0 });
    let bytes = serde_json::to_vec(&serde_json::json!([city, twin])).unwrap();
    let document = eframe_mapmaker::persistence::deserialize(&bytes).unwrap();

    let (mut controller, mut surface) = setup();
    controller.load_document(document, &mut surface);
    controller.pointer_down(pos2(50.0, 50.0), &mut surface);
    controller.pointer_up(pos2(50.0, 50.0), &mut surface);
    assert_eq!(controller.delete_selected(&mut surface), GestureOutcome::Committed);

    let remaining = controller.document().elements();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].rect().center(), pos2(10.0, 10.0));
}
