use egui::{Pos2, Rect};

use super::InputEvent;
use crate::document::Document;
use crate::element::{Element, ElementId, ElementKind, exceeds_min_size, factory};
use crate::history::History;
use crate::renderer::RenderSurface;
use crate::tools::{GestureStyle, ToolSettings};

/// Where the controller is within a pointer gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Box or point tool pressed; nothing is added until release
    Dragging {
        kind: ElementKind,
        anchor: Pos2,
        current: Pos2,
    },
    /// A river is being extended by pointer moves
    DrawingPolyline { river: ElementId },
    /// Text tool clicked; waiting for [`InteractionController::submit_text`]
    AwaitingText { anchor: Pos2 },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging { .. } => "Dragging",
            Self::DrawingPolyline { .. } => "DrawingPolyline",
            Self::AwaitingText { .. } => "AwaitingText",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Why an input changed nothing. None of these are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another gesture is still in progress
    Busy,
    /// Pointer event with no gesture to apply it to
    NoGesture,
    /// Box smaller than the minimum gesture size
    TooSmall,
    /// Gesture abandoned, e.g. by leaving the canvas mid-drag
    Cancelled,
    /// Text prompt dismissed or answered with nothing
    EmptyText,
    NothingToUndo,
    NothingToRedo,
    NothingSelected,
}

/// Result of feeding one input into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// A history snapshot was committed
    Committed,
    /// The live document changed without a commit
    Updated,
    /// A snapshot from history was republished
    Restored,
    /// Gesture state changed; nothing to repaint
    Tracking,
    /// The selection changed
    Selected(Option<ElementId>),
    /// The host must prompt for text and call `submit_text`
    TextRequested { anchor: Pos2 },
    Ignored(IgnoreReason),
}

/// Turns pointer gestures into document edits and history commits.
///
/// Owns the document and its history. The render surface is handed in on
/// every call and repainted after each commit, restore and river point.
#[derive(Debug, Clone)]
pub struct InteractionController {
    document: Document,
    history: History,
    settings: ToolSettings,
    tool: Option<ElementKind>,
    state: GestureState,
    selected: Option<ElementId>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

impl InteractionController {
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_history(settings, History::new())
    }

    pub fn with_history(settings: ToolSettings, mut history: History) -> Self {
        history.reset();
        Self {
            document: Document::new(),
            history,
            settings,
            tool: None,
            state: GestureState::Idle,
            selected: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn tool(&self) -> Option<ElementKind> {
        self.tool
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn handle_event(&mut self, event: InputEvent, surface: &mut dyn RenderSurface) -> GestureOutcome {
        match event {
            InputEvent::PointerDown { pos } => self.pointer_down(pos, surface),
            InputEvent::PointerMove { pos } => self.pointer_move(pos, surface),
            InputEvent::PointerUp { pos } => self.pointer_up(pos, surface),
            InputEvent::PointerLeave => self.pointer_leave(surface),
            InputEvent::SelectTool(tool) => self.select_tool(tool, surface),
        }
    }

    /// Switch tools. A river in progress is finished first; other gestures are dropped.
    pub fn select_tool(&mut self, tool: Option<ElementKind>, surface: &mut dyn RenderSurface) -> GestureOutcome {
        let outcome = self.finish_pending(surface);
        if self.tool != tool {
            log::info!("Tool selected: {}", tool.map_or("none", ElementKind::name));
        }
        self.tool = tool;
        if tool.is_some() {
            self.selected = None;
        }
        outcome
    }

    pub fn pointer_down(&mut self, pos: Pos2, surface: &mut dyn RenderSurface) -> GestureOutcome {
        if !self.state.is_idle() {
            return self.ignore(IgnoreReason::Busy);
        }

        let Some(kind) = self.tool else {
            self.selected = self.document.element_at(pos).map(|e| e.id());
            return GestureOutcome::Selected(self.selected);
        };

        match GestureStyle::of(kind) {
            GestureStyle::Box | GestureStyle::Point => {
                self.state = GestureState::Dragging {
                    kind,
                    anchor: pos,
                    current: pos,
                };
                GestureOutcome::Tracking
            }
            GestureStyle::Polyline => {
                let river = factory::create_river(pos, self.settings.river_width, self.settings.color(kind));
                self.state = GestureState::DrawingPolyline { river: river.id() };
                self.document.append(river);
                self.redraw(surface);
                GestureOutcome::Updated
            }
            GestureStyle::Prompt => {
                self.state = GestureState::AwaitingText { anchor: pos };
                GestureOutcome::TextRequested { anchor: pos }
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2, surface: &mut dyn RenderSurface) -> GestureOutcome {
        match &mut self.state {
            GestureState::Dragging { current, .. } => {
                *current = pos;
                GestureOutcome::Tracking
            }
            GestureState::DrawingPolyline { river } => {
                let id = *river;
                let Some(river) = self.document.get_mut(id).and_then(|e| e.as_river_mut()) else {
                    log::warn!("River {} vanished mid-gesture", id);
                    self.state = GestureState::Idle;
                    return self.ignore(IgnoreReason::Cancelled);
                };
                river.add_point(pos);
                self.redraw(surface);
                GestureOutcome::Updated
            }
            GestureState::Idle | GestureState::AwaitingText { .. } => GestureOutcome::Ignored(IgnoreReason::NoGesture),
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2, surface: &mut dyn RenderSurface) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging { kind, anchor, .. } => self.place_dragged(kind, anchor, pos, surface),
            GestureState::DrawingPolyline { .. } => self.commit(surface),
            state @ GestureState::AwaitingText { .. } => {
                self.state = state;
                self.ignore(IgnoreReason::Busy)
            }
            GestureState::Idle => GestureOutcome::Ignored(IgnoreReason::NoGesture),
        }
    }

    /// Pointer left the canvas: rivers are finished, drags are dropped.
    pub fn pointer_leave(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        match &self.state {
            GestureState::Dragging { .. } | GestureState::DrawingPolyline { .. } => self.finish_pending(surface),
            GestureState::Idle | GestureState::AwaitingText { .. } => GestureOutcome::Ignored(IgnoreReason::NoGesture),
        }
    }

    /// Resume a text gesture with the user's answer
    pub fn submit_text(&mut self, text: Option<&str>, surface: &mut dyn RenderSurface) -> GestureOutcome {
        let GestureState::AwaitingText { anchor } = self.state else {
            return self.ignore(IgnoreReason::NoGesture);
        };
        self.state = GestureState::Idle;

        match text.filter(|t| !t.is_empty()) {
            Some(content) => {
                let kind = ElementKind::Text;
                self.document.append(factory::create_text(
                    anchor,
                    content,
                    self.settings.font_size,
                    self.settings.color(kind),
                ));
                self.commit(surface)
            }
            None => self.ignore(IgnoreReason::EmptyText),
        }
    }

    pub fn undo(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.finish_pending(surface);
        match self.history.undo() {
            Some(snapshot) => {
                log::debug!("Undo to snapshot {:?}", self.history.cursor());
                self.document.restore(&snapshot);
                self.redraw(surface);
                GestureOutcome::Restored
            }
            None => self.ignore(IgnoreReason::NothingToUndo),
        }
    }

    pub fn redo(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.finish_pending(surface);
        match self.history.redo() {
            Some(snapshot) => {
                log::debug!("Redo to snapshot {:?}", self.history.cursor());
                self.document.restore(&snapshot);
                self.redraw(surface);
                GestureOutcome::Restored
            }
            None => self.ignore(IgnoreReason::NothingToRedo),
        }
    }

    pub fn delete_selected(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        let removed = self
            .selected
            .take()
            .and_then(|id| self.document.remove_selected(id));
        match removed {
            Some(element) => {
                log::info!("Deleted {} {}", element.kind(), element.id());
                self.commit(surface)
            }
            None => self.ignore(IgnoreReason::NothingSelected),
        }
    }

    /// Remove every element, as one undoable step
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.cancel_pending();
        self.selected = None;
        self.document.clear();
        self.commit(surface)
    }

    /// Empty document and a fresh history
    pub fn new_map(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.cancel_pending();
        self.selected = None;
        self.document.clear();
        self.history.reset();
        self.redraw(surface);
        GestureOutcome::Restored
    }

    /// Replace the map with a loaded one. Undo leads back to an empty map.
    pub fn load_document(&mut self, document: Document, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.cancel_pending();
        self.selected = None;
        self.document = document;
        self.history.reset();
        self.commit(surface)
    }

    /// Repaint the current document without changing anything
    pub fn redraw(&mut self, surface: &mut dyn RenderSurface) {
        self.document.take_dirty();
        surface.render(self.document.elements());
    }

    fn place_dragged(
        &mut self,
        kind: ElementKind,
        anchor: Pos2,
        release: Pos2,
        surface: &mut dyn RenderSurface,
    ) -> GestureOutcome {
        let color = self.settings.color(kind);
        let element = if kind == ElementKind::City {
            Some(factory::create_city(anchor, self.settings.city_radius, color))
        } else {
            let rect = Rect::from_two_pos(anchor, release);
            if !exceeds_min_size(&rect, self.settings.min_gesture_size) {
                return self.ignore(IgnoreReason::TooSmall);
            }
            factory::create_region(kind, rect, color)
        };

        match element {
            Some(element) => {
                self.document.append(element);
                self.commit(surface)
            }
            None => self.ignore(IgnoreReason::NoGesture),
        }
    }

    /// End whatever gesture is in progress: rivers are committed, anything else dropped
    fn finish_pending(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::DrawingPolyline { .. } => self.commit(surface),
            GestureState::Idle => GestureOutcome::Ignored(IgnoreReason::NoGesture),
            GestureState::Dragging { .. } | GestureState::AwaitingText { .. } => {
                self.ignore(IgnoreReason::Cancelled)
            }
        }
    }

    /// Drop the gesture in progress without committing. Used before wholesale replacements.
    fn cancel_pending(&mut self) {
        let state = std::mem::take(&mut self.state);
        if !state.is_idle() {
            log::debug!("Cancelled {} gesture", state.name());
        }
    }

    fn commit(&mut self, surface: &mut dyn RenderSurface) -> GestureOutcome {
        self.history.commit(self.document.snapshot());
        self.redraw(surface);
        GestureOutcome::Committed
    }

    fn ignore(&self, reason: IgnoreReason) -> GestureOutcome {
        log::debug!("Ignored input in {} state: {:?}", self.state.name(), reason);
        GestureOutcome::Ignored(reason)
    }
}
