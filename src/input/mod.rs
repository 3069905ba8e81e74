use egui::{Context, Pos2, Rect};

use crate::element::ElementKind;

mod controller;
pub use controller::{GestureOutcome, GestureState, IgnoreReason, InteractionController};

/// Input delivered to the interaction controller, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved inside the canvas
    PointerMove { pos: Pos2 },
    /// Primary button released inside the canvas
    PointerUp { pos: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
    /// A tool button was clicked; `None` puts the pointer back in select mode
    SelectTool(Option<ElementKind>),
}

/// Converts raw egui pointer input into canvas-relative [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's pointer input for a canvas occupying `canvas_rect`,
    /// of which only `visible` is on screen (the rest is scrolled away).
    ///
    /// While `blocked` (e.g. a prompt window covers the canvas) the pointer is
    /// treated as being outside.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        visible: Rect,
        blocked: bool,
    ) -> Vec<InputEvent> {
        let (hover, pressed, released) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        self.process_pointer(canvas_rect, visible, hover, pressed, released, blocked)
    }

    /// Frame-independent core of [`InputHandler::process_input`]
    pub fn process_pointer(
        &mut self,
        canvas_rect: Rect,
        visible: Rect,
        hover: Option<Pos2>,
        pressed: bool,
        released: bool,
        blocked: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = hover
            .filter(|pos| !blocked && canvas_rect.contains(*pos) && visible.contains(*pos))
            .map(|pos| pos - canvas_rect.min.to_vec2());

        match local {
            Some(pos) => {
                if pressed {
                    events.push(InputEvent::PointerDown { pos });
                }
                if self.inside && Some(pos) != self.last_pointer_pos && !pressed {
                    events.push(InputEvent::PointerMove { pos });
                }
                if released {
                    events.push(InputEvent::PointerUp { pos });
                }
                self.inside = true;
                self.last_pointer_pos = Some(pos);
            }
            None => {
                if self.inside {
                    events.push(InputEvent::PointerLeave);
                }
                self.inside = false;
                self.last_pointer_pos = None;
            }
        }

        events
    }
}
