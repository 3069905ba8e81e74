#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod tools;
pub mod util;

pub use app::MapApp;
pub use config::{EditorConfig, MapTemplate};
pub use document::{Document, Snapshot};
pub use element::{Element, ElementId, ElementKind, ElementType};
pub use error::{MapError, MapResult};
pub use history::History;
pub use input::{GestureOutcome, GestureState, IgnoreReason, InputEvent, InteractionController};
pub use renderer::{EguiRenderer, MapFrame, RasterSurface, RenderSurface};
pub use tools::ToolSettings;
