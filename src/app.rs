use eframe::egui;

use crate::config::EditorConfig;
use crate::element::ElementKind;
use crate::error::{MapError, MapResult};
use crate::export;
use crate::history::History;
use crate::input::{GestureOutcome, GestureState, InputHandler, InteractionController};
use crate::panels;
use crate::persistence::{self, MapFile};
use crate::renderer::{EguiRenderer, RenderSurface};
use crate::tools::ToolSettings;

/// Text gesture waiting for the user to type the label
#[derive(Debug, Clone)]
struct TextPrompt {
    anchor: egui::Pos2,
    buffer: String,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct MapApp {
    config: EditorConfig,
    /// Map contents at the last shutdown; only read on startup
    map: Option<MapFile>,
    file_name: String,

    #[serde(skip)]
    controller: InteractionController,
    // Skip serializing the renderer, it is rebuilt from the config
    #[serde(skip)]
    renderer: Option<EguiRenderer>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    text_prompt: Option<TextPrompt>,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for MapApp {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            map: None,
            file_name: persistence::default_file_name("json"),
            controller: InteractionController::default(),
            renderer: None,
            input: InputHandler::new(),
            text_prompt: None,
            status: None,
        }
    }
}

impl MapApp {
    /// Called once before the first frame.
    ///
    /// Restores the previous session, then applies `config` on top if given.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<EditorConfig>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if let Some(config) = config {
            app.config = config;
        }
        app.rebuild();
        app
    }

    /// Recreate controller and renderer from the config, loading the stored map
    fn rebuild(&mut self) {
        let history = History::with_limit(self.config.history_limit);
        self.controller = InteractionController::with_history(self.config.tools.clone(), history);

        let mut renderer = EguiRenderer::new(self.config.map_frame());
        match self.map.take() {
            Some(map) => {
                self.controller.load_document(map.into_document(), &mut renderer);
            }
            None => self.controller.redraw(&mut renderer),
        }
        self.renderer = Some(renderer);
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn file_name_mut(&mut self) -> &mut String {
        &mut self.file_name
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        self.config.template.size()
    }

    /// Run a controller operation against the live canvas surface
    fn apply(
        &mut self,
        op: impl FnOnce(&mut InteractionController, &mut dyn RenderSurface) -> GestureOutcome,
    ) -> GestureOutcome {
        let surface: &mut dyn RenderSurface = self
            .renderer
            .get_or_insert_with(|| EguiRenderer::new(self.config.map_frame()));
        let outcome = op(&mut self.controller, surface);

        if let GestureOutcome::TextRequested { anchor } = outcome {
            self.text_prompt = Some(TextPrompt {
                anchor,
                buffer: String::new(),
            });
        }
        outcome
    }

    pub fn select_tool(&mut self, tool: Option<ElementKind>) {
        self.text_prompt = None;
        self.apply(|c, s| c.select_tool(tool, s));
    }

    pub fn undo(&mut self) {
        self.text_prompt = None;
        self.apply(|c, s| c.undo(s));
    }

    pub fn redo(&mut self) {
        self.text_prompt = None;
        self.apply(|c, s| c.redo(s));
    }

    pub fn delete_selected(&mut self) {
        self.apply(|c, s| c.delete_selected(s));
    }

    pub fn clear(&mut self) {
        self.text_prompt = None;
        self.apply(|c, s| c.clear(s));
    }

    pub fn new_map(&mut self) {
        self.text_prompt = None;
        self.apply(|c, s| c.new_map(s));
        self.file_name = persistence::default_file_name("json");
    }

    pub fn set_tool_settings(&mut self, settings: ToolSettings) {
        self.config.tools = settings.clone();
        *self.controller.settings_mut() = settings;
    }

    /// Apply title, template or legend changes to the canvas
    pub fn set_frame_config(&mut self, config: EditorConfig) {
        self.config = config;
        if let Some(renderer) = &mut self.renderer {
            renderer.set_frame(self.config.map_frame());
        }
    }

    pub fn save_map(&mut self) {
        let path = self.file_path();
        let file = MapFile::new(self.controller.document())
            .with_frame(self.config.template, self.config.title.clone());
        let result = persistence::save_map(&path, &file)
            .map(|()| format!("Saved {}", path.display()))
            .map_err(MapError::from);
        self.report(result);
    }

    pub fn load_map(&mut self) {
        let path = self.file_path();
        let file = match persistence::load_map(&path) {
            Ok(file) => file,
            Err(err) => return self.report(Err(err.into())),
        };

        let mut config = self.config.clone();
        if let Some(template) = file.template {
            config.template = template;
        }
        if let Some(title) = file.title.clone() {
            config.title = title;
        }
        self.set_frame_config(config);
        self.text_prompt = None;

        let document = file.into_document();
        self.apply(|c, s| c.load_document(document, s));
        self.report(Ok(format!("Loaded {}", path.display())));
    }

    pub fn export_png(&mut self) {
        let path = self
            .config
            .save_dir
            .join(persistence::default_file_name("png"));
        let result = export::export_png(self.controller.document(), self.config.map_frame(), &path)
            .map(|()| format!("Exported {}", path.display()))
            .map_err(MapError::from);
        self.report(result);
    }

    fn file_path(&self) -> std::path::PathBuf {
        self.config.save_dir.join(self.file_name.trim())
    }

    fn report(&mut self, result: MapResult<String>) {
        match result {
            Ok(message) => self.status = Some(message),
            Err(err) => {
                log::error!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Feed this frame's pointer input on the visible part of the canvas into the controller
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, visible: egui::Rect) {
        let blocked = self.text_prompt.is_some();
        for event in self.input.process_input(ctx, canvas_rect, visible, blocked) {
            self.apply(|c, s| c.handle_event(event, s));
        }
    }

    /// Paint the map plus any in-progress box preview
    pub fn paint_canvas(&self, painter: &egui::Painter, origin: egui::Pos2) {
        if let Some(renderer) = &self.renderer {
            renderer.paint(painter, origin, self.controller.selected());
        }

        if let GestureState::Dragging {
            kind,
            anchor,
            current,
        } = self.controller.state()
        {
            if kind.is_box() {
                let preview = egui::Rect::from_two_pos(*anchor, *current).translate(origin.to_vec2());
                painter.rect_stroke(
                    preview,
                    0.0,
                    egui::Stroke::new(1.0, self.controller.settings().color(*kind)),
                );
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.text_prompt.is_some() || ctx.wants_keyboard_input() {
            return;
        }
        let (redo, undo, delete) = ctx.input_mut(|i| {
            let redo = i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y);
            let undo = i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z);
            let delete = i.consume_key(egui::Modifiers::NONE, egui::Key::Delete);
            (redo, undo, delete)
        });

        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
        if delete {
            self.delete_selected();
        }
    }

    fn show_text_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = &mut self.text_prompt else {
            return;
        };

        let mut answer: Option<Option<String>> = None;
        egui::Window::new("Add label")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Label at ({:.0}, {:.0})", prompt.anchor.x, prompt.anchor.y));
                let edit = ui.text_edit_singleline(&mut prompt.buffer);
                let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if !entered {
                    edit.request_focus();
                }

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        answer = Some(Some(prompt.buffer.clone()));
                    }
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        answer = Some(None);
                    }
                });
            });

        if let Some(text) = answer {
            self.text_prompt = None;
            self.apply(|c, s| c.submit_text(text.as_deref(), s));
        }
    }
}

impl eframe::App for MapApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.map = Some(
            MapFile::new(self.controller.document())
                .with_frame(self.config.template, self.config.title.clone()),
        );
        eframe::set_value(storage, eframe::APP_KEY, self);
        self.map = None;
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.show_text_prompt(ctx);
    }
}
