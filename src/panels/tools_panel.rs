use eframe::egui;

use crate::MapApp;
use crate::components::tool_button::ToolButton;
use crate::config::MapTemplate;
use crate::element::ElementKind;

pub fn tools_panel(app: &mut MapApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            // Each button reports its own tool when clicked
            let active = app.controller().tool();
            let mut clicked = None;
            ui.horizontal_wrapped(|ui| {
                let tools = std::iter::once(None).chain(ElementKind::ALL.into_iter().map(Some));
                for tool in tools {
                    if let Some(tool) = ToolButton::new(tool, active == tool).show(ui) {
                        clicked = Some(tool);
                    }
                }
            });
            if let Some(tool) = clicked {
                app.select_tool(tool);
            }

            if let Some(kind) = app.controller().tool() {
                tool_options(app, ui, kind);
            }

            ui.separator();
            edit_section(app, ui);
            ui.separator();
            map_section(app, ui);
            ui.separator();
            file_section(app, ui);

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn tool_options(app: &mut MapApp, ui: &mut egui::Ui, kind: ElementKind) {
    ui.separator();
    ui.label(format!("{} options", kind.label()));

    let mut settings = app.controller().settings().clone();
    ui.horizontal(|ui| {
        ui.label("Color:");
        let mut color = settings.color(kind);
        if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
            .changed()
        {
            settings.set_color(kind, color);
        }
    });
    match kind {
        ElementKind::River => {
            ui.add(egui::Slider::new(&mut settings.river_width, 1.0..=20.0).text("Width"));
        }
        ElementKind::Text => {
            ui.add(egui::Slider::new(&mut settings.font_size, 8.0..=48.0).text("Font size"));
        }
        ElementKind::City => {
            ui.add(egui::Slider::new(&mut settings.city_radius, 2.0..=20.0).text("Radius"));
        }
        _ => {}
    }

    if &settings != app.controller().settings() {
        app.set_tool_settings(settings);
    }
}

fn edit_section(app: &mut MapApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_undo = app.controller().can_undo();
        let can_redo = app.controller().can_redo();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.redo();
        }
    });

    ui.horizontal(|ui| {
        let has_selection = app.controller().selected().is_some();
        if ui.add_enabled(has_selection, egui::Button::new("Delete selected")).clicked() {
            app.delete_selected();
        }
        if ui.button("Clear map").clicked() {
            app.clear();
        }
    });

    let history = app.controller().history();
    ui.label(format!(
        "History: {}/{} · State: {}",
        history.cursor().map_or(0, |c| c + 1),
        history.len(),
        app.controller().state().name()
    ));
    ui.label(format!("Elements: {}", app.controller().document().len()));
}

fn map_section(app: &mut MapApp, ui: &mut egui::Ui) {
    ui.heading("Map");

    let mut config = app.config().clone();
    ui.horizontal(|ui| {
        ui.label("Title:");
        ui.text_edit_singleline(&mut config.title);
    });
    egui::ComboBox::from_label("Template")
        .selected_text(config.template.name())
        .show_ui(ui, |ui| {
            for template in MapTemplate::ALL {
                ui.selectable_value(&mut config.template, template, template.name());
            }
        });
    ui.checkbox(&mut config.show_legend, "Show legend");

    if &config != app.config() {
        app.set_frame_config(config);
    }

    if ui.button("New map").clicked() {
        app.new_map();
    }
}

fn file_section(app: &mut MapApp, ui: &mut egui::Ui) {
    ui.heading("File");
    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.text_edit_singleline(app.file_name_mut());
    });
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            app.save_map();
        }
        if ui.button("Load").clicked() {
            app.load_map();
        }
        if ui.button("Export PNG").clicked() {
            app.export_png();
        }
    });
}
