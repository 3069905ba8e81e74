use eframe::egui;

use crate::MapApp;

pub fn central_panel(app: &mut MapApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(app.canvas_size(), egui::Sense::click_and_drag());
                let canvas_rect = response.rect;

                if response.hovered() && app.controller().tool().is_some() {
                    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                }

                let visible = canvas_rect.intersect(ui.clip_rect());
                app.handle_canvas_input(ctx, canvas_rect, visible);
                app.paint_canvas(&painter, canvas_rect.min);
            });
    });
}
