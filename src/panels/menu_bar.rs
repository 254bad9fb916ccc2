use crate::ComposerApp;
use crate::shortcuts::Action;

fn action_button(app: &mut ComposerApp, ui: &mut egui::Ui, action: Action, enabled: bool) {
    let mut button = egui::Button::new(action.label());
    if let Some(shortcut) = action.shortcut() {
        button = button.shortcut_text(ui.ctx().format_shortcut(&shortcut));
    }
    if ui.add_enabled(enabled, button).clicked() {
        app.request(action);
        ui.close_menu();
    }
}

/// Menu bar with a toolbar row underneath
pub fn menu_bar(app: &mut ComposerApp, ctx: &egui::Context) {
    let has_items = !app.composition.is_empty();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                action_button(app, ui, Action::Import, true);
                action_button(app, ui, Action::Export, has_items);
                ui.separator();
                action_button(app, ui, Action::Quit, true);
            });
            ui.menu_button("View", |ui| {
                action_button(app, ui, Action::ZoomIn, true);
                action_button(app, ui, Action::ZoomOut, true);
                action_button(app, ui, Action::ResetZoom, true);
            });
        });
    });

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Import").clicked() {
                app.request(Action::Import);
            }
            if ui.add_enabled(has_items, egui::Button::new("Export")).clicked() {
                app.request(Action::Export);
            }
            ui.separator();
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                app.request(Action::ZoomIn);
            }
            if ui.button("-").on_hover_text("Zoom out").clicked() {
                app.request(Action::ZoomOut);
            }
            if ui.button("1:1").on_hover_text("Reset zoom").clicked() {
                app.request(Action::ResetZoom);
            }
            ui.label(format!("{:.0}%", app.view.zoom() * 100.0));
        });
    });
}
