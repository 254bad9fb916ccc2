use crate::ComposerApp;

pub fn status_bar(app: &mut ComposerApp, ctx: &egui::Context) {
    let now = ctx.input(|i| i.time);
    let status = app.composition.status();

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if let Some(message) = status.message(now) {
                ui.label(message);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(status.active_label());
            });
        });
    });
}
