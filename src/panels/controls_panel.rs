use crate::ComposerApp;

const HELP: &[(&str, &str)] = &[
    ("Drag", "move and bring to front"),
    ("Shift + drag", "scale"),
    ("Ctrl + drag", "rotate"),
    ("Arrows", "move"),
    ("R / E", "rotate"),
    ("+ / -", "scale"),
    ("Tab / Shift+Tab", "next / previous image"),
    ("Ctrl + wheel", "zoom"),
];

pub fn controls_panel(app: &mut ComposerApp, ctx: &egui::Context) {
    egui::SidePanel::right("controls_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Image Controls");
            ui.separator();

            let now = ui.input(|i| i.time);
            let mut precise = app.composition.is_precise();
            if ui
                .checkbox(&mut precise, "Precise mode")
                .on_hover_text("Smaller steps for keyboard and drag adjustments")
                .changed()
            {
                app.composition.set_precise(precise, now);
            }
            ui.add_space(8.0);

            let controls = app.composition.controls();
            let mut rotation = controls.rotation;
            let mut scale = controls.scale;

            ui.add_enabled_ui(controls.enabled, |ui| {
                egui::Grid::new("controls_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Rotation:");
                        let field = egui::DragValue::new(&mut rotation)
                            .range(-360.0..=360.0)
                            .clamp_existing_to_range(false)
                            .suffix(" °");
                        if ui.add(field).changed() {
                            app.composition.apply_rotation(rotation);
                        }
                        ui.end_row();

                        ui.label("Scale:");
                        let field = egui::DragValue::new(&mut scale)
                            .range(0.01..=10.0)
                            .clamp_existing_to_range(false)
                            .speed(0.01)
                            .fixed_decimals(2);
                        if ui.add(field).changed() {
                            app.composition.apply_scale(scale);
                        }
                        ui.end_row();
                    });
            });

            ui.separator();
            ui.collapsing("Shortcuts", |ui| {
                egui::Grid::new("help_grid").striped(true).show(ui, |ui| {
                    for (keys, what) in HELP {
                        ui.label(*keys);
                        ui.label(*what);
                        ui.end_row();
                    }
                });
            });
        });
}
