use std::time::Duration;

use crate::composition::Composition;
use crate::settings::Settings;
use crate::shortcuts::{self, Action};
use crate::view::CanvasView;
use crate::{export, import, panels};

const SETTINGS_KEY: &str = "image_composer_settings";

pub struct ComposerApp {
    pub(crate) composition: Composition,
    pub(crate) view: CanvasView,
    /// Screen rect of the canvas as laid out in the last frame
    pub(crate) canvas_rect: egui::Rect,
    /// Empty canvas was pressed: drags pan the view
    pub(crate) panning: bool,
    /// Actions requested from menus and toolbar this frame
    pub(crate) pending: Vec<Action>,
}

impl ComposerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Ctrl+Plus/Minus zoom the canvas, not the whole UI
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<Settings>(storage, SETTINGS_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            composition: Composition::new(settings),
            view: CanvasView::default(),
            canvas_rect: egui::Rect::NOTHING,
            panning: false,
            pending: Vec::new(),
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub(crate) fn request(&mut self, action: Action) {
        self.pending.push(action);
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: Action) {
        log::debug!("action {:?}", action);
        let base = self.composition.settings().zoom_base;
        match action {
            Action::Import => self.import_images(ctx),
            Action::Export => self.export_composition(ctx),
            Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Action::ZoomIn => self.view.zoom_in(base, self.canvas_rect),
            Action::ZoomOut => self.view.zoom_out(base, self.canvas_rect),
            Action::ResetZoom => self
                .view
                .reset(self.composition.bounding_rect(), self.canvas_rect),
        }
    }

    fn import_images(&mut self, ctx: &egui::Context) {
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Import Images")
            .add_filter("Images", import::IMAGE_EXTENSIONS)
            .pick_files()
        else {
            log::debug!("import dialog cancelled");
            return;
        };

        let now = ctx.input(|i| i.time);
        match self.composition.import_paths(&paths, now) {
            Ok(report) if report.loaded > 0 => {
                self.view
                    .reset(self.composition.bounding_rect(), self.canvas_rect);
            }
            Ok(_) => log::warn!("no image could be imported"),
            Err(err) => log::warn!("import rejected: {}", err),
        }
    }

    fn export_composition(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let settings = self.composition.settings().clone();

        let image = match export::render_composition(&self.composition) {
            Ok(image) => image,
            Err(err) => {
                self.composition
                    .status_mut()
                    .show(err.to_string(), now, settings.status_normal_secs);
                return;
            }
        };

        let mut dialog = rfd::FileDialog::new()
            .set_title("Export Composite Image")
            .set_file_name("composition.png");
        for (name, extensions) in export::EXPORT_FILTERS {
            dialog = dialog.add_filter(*name, *extensions);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match export::save(&image, &path) {
            Ok(()) => self.composition.status_mut().show(
                format!("Image saved: {}", path.display()),
                now,
                settings.status_normal_secs,
            ),
            Err(err) => {
                log::error!("export failed: {}", err);
                self.composition
                    .status_mut()
                    .show(err.to_string(), now, settings.status_long_secs);
            }
        }
    }
}

impl eframe::App for ComposerApp {
    /// Called by the framework to save settings before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self.composition.settings());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let actions = shortcuts::poll_actions(ctx);
        self.pending.extend(actions);

        if self.composition.active().is_some() && !ctx.wants_keyboard_input() {
            for shortcut in shortcuts::poll_item_shortcuts(ctx) {
                self.composition.apply_shortcut(shortcut);
            }
        }

        panels::menu_bar(self, ctx);
        panels::status_bar(self, ctx);
        panels::thumbnails_panel(self, ctx);
        panels::controls_panel(self, ctx);
        panels::central_panel(self, ctx);

        for action in std::mem::take(&mut self.pending) {
            self.handle_action(ctx, action);
        }

        let now = ctx.input(|i| i.time);
        if let Some(remaining) = self.composition.status().remaining(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }
}
