use egui::{Color32, Mesh, PointerButton, Pos2, Rect, Sense, Shape, Stroke};

use crate::ComposerApp;
use crate::composition::PressOutcome;
use crate::transform;

const CANVAS_BACKGROUND: Color32 = Color32::from_gray(220);
const OUTLINE_WIDTH: f32 = 3.0;

pub fn central_panel(app: &mut ComposerApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(CANVAS_BACKGROUND))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            app.canvas_rect = response.rect;

            handle_pointer(app, ui, &response);
            paint_items(app, ctx, &painter, response.rect.min);
        });
}

fn handle_pointer(app: &mut ComposerApp, ui: &egui::Ui, response: &egui::Response) {
    let origin = response.rect.min;
    let (pressed, released, press_origin, pointer, modifiers, scroll, zoom) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.press_origin(),
            i.pointer.interact_pos(),
            i.modifiers,
            i.raw_scroll_delta,
            i.zoom_delta(),
        )
    });

    if pressed && response.hovered() {
        if let Some(press) = press_origin {
            let pos = app.view.to_canvas(press, origin);
            if app.composition.pointer_pressed(pos, modifiers) == PressOutcome::Missed {
                app.panning = true;
            }
        }
    }

    if response.dragged_by(PointerButton::Primary) {
        if app.composition.grabbed().is_some() {
            if let Some(pointer) = pointer {
                let pos = app.view.to_canvas(pointer, origin);
                app.composition.pointer_dragged(pos);
            }
        } else if app.panning {
            app.view.pan_by(response.drag_delta());
        }
    }

    if released {
        app.composition.pointer_released();
        app.panning = false;
    }

    if let Some(icon) = app.composition.cursor() {
        ui.ctx().set_cursor_icon(icon);
    } else if app.panning {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }

    // Ctrl + wheel zooms around the pointer. egui reports it as a zoom delta,
    // older backends as a plain scroll with the modifier held.
    let direction = if zoom != 1.0 {
        zoom - 1.0
    } else if modifiers.command {
        scroll.y
    } else {
        0.0
    };
    if response.hovered() && direction != 0.0 {
        let base = app.composition.settings().zoom_base;
        let factor = if direction > 0.0 { base } else { 1.0 / base };
        let anchor = pointer.unwrap_or(response.rect.center());
        app.view.zoom_by(factor, anchor, origin);
    }
}

fn paint_items(app: &mut ComposerApp, ctx: &egui::Context, painter: &egui::Painter, origin: Pos2) {
    let view = app.view;
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

    for id in app.composition.paint_order() {
        let selected = app.composition.is_selected(id);
        let Some(item) = app.composition.item_mut(id) else {
            continue;
        };
        let matrix = item.matrix();
        let to_screen = |p: Pos2| view.to_screen(transform::apply(&matrix, p), origin);

        let mut mesh = Mesh::with_texture(item.texture_id(ctx));
        mesh.add_rect_with_uv(Rect::from_min_size(Pos2::ZERO, item.size()), uv, item.tint());
        for vertex in &mut mesh.vertices {
            vertex.pos = to_screen(vertex.pos);
        }
        painter.add(Shape::mesh(mesh));

        if selected {
            let local = Rect::from_min_size(Pos2::ZERO, item.size()).expand(2.0);
            let outline = [
                local.left_top(),
                local.right_top(),
                local.right_bottom(),
                local.left_bottom(),
            ]
            .map(to_screen)
            .to_vec();
            painter.add(Shape::closed_line(
                outline,
                Stroke::new(OUTLINE_WIDTH, Color32::RED),
            ));
        }
    }
}
