use crate::ComposerApp;
use crate::thumbnail::drop_index;

/// Left list of imported images. Clicking a row activates its item,
/// dragging a row changes the stacking order.
pub fn thumbnails_panel(app: &mut ComposerApp, ctx: &egui::Context) {
    let edge = app.composition.settings().thumbnail_size as f32;

    egui::SidePanel::left("thumbnails_panel")
        .resizable(true)
        .default_width(edge + 60.0)
        .show(ctx, |ui| {
            ui.heading("Imported Images");
            ui.separator();

            let rows = app.composition.thumbnail_rows();
            let mut clicked = None;
            let mut moved = None;

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, row) in rows.iter().enumerate() {
                    let preview = app
                        .composition
                        .thumbnails_mut()
                        .iter_mut()
                        .nth(index)
                        .map(|t| {
                            let (w, h) = t.preview().dimensions();
                            (t.texture_id(ctx), egui::vec2(w as f32, h as f32))
                        });

                    let id = egui::Id::new(("thumbnail", row.item));
                    let dragged = ui.dnd_drag_source(id, index, |ui| {
                        let button = match preview {
                            Some(texture) => egui::Button::image_and_text(
                                egui::Image::new(texture),
                                row.name.as_str(),
                            ),
                            None => egui::Button::new(row.name.as_str()),
                        };
                        ui.add(button.selected(row.current))
                    });
                    if dragged.inner.clicked() {
                        clicked = Some(index);
                    }

                    let response = dragged.response;
                    let pointer = ui.input(|i| i.pointer.interact_pos());
                    let Some(pointer) = pointer else {
                        continue;
                    };
                    let insert_at = if pointer.y < response.rect.center().y {
                        index
                    } else {
                        index + 1
                    };

                    if response.dnd_hover_payload::<usize>().is_some() {
                        let y = if insert_at == index {
                            response.rect.top()
                        } else {
                            response.rect.bottom()
                        };
                        let stroke = ui.visuals().selection.stroke;
                        ui.painter().hline(response.rect.x_range(), y, stroke);
                    }
                    if let Some(from) = response.dnd_release_payload::<usize>() {
                        moved = Some((*from, drop_index(*from, insert_at)));
                    }
                }
            });

            if let Some(index) = clicked {
                app.composition.thumbnail_clicked(index);
            }
            if let Some((from, to)) = moved {
                app.composition.reorder_thumbnail(from, to);
            }
        });
}
