use egui::{Modifiers, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};
use image_composer::{
    ComposerError, Composition, ItemId, PressOutcome, Settings, Shortcut, ThumbnailRow,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes `count` solid 100x80 PNGs named a.png, b.png, ...
fn write_images(dir: &TempDir, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let name = format!("{}.png", (b'a' + i as u8) as char);
            let path = dir.path().join(name);
            RgbaImage::from_pixel(100, 80, Rgba([40 * i as u8, 100, 200, 255]))
                .save(&path)
                .unwrap();
            path
        })
        .collect()
}

fn imported(count: usize) -> (Composition, Vec<ItemId>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_images(&dir, count);
    let mut composition = Composition::new(Settings::default());
    let report = composition.import_paths(&paths, 0.0).unwrap();
    assert_eq!(report.loaded, count);
    let ids = composition.items().iter().map(|item| item.id()).collect();
    (composition, ids, dir)
}

fn assert_single_active(composition: &Composition) {
    let active: Vec<ItemId> = composition
        .items()
        .iter()
        .filter(|item| item.is_active())
        .map(|item| item.id())
        .collect();
    match composition.active() {
        Some(id) => {
            assert_eq!(active, vec![id]);
            assert_eq!(composition.selection(), &[id]);
            assert_eq!(composition.current_row(), composition.thumbnails().index_of(id));
        }
        None => {
            assert!(active.is_empty());
            assert!(composition.selection().is_empty());
            assert_eq!(composition.current_row(), None);
        }
    }
    for item in composition.items() {
        let expected = if item.is_active() { 0.5 } else { 1.0 };
        assert_eq!(item.opacity(), expected);
    }
}

fn z_values(composition: &Composition, ids: &[ItemId]) -> Vec<f32> {
    ids.iter()
        .map(|id| composition.item(*id).unwrap().z())
        .collect()
}

#[test]
fn test_import_activates_first_item_and_cascades() {
    let (composition, ids, _dir) = imported(3);

    assert_eq!(composition.active(), Some(ids[0]));
    assert_single_active(&composition);
    assert_eq!(composition.status().active_label(), "Active: a.png");

    let positions: Vec<Pos2> = composition.items().iter().map(|i| i.position()).collect();
    assert_eq!(
        positions,
        vec![Pos2::new(0.0, 0.0), Pos2::new(20.0, 20.0), Pos2::new(40.0, 40.0)]
    );

    // stacking follows the list even for the freshly activated item
    assert_eq!(z_values(&composition, &ids), vec![1.0, 2.0, 3.0]);
    assert_eq!(composition.paint_order(), ids);

    let controls = composition.controls();
    assert!(controls.enabled);
    assert_eq!(controls.rotation, 0.0);
    assert_eq!(controls.scale, 1.0);

    let rows = composition.thumbnail_rows();
    assert_eq!(
        rows[0],
        ThumbnailRow {
            item: ids[0],
            name: "a.png".to_owned(),
            current: true
        }
    );
    assert!(!rows[1].current && !rows[2].current);
}

#[test]
fn test_import_count_outside_bounds_keeps_previous_set() {
    let (mut composition, ids, dir) = imported(3);
    let paths = write_images(&dir, 7);

    let err = composition.import_paths(&paths[..1], 1.0).unwrap_err();
    assert!(matches!(err, ComposerError::ImportCount { count: 1, .. }));
    assert_eq!(
        composition.status().message(1.0),
        Some("Please select between 2 and 6 images (1 selected)")
    );

    let err = composition.import_paths(&paths, 2.0).unwrap_err();
    assert!(matches!(err, ComposerError::ImportCount { count: 7, .. }));

    let current: Vec<ItemId> = composition.items().iter().map(|i| i.id()).collect();
    assert_eq!(current, ids);
    assert_eq!(composition.active(), Some(ids[0]));

    assert_eq!(composition.import_paths(&paths[..2], 3.0).unwrap().loaded, 2);
    assert_eq!(composition.import_paths(&paths[..6], 4.0).unwrap().loaded, 6);
    assert_eq!(composition.thumbnails().len(), 6);
}

#[test]
fn test_empty_selection_only_reports() {
    let (mut composition, ids, _dir) = imported(2);
    let report = composition.import_paths(&[], 5.0).unwrap();
    assert_eq!(report.loaded, 0);
    assert_eq!(composition.status().message(5.0), Some("No file selected."));
    assert_eq!(composition.len(), ids.len());
}

#[test]
fn test_undecodable_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = write_images(&dir, 2);
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"not an image").unwrap();
    paths.insert(1, broken);

    let mut composition = Composition::new(Settings::default());
    let report = composition.import_paths(&paths, 0.0).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "broken.png");
    assert_eq!(composition.thumbnails().len(), 2);

    let message = composition.status().message(0.0).unwrap();
    assert!(message.starts_with("Import error"), "{message}");
    assert!(message.contains("broken.png"), "{message}");

    // cascade keeps the slot of the skipped file
    assert_eq!(composition.items()[1].position(), Pos2::new(40.0, 40.0));
}

#[test]
fn test_single_active_item_across_operations() {
    let (mut composition, ids, _dir) = imported(4);

    composition.thumbnail_clicked(2);
    assert_eq!(composition.active(), Some(ids[2]));
    assert_single_active(&composition);

    composition.cycle_active(true);
    assert_eq!(composition.active(), Some(ids[3]));
    assert_single_active(&composition);

    composition.cycle_active(true);
    assert_eq!(composition.active(), Some(ids[0]));
    composition.cycle_active(false);
    assert_eq!(composition.active(), Some(ids[3]));
    assert_single_active(&composition);

    composition.select(ids[1]);
    assert_eq!(composition.active(), Some(ids[1]));
    assert_single_active(&composition);

    composition.clear_selection();
    assert_eq!(composition.active(), None);
    assert_single_active(&composition);
    assert_eq!(composition.status().active_label(), "No active image");
}

#[test]
fn test_press_on_empty_canvas_clears_active() {
    let (mut composition, _ids, _dir) = imported(2);

    let outcome = composition.pointer_pressed(Pos2::new(-500.0, -500.0), Modifiers::NONE);
    assert_eq!(outcome, PressOutcome::Missed);
    assert_eq!(composition.active(), None);
    assert_single_active(&composition);

    let controls = composition.controls();
    assert!(!controls.enabled);
    assert_eq!((controls.rotation, controls.scale), (0.0, 1.0));
}

#[test]
fn test_plain_drag_selects_raises_and_moves() {
    let (mut composition, ids, _dir) = imported(3);
    composition.thumbnail_clicked(1);

    // only the first item covers this point
    let outcome = composition.pointer_pressed(Pos2::new(5.0, 5.0), Modifiers::NONE);
    assert_eq!(
        outcome,
        PressOutcome::Grabbed {
            item: ids[0],
            kind: image_composer::DragKind::Move
        }
    );
    assert_eq!(composition.active(), Some(ids[0]));
    assert_single_active(&composition);
    assert_eq!(composition.paint_order().last(), Some(&ids[0]));

    assert!(!composition.pointer_dragged(Pos2::new(15.0, 25.0)));
    assert!(!composition.pointer_dragged(Pos2::new(17.0, 26.0)));
    assert!(!composition.pointer_released());
    assert_eq!(composition.item(ids[0]).unwrap().position(), Pos2::new(12.0, 21.0));
    assert_eq!(composition.grabbed(), None);
}

#[test]
fn test_shift_drag_scales_active_item() {
    let (mut composition, ids, _dir) = imported(3);
    composition.thumbnail_clicked(2);
    let center = composition.item(ids[2]).unwrap().center();

    let outcome = composition.pointer_pressed(center, Modifiers::SHIFT);
    assert!(matches!(outcome, PressOutcome::Grabbed { kind: image_composer::DragKind::Scale, .. }));
    assert_eq!(composition.cursor(), Some(egui::CursorIcon::ResizeNwSe));

    assert!(composition.pointer_dragged(center - Vec2::new(0.0, 100.0)));
    let scale = composition.controls().scale;
    assert!((scale - 1.05).abs() < 1e-5, "{scale}");

    // scale is anchored at the press, so only the total offset counts
    composition.pointer_dragged(center + Vec2::new(0.0, 100_000.0));
    assert_eq!(composition.controls().scale, 0.05);

    assert!(composition.pointer_released());
    assert_eq!(composition.cursor(), None);
    assert_eq!(composition.item(ids[2]).unwrap().center(), center);
}

#[test]
fn test_modifier_drag_on_inactive_item_keeps_selection() {
    let (mut composition, ids, _dir) = imported(3);
    let center = composition.item(ids[2]).unwrap().center();

    composition.pointer_pressed(center, Modifiers::SHIFT);
    assert_eq!(composition.active(), Some(ids[0]));
    assert_eq!(composition.selection(), &[ids[0]]);

    // the dragged item changes, but it is not the one the fields show
    assert!(!composition.pointer_dragged(center - Vec2::new(0.0, 200.0)));
    assert!(!composition.pointer_released());
    assert!((composition.item(ids[2]).unwrap().scale() - 1.1).abs() < 1e-5);
    assert_eq!(composition.controls().scale, 1.0);
}

#[test]
fn test_ctrl_drag_rotation_accumulates_past_full_turn() {
    let (mut composition, ids, _dir) = imported(3);
    composition.thumbnail_clicked(2);
    let center = composition.item(ids[2]).unwrap().center();
    let radius = 30.0;

    let start = center + Vec2::new(radius, 0.0);
    composition.pointer_pressed(start, Modifiers::COMMAND);
    assert_eq!(composition.cursor(), Some(egui::CursorIcon::Crosshair));

    for step in 1..=13 {
        let angle = (step as f32 * 30.0).to_radians();
        composition.pointer_dragged(center + Vec2::angled(angle) * radius);
    }
    composition.pointer_released();

    let rotation = composition.item(ids[2]).unwrap().rotation();
    assert!((rotation - 390.0).abs() < 1e-2, "{rotation}");
    assert!((composition.controls().rotation - 30.0).abs() < 1e-2);
}

#[test]
fn test_keyboard_steps_follow_mode() {
    let (mut composition, ids, _dir) = imported(2);
    let item = |c: &Composition| c.item(ids[0]).unwrap().transform();

    composition.apply_shortcut(Shortcut::Nudge(Vec2::new(1.0, 0.0)));
    composition.apply_shortcut(Shortcut::Nudge(Vec2::new(0.0, -1.0)));
    assert_eq!(item(&composition).position, Pos2::new(10.0, -10.0));

    composition.apply_shortcut(Shortcut::RotateClockwise);
    assert_eq!(item(&composition).rotation, 15.0);
    composition.apply_shortcut(Shortcut::Grow);
    assert!((item(&composition).scale - 1.1).abs() < 1e-6);

    composition.set_precise(true, 0.0);
    assert_eq!(composition.status().message(0.0), Some("Adjustment mode: Precise"));
    composition.apply_shortcut(Shortcut::Nudge(Vec2::new(-1.0, 0.0)));
    composition.apply_shortcut(Shortcut::RotateCounterClockwise);
    composition.apply_shortcut(Shortcut::Shrink);
    let t = item(&composition);
    assert_eq!(t.position, Pos2::new(9.0, -10.0));
    assert_eq!(t.rotation, 14.0);
    assert!((t.scale - 1.09).abs() < 1e-5);

    for _ in 0..200 {
        composition.apply_shortcut(Shortcut::Shrink);
    }
    assert_eq!(item(&composition).scale, 0.01);
}

#[test]
fn test_shortcuts_need_an_active_item() {
    let (mut composition, ids, _dir) = imported(2);
    composition.clear_selection();
    let before = composition.item(ids[0]).unwrap().transform();

    assert!(!composition.apply_shortcut(Shortcut::Nudge(Vec2::new(1.0, 0.0))));
    assert!(!composition.apply_shortcut(Shortcut::NextItem));
    assert_eq!(composition.item(ids[0]).unwrap().transform(), before);
    assert_eq!(composition.active(), None);
}

#[test]
fn test_tab_cycles_in_import_order_after_reorder() {
    let (mut composition, ids, _dir) = imported(3);
    assert!(composition.reorder_thumbnail(0, 2));

    composition.apply_shortcut(Shortcut::NextItem);
    assert_eq!(composition.active(), Some(ids[1]));
    composition.apply_shortcut(Shortcut::NextItem);
    assert_eq!(composition.active(), Some(ids[2]));
    composition.apply_shortcut(Shortcut::PreviousItem);
    assert_eq!(composition.active(), Some(ids[1]));
}

#[test]
fn test_numeric_fields_edit_active_item() {
    let (mut composition, ids, _dir) = imported(2);

    composition.apply_rotation(400.0);
    assert_eq!(composition.item(ids[0]).unwrap().rotation(), 400.0);
    assert!((composition.controls().rotation - 40.0).abs() < 1e-4);

    composition.apply_rotation(-90.0);
    assert!((composition.controls().rotation - 270.0).abs() < 1e-4);

    assert!(composition.apply_scale(2.5));
    assert!(!composition.apply_scale(0.0));
    assert!(!composition.apply_scale(-1.0));
    assert_eq!(composition.controls().scale, 2.5);
    assert_eq!(composition.item(ids[1]).unwrap().scale(), 1.0);
}

#[test]
fn test_thumbnail_order_defines_stacking() {
    let (mut composition, ids, _dir) = imported(4);

    assert!(composition.reorder_thumbnail(0, 3));
    let order = composition.thumbnails().order();
    assert_eq!(order, vec![ids[1], ids[2], ids[3], ids[0]]);
    assert_eq!(composition.paint_order(), order);
    assert_eq!(z_values(&composition, &order), vec![1.0, 2.0, 3.0, 4.0]);

    assert!(composition.reorder_thumbnail(2, 0));
    assert_eq!(composition.paint_order(), composition.thumbnails().order());

    // moves that change nothing leave stacking alone
    assert!(!composition.reorder_thumbnail(1, 1));
    assert!(!composition.reorder_thumbnail(0, 9));
}

#[test]
fn test_raise_is_kept_until_next_reorder() {
    let (mut composition, ids, _dir) = imported(3);

    composition.thumbnail_clicked(1);
    assert_eq!(composition.item(ids[1]).unwrap().z(), 4.0);
    assert_eq!(composition.paint_order().last(), Some(&ids[1]));
    // the list itself does not move
    assert_eq!(composition.thumbnails().order(), ids);

    // activating another item raises it above the previous raise
    composition.thumbnail_clicked(0);
    assert_eq!(composition.item(ids[0]).unwrap().z(), 5.0);
    assert_eq!(composition.paint_order(), vec![ids[2], ids[1], ids[0]]);

    assert!(composition.reorder_thumbnail(2, 1));
    assert_eq!(composition.paint_order(), vec![ids[0], ids[2], ids[1]]);
    assert_eq!(composition.item(ids[0]).unwrap().z(), 1.0);
}

#[test]
fn test_front_most_item_wins_hit_test() {
    let (composition, ids, _dir) = imported(3);
    assert_eq!(composition.item_at(Pos2::new(50.0, 50.0)), Some(ids[2]));
    assert_eq!(composition.item_at(Pos2::new(25.0, 25.0)), Some(ids[1]));
    assert_eq!(composition.item_at(Pos2::new(139.0, 119.0)), Some(ids[2]));
    assert_eq!(composition.item_at(Pos2::new(141.0, 119.0)), None);

    let bounds = composition.bounding_rect().unwrap();
    assert_eq!(bounds, Rect::from_min_max(Pos2::ZERO, Pos2::new(140.0, 120.0)));
}
