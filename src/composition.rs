//! The composition controller.
//!
//! `Composition` is the single owner of everything the three UI surfaces
//! show: the items and their transforms, the thumbnail order, the canvas
//! selection, the active item and the precise-mode flag. Surfaces never
//! mutate each other; they call one of the named operations here and then
//! re-read the projections (`controls`, `thumbnail_rows`, `paint_order`).

use egui::{CursorIcon, Modifiers, Pos2, Rect};
use std::path::PathBuf;

use crate::error::ComposerResult;
use crate::import::{ImportBatch, ImportFailure};
use crate::item::{CanvasItem, ItemId};
use crate::manipulation::DragKind;
use crate::settings::{Settings, Steps};
use crate::shortcuts::Shortcut;
use crate::status::StatusBar;
use crate::thumbnail::ThumbnailList;

/// Values shown by the rotation and scale fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsView {
    pub enabled: bool,
    /// Rotation wrapped into [0, 360) for display
    pub rotation: f32,
    pub scale: f32,
}

impl Default for ControlsView {
    fn default() -> Self {
        Self {
            enabled: false,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// One row of the thumbnail list as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailRow {
    pub item: ItemId,
    pub name: String,
    /// Highlighted current row, i.e. the active item
    pub current: bool,
}

/// What a primary press on the canvas landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    Grabbed { item: ItemId, kind: DragKind },
    /// Empty canvas: the selection was cleared
    Missed,
}

/// Result of a successful import batch
#[derive(Debug, Default)]
pub struct ImportReport {
    pub loaded: usize,
    pub failures: Vec<ImportFailure>,
}

#[derive(Debug, Default)]
pub struct Composition {
    /// Items in import order, which is also the Tab cycling order
    items: Vec<CanvasItem>,
    thumbnails: ThumbnailList,
    /// Canvas selection model. Kept to at most one entry by the operations below.
    selection: Vec<ItemId>,
    active: Option<ItemId>,
    /// Item receiving the current pointer drag
    grabbed: Option<ItemId>,
    precise: bool,
    settings: Settings,
    status: StatusBar,
}

impl Composition {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn steps(&self) -> Steps {
        self.settings.steps(self.precise)
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusBar {
        &mut self.status
    }

    // --- item access -----------------------------------------------------

    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn thumbnails(&self) -> &ThumbnailList {
        &self.thumbnails
    }

    pub(crate) fn thumbnails_mut(&mut self) -> &mut ThumbnailList {
        &mut self.thumbnails
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    pub fn active_item(&self) -> Option<&CanvasItem> {
        self.active.and_then(|id| self.item(id))
    }

    fn active_item_mut(&mut self) -> Option<&mut CanvasItem> {
        let id = self.active?;
        self.item_mut(id)
    }

    pub fn selection(&self) -> &[ItemId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    pub fn grabbed(&self) -> Option<ItemId> {
        self.grabbed
    }

    pub fn is_precise(&self) -> bool {
        self.precise
    }

    pub fn set_precise(&mut self, precise: bool, now: f64) {
        self.precise = precise;
        let mode = if precise { "Precise" } else { "Fast" };
        let secs = self.settings.status_short_secs;
        self.status.show(format!("Adjustment mode: {mode}"), now, secs);
    }

    // --- loading ---------------------------------------------------------

    /// Drops every item, thumbnail and selection
    pub fn clear(&mut self) {
        if self.active.is_some() {
            self.set_active(None);
        }
        self.selection.clear();
        self.grabbed = None;
        self.items.clear();
        self.thumbnails.clear();
        log::debug!("composition cleared");
    }

    /// Replaces the whole set with a decoded batch.
    ///
    /// The first loaded item becomes active, then stacking is re-synchronised
    /// from the thumbnail order, which leaves that item back-most.
    pub fn replace_with(&mut self, batch: ImportBatch) -> ImportReport {
        self.clear();
        let offset = self.settings.cascade_offset;
        for loaded in batch.loaded {
            let mut item = loaded.item;
            let step = loaded.index as f32 * offset;
            item.set_position(Pos2::new(step, step));
            self.items.push(item);
            self.thumbnails.push(loaded.thumbnail);
        }

        if let Some(first) = self.items.first().map(CanvasItem::id) {
            self.set_active(Some(first));
            self.sync_z_from_thumbnails();
        }

        log::info!(
            "imported {} image(s), {} failure(s)",
            self.items.len(),
            batch.failures.len()
        );
        ImportReport {
            loaded: self.items.len(),
            failures: batch.failures,
        }
    }

    /// Validates and decodes `paths`, then replaces the current set.
    ///
    /// A selection outside the allowed count is rejected before anything
    /// changes. Per-file failures are reported and skipped.
    pub fn import_paths(&mut self, paths: &[PathBuf], now: f64) -> ComposerResult<ImportReport> {
        if paths.is_empty() {
            let secs = self.settings.status_normal_secs;
            self.status.show("No file selected.", now, secs);
            return Ok(ImportReport::default());
        }

        let batch = match ImportBatch::load(paths, &self.settings) {
            Ok(batch) => batch,
            Err(err) => {
                let secs = self.settings.status_long_secs;
                self.status.show(err.to_string(), now, secs);
                return Err(err);
            }
        };

        let report = self.replace_with(batch);
        for failure in &report.failures {
            let secs = self.settings.status_error_secs;
            self.status.show(failure.to_string(), now, secs);
        }
        Ok(report)
    }

    // --- activation and selection -----------------------------------------

    /// Makes `new` the active item, or clears the active item.
    ///
    /// The previous active item is deactivated and deselected. The new one is
    /// selected, shown half transparent and raised above every other item.
    pub fn set_active(&mut self, new: Option<ItemId>) {
        if let Some(id) = new {
            if self.item(id).is_none() {
                log::warn!("cannot activate unknown item {}", id);
                return;
            }
        }

        if let Some(old) = self.active.filter(|old| Some(*old) != new) {
            if let Some(item) = self.item_mut(old) {
                item.set_active(false);
                log::debug!("deactivated {}", item.name());
            }
            self.selection.retain(|id| *id != old);
        }

        self.active = new;
        match new {
            Some(id) => {
                if !self.selection.contains(&id) {
                    self.selection.push(id);
                }
                self.raise_to_top(id);
                if let Some(item) = self.item_mut(id) {
                    item.set_active(true);
                    log::debug!("activated {} (z = {})", item.name(), item.z());
                }
                let name = self.item(id).map(|item| item.name().to_owned());
                self.status.set_active_name(name.as_deref());
            }
            None => self.status.set_active_name(None),
        }
    }

    /// Reconciles the active item with the canvas selection
    fn selection_changed(&mut self) {
        match self.selection.first().copied() {
            Some(id) if self.active != Some(id) => self.set_active(Some(id)),
            Some(_) => {}
            None => self.set_active(None),
        }
    }

    /// Selects exactly `id` on the canvas
    pub fn select(&mut self, id: ItemId) {
        if self.item(id).is_none() {
            return;
        }
        self.selection.clear();
        self.selection.push(id);
        self.selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_changed();
    }

    /// A click on the thumbnail row at `index`
    pub fn thumbnail_clicked(&mut self, index: usize) {
        if let Some(id) = self.thumbnails.get(index).map(|t| t.item()) {
            log::debug!("thumbnail {} clicked", index);
            self.select(id);
        }
    }

    /// Tab / Shift+Tab: activate the next or previous item in import order, wrapping
    pub fn cycle_active(&mut self, forward: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let current = self
            .active
            .and_then(|id| self.items.iter().position(|item| item.id() == id));
        let next = match (forward, current) {
            (true, Some(i)) => (i + 1) % len,
            (true, None) => 0,
            (false, Some(i)) => (i + len - 1) % len,
            (false, None) => len - 1,
        };
        let id = self.items[next].id();
        self.set_active(Some(id));
    }

    // --- stacking ----------------------------------------------------------

    /// Puts `id` in front of every other item
    pub fn raise_to_top(&mut self, id: ItemId) {
        let top = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .map(CanvasItem::z)
            .reduce(f32::max);
        let z = top.map_or(1.0, |z| z + 1.0);
        if let Some(item) = self.item_mut(id) {
            item.set_z(z);
        }
    }

    /// Assigns z = row + 1 to every item following the thumbnail order
    pub fn sync_z_from_thumbnails(&mut self) {
        for (row, id) in self.thumbnails.order().into_iter().enumerate() {
            if let Some(item) = self.item_mut(id) {
                item.set_z(row as f32 + 1.0);
            }
        }
        log::debug!("z-order synchronised from thumbnails");
    }

    /// The user dragged the thumbnail at `from` to index `to`
    pub fn reorder_thumbnail(&mut self, from: usize, to: usize) -> bool {
        if !self.thumbnails.move_entry(from, to) {
            return false;
        }
        log::debug!("thumbnail moved from {} to {}", from, to);
        self.sync_z_from_thumbnails();
        true
    }

    /// Item ids back to front. Equal z keeps import order.
    pub fn paint_order(&self) -> Vec<ItemId> {
        let mut order: Vec<&CanvasItem> = self.items.iter().collect();
        order.sort_by(|a, b| a.z().total_cmp(&b.z()));
        order.into_iter().map(CanvasItem::id).collect()
    }

    /// Front-most item under a canvas point
    pub fn item_at(&self, pos: Pos2) -> Option<ItemId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|id| self.item(*id).is_some_and(|item| item.hit_test(pos)))
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(CanvasItem::bounds)
            .reduce(|a, b| a.union(b))
    }

    // --- pointer -----------------------------------------------------------

    /// Primary button pressed at a canvas point with the given modifiers
    pub fn pointer_pressed(&mut self, pos: Pos2, modifiers: Modifiers) -> PressOutcome {
        let Some(id) = self.item_at(pos) else {
            self.clear_selection();
            return PressOutcome::Missed;
        };

        let kind = DragKind::from_modifiers(modifiers);
        if kind == DragKind::Move {
            self.select(id);
            self.raise_to_top(id);
        }
        if let Some(item) = self.item_mut(id) {
            item.begin_manipulation(pos, kind);
        }
        self.grabbed = Some(id);
        PressOutcome::Grabbed { item: id, kind }
    }

    /// Pointer moved with the primary button held.
    /// Returns `true` when the active item's scale or rotation changed.
    pub fn pointer_dragged(&mut self, pos: Pos2) -> bool {
        let Some(id) = self.grabbed else {
            return false;
        };
        let sensitivity = self.steps().scale_sensitivity;
        let floor = self.settings.drag_scale_floor;
        let changed = self
            .item_mut(id)
            .is_some_and(|item| item.update_manipulation(pos, sensitivity, floor));
        changed && self.active == Some(id)
    }

    /// Primary button released.
    /// Returns `true` when a scale or rotate drag of the active item ended.
    pub fn pointer_released(&mut self) -> bool {
        let Some(id) = self.grabbed.take() else {
            return false;
        };
        let ended = self.item_mut(id).is_some_and(CanvasItem::end_manipulation);
        ended && self.active == Some(id)
    }

    /// Cursor to show while a drag is in progress
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.grabbed
            .and_then(|id| self.item(id))
            .map(|item| item.manipulation().cursor())
    }

    // --- numeric fields and keyboard ---------------------------------------

    pub fn apply_rotation(&mut self, degrees: f32) {
        if let Some(item) = self.active_item_mut() {
            item.set_rotation(degrees);
        }
    }

    /// Non-positive values are ignored
    pub fn apply_scale(&mut self, scale: f32) -> bool {
        if scale <= 0.0 {
            return false;
        }
        self.active_item_mut().is_some_and(|item| item.set_scale(scale))
    }

    /// Applies a keyboard shortcut. Returns `false` when nothing is active.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> bool {
        if self.active.is_none() {
            return false;
        }
        let steps = self.steps();
        let floor = self.settings.key_scale_floor;

        match shortcut {
            Shortcut::NextItem => self.cycle_active(true),
            Shortcut::PreviousItem => self.cycle_active(false),
            _ => {
                let Some(item) = self.active_item_mut() else {
                    return false;
                };
                match shortcut {
                    Shortcut::Nudge(direction) => item.translate(direction * steps.move_by),
                    Shortcut::RotateClockwise => {
                        item.set_rotation(item.rotation() + steps.rotate_by)
                    }
                    Shortcut::RotateCounterClockwise => {
                        item.set_rotation(item.rotation() - steps.rotate_by)
                    }
                    Shortcut::Grow => {
                        item.set_scale((item.scale() + steps.scale_by).max(floor));
                    }
                    Shortcut::Shrink => {
                        item.set_scale((item.scale() - steps.scale_by).max(floor));
                    }
                    Shortcut::NextItem | Shortcut::PreviousItem => {}
                }
            }
        }
        true
    }

    // --- projections -------------------------------------------------------

    pub fn controls(&self) -> ControlsView {
        match self.active_item() {
            Some(item) => ControlsView {
                enabled: true,
                rotation: item.rotation().rem_euclid(360.0),
                scale: item.scale(),
            },
            None => ControlsView::default(),
        }
    }

    pub fn thumbnail_rows(&self) -> Vec<ThumbnailRow> {
        self.thumbnails
            .iter()
            .map(|t| ThumbnailRow {
                item: t.item(),
                name: t.name().to_owned(),
                current: self.active == Some(t.item()),
            })
            .collect()
    }

    /// Index of the highlighted thumbnail row
    pub fn current_row(&self) -> Option<usize> {
        self.active.and_then(|id| self.thumbnails.index_of(id))
    }
}
