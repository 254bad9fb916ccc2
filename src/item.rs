use egui::{
    Color32, ColorImage, Context, Pos2, Rect, TextureHandle, TextureId, TextureOptions, Vec2,
};
use image::{DynamicImage, RgbaImage};
use std::fmt;
use uuid::Uuid;

use crate::manipulation::Manipulation;
use crate::transform::{self, ItemTransform, Matrix};

/// Opacity of the active item, as an interaction affordance
pub const ACTIVE_OPACITY: f32 = 0.5;

/// Stable identity of a canvas item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One imported image placed on the canvas
pub struct CanvasItem {
    id: ItemId,
    name: String,
    /// Opaque RGBA copy used for display and export
    display: RgbaImage,
    /// The decoded image as loaded, kept for later re-processing
    original: DynamicImage,
    transform: ItemTransform,
    z: f32,
    active: bool,
    pub(crate) manipulation: Manipulation,
    texture: Option<TextureHandle>,
}

// Custom Debug implementation since TextureHandle and the pixel buffers are not useful to print
impl fmt::Debug for CanvasItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasItem")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size())
            .field("transform", &self.transform)
            .field("z", &self.z)
            .field("active", &self.active)
            .field("manipulation", &self.manipulation)
            .finish_non_exhaustive()
    }
}

impl CanvasItem {
    pub fn new(name: impl Into<String>, display: RgbaImage, original: DynamicImage) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            display,
            original,
            transform: ItemTransform::identity(),
            z: 0.0,
            active: false,
            manipulation: Manipulation::Idle,
            texture: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_image(&self) -> &RgbaImage {
        &self.display
    }

    pub fn original_image(&self) -> &DynamicImage {
        &self.original
    }

    /// Untransformed size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.display.width() as f32, self.display.height() as f32)
    }

    pub fn transform(&self) -> ItemTransform {
        self.transform
    }

    pub fn position(&self) -> Pos2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.transform.position = position;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.transform.position += delta;
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Sets the scale. Non-positive values are ignored and `false` is returned.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if scale > 0.0 && scale.is_finite() {
            self.transform.scale = scale;
            true
        } else {
            false
        }
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.transform.rotation = degrees;
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn opacity(&self) -> f32 {
        if self.active { ACTIVE_OPACITY } else { 1.0 }
    }

    pub fn local_center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Center of the item in canvas coordinates
    pub fn center(&self) -> Pos2 {
        self.transform.position + self.local_center()
    }

    pub fn matrix(&self) -> Matrix {
        self.transform.to_matrix_with_pivot(self.local_center())
    }

    /// Corners in canvas coordinates: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Pos2; 4] {
        let m = self.matrix();
        let size = self.size();
        [
            Pos2::ZERO,
            Pos2::new(size.x, 0.0),
            Pos2::new(size.x, size.y),
            Pos2::new(0.0, size.y),
        ]
        .map(|p| transform::apply(&m, p))
    }

    /// Axis-aligned bounds of the transformed item
    pub fn bounds(&self) -> Rect {
        Rect::from_points(&self.corners())
    }

    /// Maps a canvas point into the item's untransformed pixel space
    pub fn to_local(&self, canvas: Pos2) -> Option<Pos2> {
        transform::invert(&self.matrix()).map(|inv| transform::apply(&inv, canvas))
    }

    pub fn hit_test(&self, canvas: Pos2) -> bool {
        let size = self.size();
        self.to_local(canvas)
            .is_some_and(|p| p.x >= 0.0 && p.y >= 0.0 && p.x < size.x && p.y < size.y)
    }

    /// Returns the display texture, uploading it on first use
    pub fn texture_id(&mut self, ctx: &Context) -> TextureId {
        let display = &self.display;
        let name = &self.name;
        let id = self.id;
        self.texture
            .get_or_insert_with(|| {
                log::debug!("Uploading texture for {}", name);
                let image = ColorImage::from_rgba_unmultiplied(
                    [display.width() as usize, display.height() as usize],
                    display.as_raw(),
                );
                ctx.load_texture(format!("item_{}", id), image, TextureOptions::LINEAR)
            })
            .id()
    }

    /// Tint applied when painting, carrying the item's opacity
    pub fn tint(&self) -> Color32 {
        Color32::WHITE.gamma_multiply(self.opacity())
    }
}
