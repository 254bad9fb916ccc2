use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;
use image::imageops::FilterType;

use crate::item::ItemId;

/// Preview row of one canvas item
pub struct Thumbnail {
    item: ItemId,
    name: String,
    preview: RgbaImage,
    texture: Option<TextureHandle>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("item", &self.item)
            .field("name", &self.name)
            .field("preview", &(self.preview.width(), self.preview.height()))
            .finish_non_exhaustive()
    }
}

impl Thumbnail {
    /// Builds a preview whose longest edge is `edge` pixels, keeping the aspect ratio
    pub fn new(item: ItemId, name: impl Into<String>, source: &RgbaImage, edge: u32) -> Self {
        let (w, h) = source.dimensions();
        let ratio = edge as f32 / w.max(h).max(1) as f32;
        let tw = ((w as f32 * ratio).round() as u32).max(1);
        let th = ((h as f32 * ratio).round() as u32).max(1);
        Self {
            item,
            name: name.into(),
            preview: image::imageops::resize(source, tw, th, FilterType::Triangle),
            texture: None,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preview(&self) -> &RgbaImage {
        &self.preview
    }

    pub fn texture_id(&mut self, ctx: &Context) -> TextureId {
        let preview = &self.preview;
        let item = self.item;
        self.texture
            .get_or_insert_with(|| {
                let image = ColorImage::from_rgba_unmultiplied(
                    [preview.width() as usize, preview.height() as usize],
                    preview.as_raw(),
                );
                ctx.load_texture(format!("thumbnail_{}", item), image, TextureOptions::LINEAR)
            })
            .id()
    }
}

/// Ordered preview list. Index 0 is the back-most item.
#[derive(Debug, Default)]
pub struct ThumbnailList {
    entries: Vec<Thumbnail>,
}

impl ThumbnailList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, thumbnail: Thumbnail) {
        self.entries.push(thumbnail);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thumbnail> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Thumbnail> {
        self.entries.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Thumbnail> {
        self.entries.get(index)
    }

    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.entries.iter().position(|t| t.item == item)
    }

    /// Item ids in list order
    pub fn order(&self) -> Vec<ItemId> {
        self.entries.iter().map(|t| t.item).collect()
    }

    /// Moves the row at `from` so that it ends up at index `to`.
    /// Returns `false` when either index is out of range or nothing moves.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }
}

/// Row index a dragged entry ends up at when dropped before row `insert_at`
/// (`insert_at == len` drops after the last row)
pub fn drop_index(from: usize, insert_at: usize) -> usize {
    if insert_at > from { insert_at - 1 } else { insert_at }
}
