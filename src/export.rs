use egui::{Pos2, Rect};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::composition::Composition;
use crate::error::{ComposerError, ComposerResult};
use crate::item::CanvasItem;
use crate::transform;

/// Filters offered by the export dialog
pub const EXPORT_FILTERS: &[(&str, &[&str])] = &[
    ("PNG Image", &["png"]),
    ("JPEG Image", &["jpg", "jpeg"]),
];

/// Largest image `render_composition` allocates, in pixels (16384 x 16384)
pub const MAX_EXPORT_PIXELS: u64 = 1 << 28;

/// Pixel size of the image rendered for `region`
pub fn output_size(region: Rect) -> (u32, u32) {
    (
        region.width().round().max(0.0) as u32,
        region.height().round().max(0.0) as u32,
    )
}

/// Renders the bounding region of all items onto a transparent image.
///
/// Items are drawn back to front at full opacity, without selection outlines.
pub fn render_composition(composition: &Composition) -> ComposerResult<RgbaImage> {
    let region = composition
        .bounding_rect()
        .ok_or(ComposerError::EmptyComposition)?;
    let (width, height) = output_size(region);
    if width == 0 || height == 0 {
        return Err(ComposerError::EmptyRegion);
    }
    if u64::from(width) * u64::from(height) > MAX_EXPORT_PIXELS {
        log::error!("refusing to render a {}x{} composition", width, height);
        return Err(ComposerError::RegionTooLarge { width, height });
    }

    let mut target = RgbaImage::new(width, height);
    for id in composition.paint_order() {
        if let Some(item) = composition.item(id) {
            draw_item(&mut target, region.min, item);
        }
    }
    log::info!("rendered composition {}x{}", width, height);
    Ok(target)
}

/// Draws one item onto `target`, whose pixel (0, 0) sits at canvas point `origin`
fn draw_item(target: &mut RgbaImage, origin: Pos2, item: &CanvasItem) {
    let Some(inverse) = transform::invert(&item.matrix()) else {
        return;
    };
    let source = item.display_image();
    let bounds = item.bounds();

    let x0 = (bounds.min.x - origin.x).floor().max(0.0) as u32;
    let y0 = (bounds.min.y - origin.y).floor().max(0.0) as u32;
    let x1 = ((bounds.max.x - origin.x).ceil().max(0.0) as u32).min(target.width());
    let y1 = ((bounds.max.y - origin.y).ceil().max(0.0) as u32).min(target.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let canvas = Pos2::new(origin.x + x as f32 + 0.5, origin.y + y as f32 + 0.5);
            let local = transform::apply(&inverse, canvas);
            let sample = bilinear_sample(source, local.x - 0.5, local.y - 0.5);
            if sample[3] == 0 {
                continue;
            }
            let dst = target.get_pixel_mut(x, y);
            *dst = blend_over(*dst, sample);
        }
    }
}

/// Bilinear sample with transparent pixels outside the image
fn bilinear_sample(img: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let sample = |sx: i64, sy: i64| -> [f32; 4] {
        if sx < 0 || sy < 0 || sx >= img.width() as i64 || sy >= img.height() as i64 {
            [0.0; 4]
        } else {
            let p = img.get_pixel(sx as u32, sy as u32);
            // premultiply so transparent neighbours do not darken edges
            let a = p[3] as f32 / 255.0;
            [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
        }
    };

    let tl = sample(x0, y0);
    let tr = sample(x0 + 1, y0);
    let bl = sample(x0, y0 + 1);
    let br = sample(x0 + 1, y0 + 1);

    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let mut premul = [0.0f32; 4];
    for c in 0..4 {
        let top = lerp(tl[c], tr[c], fx);
        let bot = lerp(bl[c], br[c], fx);
        premul[c] = lerp(top, bot, fy);
    }

    let alpha = premul[3].round().clamp(0.0, 255.0);
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let unpremul = |v: f32| (v * 255.0 / premul[3]).round().clamp(0.0, 255.0) as u8;
    Rgba([
        unpremul(premul[0]),
        unpremul(premul[1]),
        unpremul(premul[2]),
        alpha as u8,
    ])
}

/// Source-over compositing of straight-alpha pixels
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Writes a rendered composition. The format follows the file extension;
/// JPEG has no alpha channel, so it is written as RGB.
pub fn save(image: &RgbaImage, path: &Path) -> ComposerResult<()> {
    let encode = |source| ComposerError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let format = ImageFormat::from_path(path).map_err(encode)?;
    let result = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(path, format),
        _ => image.save_with_format(path, format),
    };
    result.map_err(encode)?;
    log::info!("saved composition to {}", path.display());
    Ok(())
}

/// Renders and writes the composition, returning the written size
pub fn export_to(composition: &Composition, path: &Path) -> ComposerResult<(u32, u32)> {
    let image = render_composition(composition)?;
    save(&image, path)?;
    Ok(image.dimensions())
}
