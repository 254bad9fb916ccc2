//! Pointer-driven manipulation of a single canvas item.
//!
//! A primary-button press picks one of three drag interpretations from the
//! modifiers held *at press time*:
//!
//! ```text
//!            press (no modifier)       drag: translate by pointer delta
//!          ┌──────────────────────► Moving ──────────┐
//!          │ press (Shift only)                      │
//!   Idle ──┼──────────────────────► Scaling ─────────┼── release ──► Idle
//!          │ press (Ctrl/Cmd only)                   │
//!          └──────────────────────► Rotating ────────┘
//! ```
//!
//! Modifiers are never re-read mid-drag, so letting go of Shift halfway
//! through a scale keeps scaling until release.

use egui::{CursorIcon, Modifiers, Pos2, Vec2};
use std::f32::consts::{PI, TAU};

use crate::item::CanvasItem;

/// Interpretation of a drag, chosen at press time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Scale,
    Rotate,
}

impl DragKind {
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift_only() {
            Self::Scale
        } else if modifiers.command_only() {
            Self::Rotate
        } else {
            Self::Move
        }
    }
}

/// Transient per-drag state of an item
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Manipulation {
    #[default]
    Idle,
    Moving {
        last: Pos2,
    },
    Scaling {
        press: Pos2,
        press_scale: f32,
    },
    Rotating {
        press: Pos2,
        press_rotation: f32,
        /// Pointer angle around the center seen at the previous update
        last_angle: f32,
        /// Angle swept since the press, unwrapped across the ±π seam
        swept: f32,
    },
}

impl Manipulation {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Scale and rotate drags, which the controller mirrors into its numeric fields
    pub fn is_transforming(&self) -> bool {
        matches!(self, Self::Scaling { .. } | Self::Rotating { .. })
    }

    pub fn cursor(&self) -> CursorIcon {
        match self {
            Self::Scaling { .. } => CursorIcon::ResizeNwSe,
            Self::Rotating { .. } => CursorIcon::Crosshair,
            Self::Moving { .. } => CursorIcon::Grabbing,
            Self::Idle => CursorIcon::Default,
        }
    }
}

fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Wraps an angle difference into (-π, π]
fn wrap_delta(delta: f32) -> f32 {
    let wrapped = (delta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

impl CanvasItem {
    pub fn manipulation(&self) -> Manipulation {
        self.manipulation
    }

    /// Records the press point and the transform at press time
    pub fn begin_manipulation(&mut self, press: Pos2, kind: DragKind) {
        self.manipulation = match kind {
            DragKind::Move => Manipulation::Moving { last: press },
            DragKind::Scale => Manipulation::Scaling {
                press,
                press_scale: self.scale(),
            },
            DragKind::Rotate => Manipulation::Rotating {
                press,
                press_rotation: self.rotation(),
                last_angle: angle_of(press - self.center()),
                swept: 0.0,
            },
        };
        log::debug!("{}: begin {:?}", self.name(), kind);
    }

    /// Applies a pointer move. Returns `true` when scale or rotation changed.
    pub fn update_manipulation(
        &mut self,
        pointer: Pos2,
        sensitivity: f32,
        scale_floor: f32,
    ) -> bool {
        match self.manipulation {
            Manipulation::Idle => false,
            Manipulation::Moving { last } => {
                self.translate(pointer - last);
                self.manipulation = Manipulation::Moving { last: pointer };
                false
            }
            Manipulation::Scaling { press, press_scale } => {
                let dy = pointer.y - press.y;
                let scale = (press_scale - dy * sensitivity).max(scale_floor);
                self.set_scale(scale);
                true
            }
            Manipulation::Rotating {
                press,
                press_rotation,
                last_angle,
                swept,
            } => {
                let offset = pointer - self.center();
                if offset == Vec2::ZERO {
                    return false;
                }
                let angle = angle_of(offset);
                let swept = swept + wrap_delta(angle - last_angle);
                self.set_rotation(press_rotation + swept.to_degrees());
                self.manipulation = Manipulation::Rotating {
                    press,
                    press_rotation,
                    last_angle: angle,
                    swept,
                };
                true
            }
        }
    }

    /// Ends the drag. Returns `true` when a scale or rotate drag was active.
    pub fn end_manipulation(&mut self) -> bool {
        let was = std::mem::take(&mut self.manipulation);
        if !was.is_idle() {
            log::debug!("{}: end {:?}", self.name(), was);
        }
        was.is_transforming()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    const FAST: f32 = 0.0005;
    const FLOOR: f32 = 0.05;

    fn item() -> CanvasItem {
        // 100x100 at the origin, center (50, 50)
        let pixels = RgbaImage::new(100, 100);
        CanvasItem::new("a.png", pixels.clone(), DynamicImage::ImageRgba8(pixels))
    }

    fn point_at(center: Pos2, degrees: f32) -> Pos2 {
        let r = degrees.to_radians();
        center + Vec2::new(r.cos(), r.sin()) * 40.0
    }

    #[test]
    fn modifiers_pick_the_drag() {
        assert_eq!(DragKind::from_modifiers(Modifiers::NONE), DragKind::Move);
        assert_eq!(DragKind::from_modifiers(Modifiers::SHIFT), DragKind::Scale);
        assert_eq!(DragKind::from_modifiers(Modifiers::COMMAND), DragKind::Rotate);
        assert_eq!(
            DragKind::from_modifiers(Modifiers::SHIFT | Modifiers::COMMAND),
            DragKind::Move
        );
    }

    #[test]
    fn upward_drag_grows() {
        let mut item = item();
        item.begin_manipulation(Pos2::new(50.0, 50.0), DragKind::Scale);
        assert!(item.update_manipulation(Pos2::new(50.0, -150.0), FAST, FLOOR));
        assert!((item.scale() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn scale_is_relative_to_press() {
        let mut item = item();
        item.begin_manipulation(Pos2::new(0.0, 0.0), DragKind::Scale);
        item.update_manipulation(Pos2::new(0.0, 100.0), FAST, FLOOR);
        item.update_manipulation(Pos2::new(0.0, 200.0), FAST, FLOOR);
        assert!((item.scale() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn scale_clamps_to_floor() {
        let mut item = item();
        item.begin_manipulation(Pos2::new(0.0, 0.0), DragKind::Scale);
        for dy in [500.0, 1900.0, 1_000_000.0] {
            item.update_manipulation(Pos2::new(0.0, dy), FAST, FLOOR);
            assert!(item.scale() >= FLOOR);
        }
        assert_eq!(item.scale(), FLOOR);
    }

    #[test]
    fn rotation_follows_pointer_angle() {
        let mut item = item();
        item.set_rotation(10.0);
        let center = item.center();
        item.begin_manipulation(point_at(center, 0.0), DragKind::Rotate);
        item.update_manipulation(point_at(center, 30.0), FAST, FLOOR);
        assert!((item.rotation() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn rotation_accumulates_past_full_turn() {
        let mut item = item();
        let center = item.center();
        item.begin_manipulation(point_at(center, 0.0), DragKind::Rotate);
        for step in 1..=37 {
            item.update_manipulation(point_at(center, step as f32 * 10.0), FAST, FLOOR);
        }
        assert!((item.rotation() - 370.0).abs() < 1e-2);
    }

    #[test]
    fn move_drag_translates_by_delta() {
        let mut item = item();
        item.begin_manipulation(Pos2::new(10.0, 10.0), DragKind::Move);
        assert!(!item.update_manipulation(Pos2::new(15.0, 30.0), FAST, FLOOR));
        item.update_manipulation(Pos2::new(20.0, 30.0), FAST, FLOOR);
        assert_eq!(item.position(), Pos2::new(10.0, 20.0));
        assert!(!item.end_manipulation());
    }

    #[test]
    fn release_reports_transforming_drags() {
        let mut item = item();
        item.begin_manipulation(Pos2::ZERO, DragKind::Rotate);
        assert_eq!(item.manipulation().cursor(), CursorIcon::Crosshair);
        assert!(item.end_manipulation());
        assert!(item.manipulation().is_idle());
        assert!(!item.end_manipulation());
    }
}
