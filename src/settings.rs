use serde::{Deserialize, Serialize};

/// Tunable constants of the composer.
///
/// Persisted through eframe storage between runs. The composition itself is
/// never stored, only these values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub move_step_fast: f32,
    pub move_step_precise: f32,
    pub rotate_step_fast: f32,
    pub rotate_step_precise: f32,
    pub scale_step_fast: f32,
    pub scale_step_precise: f32,
    /// Scale change per pixel of vertical drag
    pub scale_sensitivity_fast: f32,
    pub scale_sensitivity_precise: f32,
    /// Lowest scale reachable by dragging
    pub drag_scale_floor: f32,
    /// Lowest scale reachable from the keyboard
    pub key_scale_floor: f32,
    pub min_images: usize,
    pub max_images: usize,
    pub thumbnail_size: u32,
    /// Offset between consecutive items of an imported batch
    pub cascade_offset: f32,
    pub zoom_base: f32,
    pub status_short_secs: f64,
    pub status_normal_secs: f64,
    pub status_long_secs: f64,
    pub status_error_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_step_fast: 10.0,
            move_step_precise: 1.0,
            rotate_step_fast: 15.0,
            rotate_step_precise: 1.0,
            scale_step_fast: 0.1,
            scale_step_precise: 0.01,
            scale_sensitivity_fast: 0.0005,
            scale_sensitivity_precise: 0.0001,
            drag_scale_floor: 0.05,
            key_scale_floor: 0.01,
            min_images: 2,
            max_images: 6,
            thumbnail_size: 150,
            cascade_offset: 20.0,
            zoom_base: 1.1,
            status_short_secs: 2.0,
            status_normal_secs: 3.0,
            status_long_secs: 5.0,
            status_error_secs: 7.0,
        }
    }
}

/// Step sizes resolved for one adjustment mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub move_by: f32,
    pub rotate_by: f32,
    pub scale_by: f32,
    pub scale_sensitivity: f32,
}

impl Settings {
    pub fn steps(&self, precise: bool) -> Steps {
        if precise {
            Steps {
                move_by: self.move_step_precise,
                rotate_by: self.rotate_step_precise,
                scale_by: self.scale_step_precise,
                scale_sensitivity: self.scale_sensitivity_precise,
            }
        } else {
            Steps {
                move_by: self.move_step_fast,
                rotate_by: self.rotate_step_fast,
                scale_by: self.scale_step_fast,
                scale_sensitivity: self.scale_sensitivity_fast,
            }
        }
    }

    pub fn import_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_images..=self.max_images
    }
}
