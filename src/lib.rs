#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod composition;
pub mod error;
pub mod export;
pub mod import;
pub mod item;
pub mod manipulation;
pub mod panels;
pub mod settings;
pub mod shortcuts;
pub mod status;
pub mod thumbnail;
pub mod transform;
pub mod view;

pub use app::ComposerApp;
pub use composition::{Composition, ControlsView, ImportReport, PressOutcome, ThumbnailRow};
pub use error::{ComposerError, ComposerResult};
pub use import::{ImportBatch, ImportFailure};
pub use item::{CanvasItem, ItemId};
pub use manipulation::{DragKind, Manipulation};
pub use settings::Settings;
pub use shortcuts::{Action, Shortcut};
pub use transform::ItemTransform;
pub use view::CanvasView;
