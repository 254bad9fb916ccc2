mod central_panel;
mod controls_panel;
mod menu_bar;
mod status_bar;
mod thumbnails_panel;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use menu_bar::menu_bar;
pub use status_bar::status_bar;
pub use thumbnails_panel::thumbnails_panel;
