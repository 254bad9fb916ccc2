use egui::{Context, Key, KeyboardShortcut, Modifiers, Vec2};

/// Keyboard actions on the active item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    /// Move by one step in the given unit direction
    Nudge(Vec2),
    RotateClockwise,
    RotateCounterClockwise,
    Grow,
    Shrink,
    NextItem,
    PreviousItem,
}

/// Window-level commands reachable from menus, toolbar and keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Import,
    Export,
    Quit,
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

// Shift+Tab precedes Tab: plain bindings also match when Shift is held.
const ITEM_BINDINGS: &[(Modifiers, Key, Shortcut)] = &[
    (Modifiers::SHIFT, Key::Tab, Shortcut::PreviousItem),
    (Modifiers::NONE, Key::Tab, Shortcut::NextItem),
    (Modifiers::NONE, Key::ArrowUp, Shortcut::Nudge(Vec2::new(0.0, -1.0))),
    (Modifiers::NONE, Key::ArrowDown, Shortcut::Nudge(Vec2::new(0.0, 1.0))),
    (Modifiers::NONE, Key::ArrowLeft, Shortcut::Nudge(Vec2::new(-1.0, 0.0))),
    (Modifiers::NONE, Key::ArrowRight, Shortcut::Nudge(Vec2::new(1.0, 0.0))),
    (Modifiers::NONE, Key::R, Shortcut::RotateClockwise),
    (Modifiers::NONE, Key::E, Shortcut::RotateCounterClockwise),
    (Modifiers::NONE, Key::Plus, Shortcut::Grow),
    (Modifiers::NONE, Key::Equals, Shortcut::Grow),
    (Modifiers::NONE, Key::Minus, Shortcut::Shrink),
];

const ACTION_BINDINGS: &[(KeyboardShortcut, Action)] = &[
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::O), Action::Import),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::S), Action::Export),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Q), Action::Quit),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus), Action::ZoomIn),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals), Action::ZoomIn),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus), Action::ZoomOut),
    (KeyboardShortcut::new(Modifiers::COMMAND, Key::Num0), Action::ResetZoom),
];

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Import => "Import Images…",
            Action::Export => "Export Composition…",
            Action::Quit => "Quit",
            Action::ZoomIn => "Zoom In",
            Action::ZoomOut => "Zoom Out",
            Action::ResetZoom => "Reset Zoom",
        }
    }

    /// First keyboard shortcut bound to this action, for menu hints
    pub fn shortcut(&self) -> Option<KeyboardShortcut> {
        ACTION_BINDINGS
            .iter()
            .find(|(_, action)| action == self)
            .map(|(shortcut, _)| *shortcut)
    }
}

/// Consumes item key presses of this frame, in binding order
pub fn poll_item_shortcuts(ctx: &Context) -> Vec<Shortcut> {
    ctx.input_mut(|i| {
        let mut pressed = Vec::new();
        for (modifiers, key, shortcut) in ITEM_BINDINGS {
            let count = i.count_and_consume_key(*modifiers, *key);
            pressed.extend(std::iter::repeat_n(*shortcut, count));
        }
        pressed
    })
}

/// Consumes window-level shortcuts of this frame
pub fn poll_actions(ctx: &Context) -> Vec<Action> {
    ctx.input_mut(|i| {
        ACTION_BINDINGS
            .iter()
            .filter(|(shortcut, _)| i.consume_shortcut(shortcut))
            .map(|(_, action)| *action)
            .collect()
    })
}
