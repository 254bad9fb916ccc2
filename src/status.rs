/// A message that disappears once `expires_at` has passed
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: f64,
}

/// Status bar: a transient message plus the permanent active-image label
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    message: Option<StatusMessage>,
    active_name: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` for `secs` seconds from `now`, replacing any current message
    pub fn show(&mut self, text: impl Into<String>, now: f64, secs: f64) {
        let text = text.into();
        log::info!("status: {}", text);
        self.message = Some(StatusMessage {
            text,
            expires_at: now + secs,
        });
    }

    /// The transient message still visible at `now`
    pub fn message(&self, now: f64) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| now < m.expires_at)
            .map(|m| m.text.as_str())
    }

    /// Seconds until the current message expires, for scheduling a repaint
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.message
            .as_ref()
            .map(|m| m.expires_at - now)
            .filter(|r| *r > 0.0)
    }

    pub fn set_active_name(&mut self, name: Option<&str>) {
        self.active_name = name.map(str::to_owned);
    }

    pub fn active_label(&self) -> String {
        match &self.active_name {
            Some(name) => format!("Active: {name}"),
            None => "No active image".to_owned(),
        }
    }
}
