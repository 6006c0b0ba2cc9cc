use std::time::{Duration, Instant};
use strum::{AsRefStr, Display, EnumIter};

/// How long an alert stays on screen unless dismissed earlier
pub const ALERT_DURATION: Duration = Duration::from_secs(5);

/// Where the "contact us" hint of an error alert links to
pub const CONTACT_PATH: &str = "/about";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    Error,
    Success,
    Info,
    Warning,
}

impl AlertStatus {
    pub fn default_message(&self) -> &'static str {
        match self {
            AlertStatus::Error => {
                "There was an error processing your request, please try again later."
            }
            AlertStatus::Success => "Your request was successful.",
            AlertStatus::Info => "This is an informational message.",
            AlertStatus::Warning => "This is a warning message.",
        }
    }
}

/// A transient status message, also used for toasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub status: AlertStatus,
    message: Option<String>,
    shown_at: Instant,
    dismissed: bool,
}

impl Alert {
    pub fn new(status: AlertStatus, message: Option<String>) -> Self {
        Self::shown_at(status, message, Instant::now())
    }

    pub fn shown_at(status: AlertStatus, message: Option<String>, shown_at: Instant) -> Self {
        Self {
            status,
            message,
            shown_at,
            dismissed: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertStatus::Error, Some(message.into()))
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertStatus::Success, Some(message.into()))
    }

    /// The custom message, or the default one for the status
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.status.default_message())
    }

    /// Error alerts without a custom message point the user to the contact page
    pub fn contact_hint(&self) -> Option<&'static str> {
        (self.status == AlertStatus::Error && self.message.is_none())
            .then_some("If the problem persists, please contact us")
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        !self.dismissed && now.saturating_duration_since(self.shown_at) < ALERT_DURATION
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}
