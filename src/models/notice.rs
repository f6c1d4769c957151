//! User-facing notices and confirmation prompts produced by the list controller.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Info => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error!",
        }
    }
}

/// A blocking message shown after an action.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.title(), self.text)
    }
}

/// Opaque handle for a pending confirmation.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfirmationToken(Uuid);

impl ConfirmationToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConfirmationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question put to the user before a status change or update is sent.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub token: ConfirmationToken,
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Result of a controller action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action finished; show the notice if there is one.
    Done(Option<Notice>),

    /// The action waits for the user to accept or decline.
    NeedsConfirmation(ConfirmationRequest),
}

impl Outcome {
    pub fn silent() -> Self {
        Self::Done(None)
    }

    pub fn notice(notice: Notice) -> Self {
        Self::Done(Some(notice))
    }

    pub fn as_notice(&self) -> Option<&Notice> {
        match self {
            Self::Done(notice) => notice.as_ref(),
            Self::NeedsConfirmation(_) => None,
        }
    }
}
