//! User-facing outcome messages of the operations layer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    Info,
    Success,
    Error,
}

/// A short message to surface to the user, with how long to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub status: NoticeStatus,
    pub duration_ms: u64,
    pub closable: bool,
}

impl Notice {
    const DEFAULT_DURATION_MS: u64 = 3000;

    pub fn info(title: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            status: NoticeStatus::Info,
            duration_ms: Self::DEFAULT_DURATION_MS,
            closable: true,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Notice {
            status: NoticeStatus::Success,
            ..Self::info(title)
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Notice {
            status: NoticeStatus::Error,
            ..Self::info(title)
        }
    }

    pub fn with_duration(self, duration_ms: u64) -> Self {
        Notice {
            duration_ms,
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == NoticeStatus::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
