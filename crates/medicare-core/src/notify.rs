//! # Notices
//!
//! Advisory messages the engines send back to the user ("Added to cart",
//! "You can compare up to 4 products", ...). Presentation is someone else's
//! job; this module only defines the channel.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

/// Severity of a notice, mirrored by the toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Sink for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => warn!(message = %notice.message, "notice"),
            NoticeLevel::Success | NoticeLevel::Info => {
                info!(level = ?notice.level, message = %notice.message, "notice")
            }
        }
    }
}

/// Collects notices until drained, logging each one through
/// [`TracingNotifier`] on the way in.
///
/// The storefront attaches the drained notices to each command response.
#[derive(Debug, Default)]
pub struct NoticeBuffer {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *notices)
    }
}

impl Notifier for NoticeBuffer {
    fn notify(&self, notice: Notice) {
        TracingNotifier.notify(notice.clone());
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
