//! # Transient Notices
//!
//! The ephemeral, non-blocking message surface. At most one notice is
//! live at a time; it auto-dismisses after a fixed delay unless dismissed
//! early. The model is single-threaded, so expiry is a deadline checked
//! by `tick(now)` rather than a timer. Nothing waits on a notice.

use serde::{Deserialize, Serialize};

use cdesk_core::Timestamp;

/// How long a notice stays visible without being dismissed.
pub const NOTICE_TTL_SECS: i64 = 5;

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Message text, e.g. "2 files added, 1 updated".
    pub message: String,
    /// When the notice was posted.
    pub posted_at: Timestamp,
}

/// Holder for the single live notice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a notice, replacing any live one.
    pub fn post(&mut self, message: impl Into<String>, now: Timestamp) {
        self.current = Some(Notice {
            message: message.into(),
            posted_at: now,
        });
    }

    /// The live notice, if one has neither expired nor been dismissed.
    pub fn visible(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Dismiss the live notice early.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Expire the live notice once its delay has elapsed.
    pub fn tick(&mut self, now: Timestamp) {
        if let Some(notice) = &self.current {
            if now.secs_since(notice.posted_at) >= NOTICE_TTL_SECS {
                self.current = None;
            }
        }
    }
}
