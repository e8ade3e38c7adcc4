/// One-time user-visible notices
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn access_denied() -> Self {
        Self {
            title: "Access Denied".to_string(),
            message: "Please log in to access the requested page.".to_string(),
            level: NoticeLevel::Warning,
        }
    }

    pub fn logged_out() -> Self {
        Self {
            title: "Logout Successful".to_string(),
            message: "You have successfully logged out. Redirecting to login page...".to_string(),
            level: NoticeLevel::Success,
        }
    }
}

/// Pending notices, drained by whoever displays them
#[derive(Default)]
pub struct NoticeBoard {
    pending: Mutex<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notice: Notice) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
