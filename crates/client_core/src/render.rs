//! Render models shared by the views. These describe what a front end must
//! show; styling and widgets are up to the front end.

use chrono::{DateTime, FixedOffset, Utc};
use shared::protocol::FlashNotice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashBanner {
    pub kind: FlashKind,
    pub message: String,
}

/// Success first, then error, matching the order both are shown in.
pub fn flash_banners(flash: Option<&FlashNotice>) -> Vec<FlashBanner> {
    let Some(flash) = flash else {
        return Vec::new();
    };
    let mut banners = Vec::new();
    if let Some(message) = flash.success.as_deref().filter(|m| !m.is_empty()) {
        banners.push(FlashBanner {
            kind: FlashKind::Success,
            message: message.to_string(),
        });
    }
    if let Some(message) = flash.error.as_deref().filter(|m| !m.is_empty()) {
        banners.push(FlashBanner {
            kind: FlashKind::Error,
            message: message.to_string(),
        });
    }
    banners
}

/// `3/5/2024`
pub fn short_date(at: &DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%-m/%-d/%Y").to_string()
}

/// `March 5, 2024 at 02:07 PM`
pub fn long_date_time(at: &DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%B %-d, %Y at %I:%M %p")
        .to_string()
}
