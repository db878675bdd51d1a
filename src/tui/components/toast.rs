//! Transient confirmation/failure overlay.
//!
//! Floats in the bottom-right corner for a couple of seconds, then the
//! app drops it on the next tick.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Visual flavor of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation, rendered with the highlight border
    Info,
    /// Failure, rendered with the danger border
    Error,
}

/// A short-lived notification
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration: Duration::from_millis(2500),
        }
    }

    /// True once the display window has passed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Draw the toast over whatever occupies the bottom-right corner.
    ///
    /// `Clear` wipes the cells first so the underlying view does not bleed
    /// through. The width is measured in display columns, not bytes,
    /// because messages carry Korean restaurant and member names.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 4 extra columns for padding and border
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;
        let toast_area = Rect::new(
            area.right().saturating_sub(width + 2),
            area.bottom().saturating_sub(height + 2),
            width,
            height,
        );

        let border_color = match self.kind {
            ToastKind::Info => theme.highlight,
            ToastKind::Error => theme.danger,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_toast_is_not_expired() {
        let toast = Toast::info("✓ Member updated");
        assert!(!toast.is_expired());
        assert_eq!(toast.kind, ToastKind::Info);
    }

    #[test]
    fn test_error_toast_kind() {
        let toast = Toast::error("✗ Failed to load members");
        assert_eq!(toast.kind, ToastKind::Error);
    }
}
