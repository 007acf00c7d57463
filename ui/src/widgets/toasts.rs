//! Bottom-right toast stack.

use chrono::{DateTime, TimeDelta, Utc};
use egui::{Align2, Color32, RichText, Ui};
use portal_business::{Severity, Toast};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME_SECS: i64 = 5;

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct ToastBoard {
    entries: Vec<(Toast, DateTime<Utc>)>,
}

impl ToastBoard {
    pub fn push(&mut self, toast: Toast, now: DateTime<Utc>) {
        self.entries.push((toast, now));
    }

    pub fn extend(&mut self, toasts: impl IntoIterator<Item = Toast>, now: DateTime<Utc>) {
        for toast in toasts {
            self.push(toast, now);
        }
    }

    /// Drops toasts older than [`TOAST_LIFETIME_SECS`].
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let lifetime = TimeDelta::seconds(TOAST_LIFETIME_SECS);
        self.entries.retain(|(_, shown_at)| now - *shown_at < lifetime);
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|(toast, _)| toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Success => Color32::from_rgb(34, 139, 34),
        Severity::Info => Color32::from_rgb(70, 130, 180),
        Severity::Warning => Color32::from_rgb(255, 165, 0),
        Severity::Error => Color32::RED,
    }
}

/// Renders the stack anchored to the bottom-right corner.
pub fn toasts(board: &ToastBoard, ui: &mut Ui) {
    if board.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toast_stack"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(ui.ctx(), |ui| {
            for toast in board.toasts() {
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, severity_color(toast.severity)))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&toast.title)
                                .strong()
                                .color(severity_color(toast.severity)),
                        );
                        ui.label(&toast.message);
                    });
                ui.add_space(4.0);
            }
        });

    ui.ctx()
        .request_repaint_after(std::time::Duration::from_millis(250));
}
