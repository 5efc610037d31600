//! Small stateless widgets: notification banner, row editor, delete confirmation.

use client_core::{GridRow, NotificationBanner, NotificationKind, PendingDelete};
use eframe::egui;
use shared::domain::EmployeeField;

use crate::controller::events::UiAction;

const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

/// Draws the banner when a notification is visible. Returns the dismiss action
/// when the user closes it by hand.
pub fn notification_banner(ui: &mut egui::Ui, banner: &NotificationBanner) -> Option<UiAction> {
    let notification = banner.current()?;
    let fill = match notification.kind {
        NotificationKind::Success => SUCCESS_FILL,
        NotificationKind::Error => ERROR_FILL,
    };

    let mut action = None;
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(16, 10))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&notification.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Dismiss").clicked() {
                        action = Some(UiAction::DismissNotification);
                    }
                });
            });
        });
    action
}

/// Renders one row's cells. Holds no state of its own: each cell edits a
/// scratch copy and reports the new value upward.
pub fn row_editor(
    ui: &mut egui::Ui,
    index: usize,
    row: &GridRow,
    selected: bool,
    actions: &mut Vec<UiAction>,
) {
    let record = row.record();

    match record.id {
        Some(id) => {
            let mut checked = selected;
            if ui.checkbox(&mut checked, "").changed() {
                actions.push(UiAction::ToggleRow(id));
            }
        }
        // Unsaved rows have nothing to delete on the server.
        None => {
            ui.add_enabled(false, egui::Checkbox::without_text(&mut false));
        }
    }

    ui.label(egui::RichText::new(record.display_id()).strong());

    for field in EmployeeField::ALL {
        let mut value = record.field(field).to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(field.placeholder())
                .desired_width(180.0),
        );
        if response.changed() {
            actions.push(UiAction::EditCell {
                index,
                field,
                value,
            });
        }
    }
}

/// Modal yes/no prompt for a pending delete. Escape or a click outside counts
/// as cancel.
pub fn confirm_delete_dialog(ctx: &egui::Context, pending: &PendingDelete) -> Option<UiAction> {
    let mut answer = None;
    let modal = egui::Modal::new(egui::Id::new("confirm_delete_modal")).show(ctx, |ui| {
        ui.heading("Confirm delete");
        ui.add_space(4.0);
        ui.label(pending.prompt());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(format!("{} selected", pending.ids().len())).weak());
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let delete =
                egui::Button::new(egui::RichText::new("Delete").color(egui::Color32::WHITE))
                    .fill(ERROR_FILL);
            if ui.add(delete).clicked() {
                answer = Some(UiAction::AnswerDelete(true));
            }
            if ui.button("Cancel").clicked() {
                answer = Some(UiAction::AnswerDelete(false));
            }
        });
    });
    if answer.is_none() && modal.should_close() {
        answer = Some(UiAction::AnswerDelete(false));
    }
    answer
}
