//! Screen panels: navigation header, toolbar, and the employee grid.

use client_core::GridController;
use eframe::egui;
use shared::domain::EmployeeField;

use crate::controller::events::UiAction;
use crate::ui::widgets::row_editor;

pub const APP_TITLE: &str = "Employee App";

const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);

pub fn show_header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("app_header")
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(HEADER_FILL)
                .inner_margin(egui::Margin::symmetric(16, 12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(APP_TITLE)
                        .size(22.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
        });
}

pub fn show_toolbar(ui: &mut egui::Ui, grid: &GridController, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        if grid.is_loading() {
            ui.spinner();
            ui.label("Loading employees...");
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!grid.is_deleting(), egui::Button::new("Delete"))
                .clicked()
            {
                actions.push(UiAction::Delete);
            }
            if ui
                .add_enabled(!grid.is_saving(), egui::Button::new("Save"))
                .clicked()
            {
                actions.push(UiAction::Save);
            }
            if ui
                .add_enabled(!grid.is_loading(), egui::Button::new("Reload"))
                .clicked()
            {
                actions.push(UiAction::Reload);
            }
        });
    });
}

pub fn show_employee_grid(ui: &mut egui::Ui, grid: &GridController, actions: &mut Vec<UiAction>) {
    let highlighted: Vec<bool> = grid
        .records()
        .map(|record| record.id.is_some_and(|id| grid.is_selected(id)))
        .collect();

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("employee_grid")
                .num_columns(2 + EmployeeField::ALL.len())
                .spacing([16.0, 8.0])
                .with_row_color(move |row, style| match row {
                    0 => Some(style.visuals.faint_bg_color),
                    row if highlighted.get(row - 1).copied().unwrap_or(false) => {
                        Some(style.visuals.selection.bg_fill.gamma_multiply(0.35))
                    }
                    _ => None,
                })
                .show(ui, |ui| {
                    let mut all_selected = grid.all_selected();
                    if ui.checkbox(&mut all_selected, "").changed() {
                        actions.push(UiAction::ToggleSelectAll);
                    }
                    ui.strong("Employee ID");
                    for field in EmployeeField::ALL {
                        ui.strong(field.column_title());
                    }
                    ui.end_row();

                    for (index, row) in grid.rows().iter().enumerate() {
                        let selected = row.record().id.is_some_and(|id| grid.is_selected(id));
                        row_editor(ui, index, row, selected, actions);
                        ui.end_row();
                    }
                });
        });

    if grid.is_empty() && !grid.is_loading() {
        ui.label(egui::RichText::new("No employees yet.").weak());
    }

    ui.add_space(8.0);
    if ui
        .button(egui::RichText::new("+").size(18.0))
        .on_hover_text("Add row")
        .clicked()
    {
        actions.push(UiAction::AddRow);
    }
}
