//! Create and edit form for trips. Editing loads the trip first and prefills
//! the fields from it.

use egui::{RichText, TextEdit, Ui};
use safari_business::{
    LoadTripCommand, Route, SaveTripCommand, TripDetail, TripFormCompute, TripFormInput, navigate,
};
use ustr::Ustr;

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets;

pub fn trip_form_page(state: &mut State, ui: &mut Ui, target: Option<Ustr>) {
    let ctx = &mut state.ctx;

    let input = ctx.state::<TripFormInput>();
    if !input.initialized || input.editing != target {
        *ctx.state_mut::<TripFormInput>() = TripFormInput::for_target(target);
        if target.is_some() {
            ctx.dispatch::<LoadTripCommand>();
        }
    }

    let mut back = false;
    ui.horizontal(|ui| {
        back = ui.button("← Back to Trips").clicked();
        ui.heading(if target.is_some() { "Edit Trip" } else { "Create New Trip" });
    });
    ui.add_space(8.0);

    if back {
        navigate(ctx, Route::Trips);
        return;
    }

    if let Some(id) = target {
        let detail = ctx.compute::<TripDetail>();
        if detail.id != Some(id) || detail.status.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading trip data...");
            });
            return;
        }
        if let Some(message) = detail.status.error() {
            ui.colored_label(COLOR_RED, format!("Error fetching trip: {message}"));
            return;
        }
    }

    let status = ctx.compute::<TripFormCompute>().status.clone();
    if let Some(message) = status.message() {
        widgets::notice(ui, message, status.error().is_none());
        ui.add_space(6.0);
    }

    let input = ctx.state_mut::<TripFormInput>();
    ui.label(RichText::new("Trip Information").strong());
    egui::Grid::new("trip_form")
        .num_columns(2)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            ui.label("Trip Name *");
            ui.add(
                TextEdit::singleline(&mut input.name)
                    .hint_text("e.g., African Safari Adventure")
                    .desired_width(320.0),
            );
            ui.end_row();
            ui.label("Destination *");
            ui.add(
                TextEdit::singleline(&mut input.destination)
                    .hint_text("e.g., Kenya, Tanzania")
                    .desired_width(320.0),
            );
            ui.end_row();
            ui.label("Price ($) *");
            ui.add(TextEdit::singleline(&mut input.price).hint_text("e.g., 2500"));
            ui.end_row();
            ui.label("Image URL *");
            ui.add(
                TextEdit::singleline(&mut input.image)
                    .hint_text("https://example.com/image.jpg")
                    .desired_width(320.0),
            );
            ui.end_row();
            ui.label("Status");
            ui.checkbox(&mut input.is_active, "Active (Trip is available for booking)");
            ui.end_row();
        });

    let mut submit = false;
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        back = ui.button("Cancel").clicked();
        if status.is_submitting() {
            ui.add_enabled(false, egui::Button::new("Saving..."));
            ui.spinner();
        } else {
            let label = if target.is_some() { "Update Trip" } else { "Create Trip" };
            submit = ui.button(label).clicked();
        }
    });

    if submit {
        ctx.dispatch::<SaveTripCommand>();
    }
    if back {
        navigate(ctx, Route::Trips);
    }
}
