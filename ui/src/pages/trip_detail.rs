use egui::{Align, Layout, RichText, Ui};
use safari_business::data_table::{ActionKind, Tone};
use safari_business::models::{Trip, format_date_time, format_price};
use safari_business::{LoadTripCommand, Remote, Route, TripDetail, navigate};
use ustr::Ustr;

use super::booking_detail::fields;
use super::trips::{action_notice, delete_confirmation, trip_action};
use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets;

fn trip_view(ui: &mut Ui, trip: &Trip) -> Option<ActionKind> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        ui.heading(trip.name.as_deref().unwrap_or("Untitled trip"));
        if trip.is_active {
            widgets::badge(ui, "Active", Tone::Success);
        } else {
            widgets::badge(ui, "Inactive", Tone::Danger);
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button(RichText::new("Delete").color(COLOR_RED)).clicked() {
                clicked = Some(ActionKind::Delete);
            }
            let toggle = if trip.is_active { "Deactivate" } else { "Activate" };
            if ui.button(toggle).clicked() {
                clicked = Some(ActionKind::Toggle);
            }
            if ui.button("Edit").clicked() {
                clicked = Some(ActionKind::Edit);
            }
        });
    });
    ui.label(RichText::new(format!("Trip ID: {}", trip.id)).weak());

    if let Some(image) = trip.image.as_deref().filter(|url| !url.is_empty()) {
        ui.add_space(8.0);
        ui.hyperlink_to("Cover image", image);
    }

    ui.add_space(12.0);
    ui.heading("Trip Details");
    ui.separator();

    let mut rows = vec![
        ("Destination", trip.destination.clone().unwrap_or_else(|| "N/A".to_owned())),
        ("Price", format_price(trip.price.unwrap_or_default())),
        (
            "Status",
            if trip.is_active { "Available for Booking" } else { "Not Available" }.to_owned(),
        ),
        (
            "Created On",
            trip.created_at.as_deref().map(format_date_time).unwrap_or_else(|| "N/A".to_owned()),
        ),
    ];
    if let Some(updated) = trip.last_updated() {
        rows.push(("Last Updated", format_date_time(updated)));
    }
    fields(ui, "trip_detail_fields", &rows);

    clicked
}

pub fn trip_detail_page(state: &mut State, ui: &mut Ui, id: Ustr) {
    let ctx = &mut state.ctx;
    if ctx.compute::<TripDetail>().needs_fetch(id) {
        ctx.dispatch::<LoadTripCommand>();
    }

    if ui.button("← Back to Trips").clicked() {
        navigate(ctx, Route::Trips);
        return;
    }
    ui.add_space(8.0);
    action_notice(ctx, ui);

    let mut clicked = None;
    let mut retry = false;
    match &ctx.compute::<TripDetail>().status {
        Remote::Idle | Remote::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading trip...");
            });
        }
        Remote::Error(message) => {
            ui.colored_label(COLOR_RED, format!("Error fetching trip: {message}"));
            retry = ui.button("Try Again").clicked();
        }
        Remote::Loaded(trip) => clicked = trip_view(ui, trip),
    }

    if retry {
        ctx.dispatch::<LoadTripCommand>();
    }
    if let Some(kind) = clicked {
        trip_action(ctx, kind, id);
    }

    delete_confirmation(ctx, ui);
}
