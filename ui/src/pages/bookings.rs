//! Booking management: totals and the searchable bookings table.

use egui::{Align, Layout, RichText, Ui};
use safari_business::data_table::{
    ActionKind, Cell, CellValue, Column, RowAction, TableRow as _, Tone,
};
use safari_business::models::{Booking, format_date, format_price};
use safari_business::{
    BookingStats, BookingsList, BookingsPage, RefreshBookingsCommand, Route, navigate,
};

use crate::state::State;
use crate::utils::colors::{COLOR_AMBER, COLOR_BLUE, COLOR_GREEN, COLOR_RED};
use crate::widgets::{self, DataTable};

fn date_or_na(value: &CellValue, _: &Booking) -> Cell {
    Cell::text(value.as_str().map_or_else(|| "N/A".to_owned(), format_date))
}

fn price(value: &CellValue, _: &Booking) -> Cell {
    Cell::text(format_price(value.as_f64().unwrap_or_default()))
}

pub fn status_tone(status: &str) -> Tone {
    match status.to_lowercase().as_str() {
        "confirmed" | "paid" => Tone::Success,
        "cancelled" | "failed" => Tone::Danger,
        "pending" => Tone::Warning,
        _ => Tone::Neutral,
    }
}

fn status_badge(value: &CellValue, _: &Booking) -> Cell {
    let text = value.as_str().unwrap_or("Pending");
    Cell::badge(text, status_tone(text))
}

pub fn booking_columns() -> Vec<Column<Booking>> {
    vec![
        Column::key("Booking ID", "bookingId")
            .with_cell(|value, _| Cell::text(value.as_str().unwrap_or("N/A"))),
        Column::derive("Customer Name", |b: &Booking| b.field("userId.name").or("N/A")),
        Column::derive("Email", |b: &Booking| b.field("userId.email").or("N/A")),
        Column::derive("Trip", |b: &Booking| b.field("tripId.name").or("Trip Deleted")),
        Column::key("View", "_id").with_cell(|value, _| {
            Cell::Actions(vec![RowAction::new(
                ActionKind::View,
                value.as_str().unwrap_or_default().into(),
                "View",
            )])
        }),
        Column::derive("Destination", |b: &Booking| b.field("tripId.destination").or("N/A")),
        Column::key("Booking Date", "bookingDate").with_cell(date_or_na),
        Column::key("Guests", "guests"),
        Column::key("Status", "bookingStatus").with_cell(status_badge),
        Column::key("Payment Status", "paymentStatus").with_cell(status_badge),
        Column::key("Registration Fee", "registrationPaymentDetails.amount").with_cell(price),
        Column::key("Trip Price", "tripId.price").with_cell(price),
        Column::key("Created On", "createdAt").with_cell(date_or_na),
    ]
}

pub fn bookings_page(state: &mut State, ui: &mut Ui) {
    let ctx = &mut state.ctx;
    if ctx.compute::<BookingsList>().status.is_idle() {
        ctx.dispatch::<RefreshBookingsCommand>();
    }

    let mut new_booking = false;
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Booking Management");
            ui.label(RichText::new("View and manage all customer bookings").weak());
        });
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            new_booking = ui.button("+ New Booking").clicked();
        });
    });
    ui.add_space(8.0);

    if new_booking {
        navigate(ctx, Route::NewBooking);
        return;
    }

    let list = ctx.compute::<BookingsList>();
    if list.status.is_loading() {
        ui.label("Loading bookings...");
        return;
    }
    if let Some(message) = list.status.error() {
        let mut retry = false;
        ui.horizontal(|ui| {
            ui.colored_label(COLOR_RED, format!("Error: {message}"));
            retry = ui.button("Try Again").clicked();
        });
        if retry {
            ctx.dispatch::<RefreshBookingsCommand>();
        }
        return;
    }

    let stats = ctx.compute::<BookingStats>();
    ui.horizontal_wrapped(|ui| {
        widgets::stat_card(ui, "Confirmed Bookings", &stats.confirmed.to_string(), COLOR_GREEN);
        widgets::stat_card(ui, "Pending Bookings", &stats.pending.to_string(), COLOR_AMBER);
        widgets::stat_card(ui, "Cancelled Bookings", &stats.cancelled.to_string(), COLOR_RED);
        widgets::stat_card(ui, "Total Revenue", &format_price(stats.revenue), COLOR_BLUE);
    });
    ui.add_space(12.0);

    let mut view = std::mem::take(&mut ctx.state_mut::<BookingsPage>().table);
    let list = ctx.compute::<BookingsList>();
    let columns = booking_columns();
    let actions = DataTable::builder()
        .id("bookings")
        .columns(&columns)
        .rows(list.rows())
        .revision(list.revision)
        .heading(format!("All Bookings ({})", list.rows().len()))
        .build()
        .show(ui, &mut view);
    ctx.state_mut::<BookingsPage>().table = view;

    if let Some(action) = actions.into_iter().find(|a| a.kind == ActionKind::View) {
        navigate(ctx, Route::BookingDetail(action.row_id));
    }
}
