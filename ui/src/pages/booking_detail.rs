//! Everything stored for one booking, grouped into sections.

use egui::{Align, Layout, RichText, ScrollArea, Ui};
use safari_business::models::{
    Booking, Guest, PENDING, format_date, format_date_time, format_price, or_pending,
};
use safari_business::{BookingDetail, LoadBookingCommand, Remote, Route, navigate};
use ustr::Ustr;

use super::bookings::status_tone;
use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets;

fn date(value: Option<&str>) -> String {
    value.map_or_else(|| PENDING.to_owned(), format_date)
}

fn date_time(value: Option<&str>) -> String {
    value.map_or_else(|| PENDING.to_owned(), format_date_time)
}

fn document(value: Option<&str>) -> String {
    if value.is_some_and(|link| !link.is_empty()) {
        "Uploaded".to_owned()
    } else {
        PENDING.to_owned()
    }
}

/// Two-column label / value grid.
pub fn fields(ui: &mut Ui, id: impl std::hash::Hash, rows: &[(&str, String)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.label(RichText::new(*label).weak());
                ui.label(value);
                ui.end_row();
            }
        });
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.add_space(12.0);
    ui.heading(title);
    ui.separator();
    add_contents(ui);
}

pub fn booking_detail_page(state: &mut State, ui: &mut Ui, id: Ustr) {
    let ctx = &mut state.ctx;
    if ctx.compute::<BookingDetail>().needs_fetch(id) {
        ctx.dispatch::<LoadBookingCommand>();
    }

    let mut back = false;
    let mut retry = false;

    match &ctx.compute::<BookingDetail>().status {
        Remote::Idle | Remote::Loading => {
            ui.spinner();
        }
        Remote::Error(message) => {
            ui.colored_label(COLOR_RED, format!("Error: {message}"));
            ui.horizontal(|ui| {
                retry = ui.button("Try Again").clicked();
                back = ui.button("Back to Bookings").clicked();
            });
        }
        Remote::Loaded(booking) => {
            back = booking_view(ui, booking);
        }
    }

    if retry {
        ctx.dispatch::<LoadBookingCommand>();
    }
    if back {
        navigate(ctx, Route::Bookings);
    }
}

/// Returns whether "Back to Bookings" was clicked.
fn booking_view(ui: &mut Ui, booking: &Booking) -> bool {
    let mut back = false;

    ui.horizontal(|ui| {
        back = ui.button("← Back to Bookings").clicked();
        ui.vertical(|ui| {
            ui.heading("Booking Details");
            ui.label(format!("ID: {}", or_pending(booking.booking_id.as_deref())));
        });
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let status = or_pending(booking.booking_status.as_deref());
            widgets::badge(ui, &status, status_tone(&status));
        });
    });

    ScrollArea::vertical().show(ui, |ui| {
        let user = booking.user.clone().unwrap_or_default();
        section(ui, "Customer Information", |ui| {
            fields(ui, "customer", &[
                ("User ID", or_pending(Some(user.id.as_str()))),
                ("Name", or_pending(user.name.as_deref())),
                ("Email", or_pending(user.email.as_deref())),
                ("Phone", or_pending(user.phone.as_deref())),
            ]);
        });

        let trip = booking.trip.clone().unwrap_or_default();
        section(ui, "Trip Information", |ui| {
            fields(ui, "trip", &[
                ("Trip ID", or_pending(Some(trip.id.as_str()))),
                ("Trip Name", or_pending(trip.name.as_deref())),
                ("Destination", or_pending(trip.destination.as_deref())),
                (
                    "Trip Price (per person)",
                    trip.price.map_or_else(|| PENDING.to_owned(), format_price),
                ),
            ]);
        });

        section(ui, "Booking Information", |ui| {
            fields(ui, "booking", &[
                ("Record ID", booking.id.to_string()),
                ("Booking ID", or_pending(booking.booking_id.as_deref())),
                ("Booking Date", date(booking.booking_date.as_deref())),
                ("Total Guests", booking.guests.len().to_string()),
                ("Booking Status", or_pending(booking.booking_status.as_deref())),
                ("Payment Status", or_pending(booking.payment_status.as_deref())),
                (
                    "Acknowledged",
                    match booking.acknowledge {
                        Some(true) => "Yes".to_owned(),
                        Some(false) => "No".to_owned(),
                        None => PENDING.to_owned(),
                    },
                ),
                ("Created At", date_time(booking.created_at.as_deref())),
                ("Last Updated", date_time(booking.updated_at.as_deref())),
                (
                    "Version",
                    booking
                        .version
                        .map_or_else(|| PENDING.to_owned(), |v| v.to_string()),
                ),
            ]);
        });

        let payment = booking.registration_payment_details.clone().unwrap_or_default();
        section(ui, "Registration Payment Details", |ui| {
            fields(ui, "payment", &[
                ("Transaction ID", or_pending(payment.transaction_id.as_deref())),
                ("Payment Status", or_pending(payment.status.as_deref())),
                (
                    "Amount",
                    match payment.amount {
                        Some(amount) => format!(
                            "{} {}",
                            format_price(amount),
                            payment.currency.as_deref().unwrap_or_default()
                        )
                        .trim_end()
                        .to_owned(),
                        None => PENDING.to_owned(),
                    },
                ),
                ("Payment Date", date_time(payment.payment_date.as_deref())),
                ("Payer Name", or_pending(payment.payer_name.as_deref())),
                ("Payer Email", or_pending(payment.payer_email.as_deref())),
            ]);
        });

        section(ui, &format!("Guest Details ({})", booking.guests.len()), |ui| {
            if booking.guests.is_empty() {
                ui.label("No guests added");
            }
            for (index, guest) in booking.guests.iter().enumerate() {
                guest_card(ui, index, guest);
            }
        });
    });

    back
}

fn guest_card(ui: &mut Ui, index: usize, guest: &Guest) {
    egui::CollapsingHeader::new(format!(
        "Guest {} (Age: {})",
        index + 1,
        or_pending(guest.age.as_deref())
    ))
    .id_salt(("guest", index))
    .default_open(true)
    .show(ui, |ui| {
        ui.strong("Basic Information");
        fields(ui, ("guest_basic", index), &[
            ("Name", or_pending(guest.name.as_deref())),
            ("Gender", or_pending(guest.gender.as_deref())),
            ("Phone", or_pending(guest.phone.as_deref())),
            ("Country", or_pending(guest.country.as_deref())),
            ("State", or_pending(guest.state.as_deref())),
            ("Address", or_pending(guest.address.as_deref())),
        ]);
        ui.add_space(6.0);
        ui.strong("Passport Information");
        fields(ui, ("guest_passport", index), &[
            ("Passport Number", or_pending(guest.passport_number.as_deref())),
            ("Passport Country", or_pending(guest.passport_country.as_deref())),
            ("Issued On", date(guest.passport_issued_on.as_deref())),
            ("Expires On", date(guest.passport_expires_on.as_deref())),
        ]);
        ui.add_space(6.0);
        ui.strong("Emergency Contact");
        fields(ui, ("guest_emergency", index), &[
            ("Contact Name", or_pending(guest.emergency_contact_name.as_deref())),
            ("Contact Number", or_pending(guest.emergency_contact_number.as_deref())),
        ]);
        ui.add_space(6.0);
        ui.strong("Uploaded Documents");
        fields(ui, ("guest_documents", index), &[
            ("Passport Copy", document(guest.passport.as_deref())),
            ("Medical Certificate", document(guest.medical_certificate.as_deref())),
            ("Travel Insurance", document(guest.travel_insurance.as_deref())),
        ]);
    });
}
