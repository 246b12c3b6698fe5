//! Form for booking a trip on behalf of a customer.

use egui::{ComboBox, RichText, TextEdit, Ui};
use safari_business::models::GuestInput;
use safari_business::{
    CreateBookingCommand, NewBookingCompute, NewBookingInput, RefreshTripsCommand,
    RefreshUsersCommand, Route, TripsList, UsersList, navigate,
};
use safari_states::StateCtx;
use ustr::Ustr;

use crate::state::State;
use crate::widgets;

/// `(id, label)` pairs for a picker.
type Options = Vec<(Ustr, String)>;

fn picker(
    ui: &mut Ui,
    salt: &str,
    placeholder: &str,
    options: &Options,
    selected: &mut Option<Ustr>,
) {
    let current = *selected;
    let text = current
        .and_then(|current| options.iter().find(|(id, _)| *id == current))
        .map_or(placeholder, |(_, label)| label.as_str())
        .to_owned();
    ComboBox::from_id_salt(salt)
        .width(320.0)
        .selected_text(text)
        .show_ui(ui, |ui| {
            for (id, label) in options {
                ui.selectable_value(selected, Some(*id), label.as_str());
            }
        });
}

fn guest_fields(ui: &mut Ui, index: usize, guest: &mut GuestInput, removable: bool) -> bool {
    let mut remove = false;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.strong(format!("Guest {}", index + 1));
            if removable && ui.small_button("Remove").clicked() {
                remove = true;
            }
        });
        egui::Grid::new(("guest_form", index))
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Full Name *");
                ui.add(TextEdit::singleline(&mut guest.name).hint_text("Enter full name"));
                ui.end_row();
                ui.label("Age *");
                ui.add(TextEdit::singleline(&mut guest.age).hint_text("Enter age"));
                ui.end_row();
                ui.label("Passport Number *");
                ui.add(
                    TextEdit::singleline(&mut guest.passport).hint_text("Enter passport number"),
                );
                ui.end_row();
            });
    });
    remove
}

fn options(ctx: &mut StateCtx) -> (Options, Options) {
    if ctx.compute::<UsersList>().status.is_idle() {
        ctx.dispatch::<RefreshUsersCommand>();
    }
    if ctx.compute::<TripsList>().status.is_idle() {
        ctx.dispatch::<RefreshTripsCommand>();
    }
    let users = ctx
        .compute::<UsersList>()
        .rows()
        .iter()
        .map(|user| (user.id, user.label()))
        .collect();
    let trips = ctx
        .compute::<TripsList>()
        .rows()
        .iter()
        .map(|trip| (trip.id, trip.label()))
        .collect();
    (users, trips)
}

pub fn new_booking_page(state: &mut State, ui: &mut Ui) {
    let ctx = &mut state.ctx;
    let (users, trips) = options(ctx);
    let status = ctx.compute::<NewBookingCompute>().status.clone();

    let mut back = false;
    let mut submit = false;

    ui.horizontal(|ui| {
        back = ui.button("← Back to Bookings").clicked();
        ui.heading("Create New Booking");
    });
    ui.add_space(8.0);

    if let Some(message) = status.message() {
        widgets::notice(ui, message, status.error().is_none());
        ui.add_space(6.0);
    }

    let input = ctx.state_mut::<NewBookingInput>();

    ui.label(RichText::new("Booking Information").strong());
    egui::Grid::new("booking_form")
        .num_columns(2)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            ui.label("Select Customer *");
            picker(ui, "customer", "Choose a customer", &users, &mut input.user_id);
            ui.end_row();
            ui.label("Select Trip *");
            picker(ui, "trip", "Choose a trip", &trips, &mut input.trip_id);
            ui.end_row();
            ui.label("Travel Date *");
            ui.add(TextEdit::singleline(&mut input.travel_date).hint_text("YYYY-MM-DD"));
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Guest Information").strong());
        if ui.button("Add Guest").clicked() {
            input.add_guest();
        }
    });

    let removable = input.guests.len() > 1;
    let mut remove = None;
    for (index, guest) in input.guests.iter_mut().enumerate() {
        if guest_fields(ui, index, guest, removable) {
            remove = Some(index);
        }
    }
    if let Some(index) = remove {
        input.remove_guest(index);
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            back = true;
        }
        if status.is_submitting() {
            ui.add_enabled(false, egui::Button::new("Creating Booking..."));
            ui.spinner();
        } else if ui.button("Create Booking").clicked() {
            submit = true;
        }
    });

    if submit {
        ctx.dispatch::<CreateBookingCommand>();
    }
    if back {
        navigate(ctx, Route::Bookings);
    }
}
