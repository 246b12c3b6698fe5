//! Registered customers.

use egui::Ui;
use safari_business::data_table::{Cell, CellValue, Column, Tone};
use safari_business::models::{User, format_date};
use safari_business::{RefreshUsersCommand, UsersList, UsersPage};

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets::DataTable;

fn yes_no(value: &CellValue, _: &User) -> Cell {
    if value.as_bool() == Some(true) {
        Cell::badge("Yes", Tone::Success)
    } else {
        Cell::badge("No", Tone::Danger)
    }
}

pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::key("Name", "name"),
        Column::key("Email", "email"),
        Column::derive("Bookings", |user: &User| user.booking_count.unwrap_or(0).into()),
        Column::key("Verified", "isVerified").with_cell(yes_no),
        Column::key("Payment Done", "isRegistrationPayment").with_cell(yes_no),
        Column::key("Passport Uploaded", "isPasswordUpload").with_cell(yes_no),
        Column::key("Joined Date", "createdAt")
            .with_cell(|value, _| Cell::text(value.as_str().map(format_date).unwrap_or_default())),
    ]
}

pub fn users_page(state: &mut State, ui: &mut Ui) {
    let ctx = &mut state.ctx;
    if ctx.compute::<UsersList>().status.is_idle() {
        ctx.dispatch::<RefreshUsersCommand>();
    }

    let mut view = std::mem::take(&mut ctx.state_mut::<UsersPage>().table);
    let list = ctx.compute::<UsersList>();

    if list.status.is_loading() {
        ui.spinner();
    }
    let mut retry = false;
    if let Some(message) = list.status.error() {
        ui.horizontal(|ui| {
            ui.colored_label(COLOR_RED, format!("Error loading users: {message}"));
            retry = ui.button("Try Again").clicked();
        });
    }

    let columns = user_columns();
    DataTable::builder()
        .id("users")
        .columns(&columns)
        .rows(list.rows())
        .revision(list.revision)
        .heading(format!("All Users ({})", list.rows().len()))
        .show_search(false)
        .show_entries(false)
        .show_pagination(false)
        .build()
        .show(ui, &mut view);

    ctx.state_mut::<UsersPage>().table = view;
    if retry {
        ctx.dispatch::<RefreshUsersCommand>();
    }
}
