//! Trip management: totals, the trips table and its row actions.

use egui::{Align, Layout, RichText, Ui};
use safari_business::data_table::{ActionKind, Cell, CellValue, Column, RowAction, Tone};
use safari_business::models::{Trip, format_date, format_price};
use safari_business::{
    DeleteTripCommand, RefreshTripsCommand, Route, ToggleTripCommand, TripActionCompute,
    TripActionInput, TripStats, TripsList, TripsPage, navigate,
};
use safari_states::StateCtx;
use ustr::Ustr;

use crate::state::State;
use crate::utils::colors::{COLOR_AMBER, COLOR_BLUE, COLOR_GREEN, COLOR_RED};
use crate::widgets::{self, DataTable};

fn actions(value: &CellValue, trip: &Trip) -> Cell {
    let id = Ustr::from(value.as_str().unwrap_or_default());
    let toggle = if trip.is_active { "Deactivate" } else { "Activate" };
    Cell::Actions(vec![
        RowAction::new(ActionKind::View, id, "View"),
        RowAction::new(ActionKind::Edit, id, "Edit"),
        RowAction::new(ActionKind::Toggle, id, toggle),
        RowAction::new(ActionKind::Delete, id, "Delete"),
    ])
}

pub fn trip_columns() -> Vec<Column<Trip>> {
    vec![
        Column::key("Trip Name", "name"),
        Column::key("Destination", "destination"),
        Column::key("Price", "price")
            .with_cell(|value, _| Cell::text(format_price(value.as_f64().unwrap_or_default()))),
        Column::key("Status", "isActive").with_cell(|value, _| {
            if value.as_bool() == Some(true) {
                Cell::badge("Active", Tone::Success)
            } else {
                Cell::badge("Inactive", Tone::Danger)
            }
        }),
        Column::key("Created", "createdAt")
            .with_cell(|value, _| Cell::text(value.as_str().map(format_date).unwrap_or_default())),
        Column::key("Actions", "_id").with_cell(actions),
    ]
}

/// Carries out a row or detail-page action on trip `id`. Delete only opens the
/// confirmation dialog.
pub fn trip_action(ctx: &mut StateCtx, kind: ActionKind, id: Ustr) {
    match kind {
        ActionKind::View => navigate(ctx, Route::TripDetail(id)),
        ActionKind::Edit => navigate(ctx, Route::TripForm(Some(id))),
        ActionKind::Toggle => {
            ctx.state_mut::<TripActionInput>().target = Some(id);
            ctx.dispatch::<ToggleTripCommand>();
        }
        ActionKind::Delete => ctx.state_mut::<TripsPage>().confirm_delete = Some(id),
    }
}

/// "Are you sure" dialog for a pending delete.
pub fn delete_confirmation(ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(id) = ctx.state::<TripsPage>().confirm_delete else {
        return;
    };

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Delete Trip")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label("Are you sure you want to delete this trip?");
            ui.label("This action cannot be undone.");
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                confirmed = ui
                    .button(RichText::new("Yes, delete").color(COLOR_RED))
                    .clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        ctx.state_mut::<TripActionInput>().target = Some(id);
        ctx.dispatch::<DeleteTripCommand>();
    }
    if confirmed || cancelled || !open {
        ctx.state_mut::<TripsPage>().confirm_delete = None;
    }
}

/// Outcome of the last toggle or delete.
pub fn action_notice(ctx: &StateCtx, ui: &mut Ui) {
    let status = &ctx.compute::<TripActionCompute>().status;
    if let Some(message) = status.message() {
        widgets::notice(ui, message, status.error().is_none());
    }
}

pub fn trips_page(state: &mut State, ui: &mut Ui) {
    let ctx = &mut state.ctx;
    if ctx.compute::<TripsList>().status.is_idle() {
        ctx.dispatch::<RefreshTripsCommand>();
    }

    let mut add = false;
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Trip Management");
            ui.label(RichText::new("Manage all your travel destinations and packages").weak());
        });
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            add = ui.button("Add New Trip").clicked();
        });
    });
    ui.add_space(8.0);

    if add {
        navigate(ctx, Route::TripForm(None));
        return;
    }

    action_notice(ctx, ui);

    let list = ctx.compute::<TripsList>();
    if list.status.is_loading() {
        ui.label("Loading trips...");
        return;
    }
    if let Some(message) = list.status.error() {
        let mut retry = false;
        ui.horizontal(|ui| {
            ui.colored_label(COLOR_RED, format!("Error: {message}"));
            retry = ui.button("Try Again").clicked();
        });
        if retry {
            ctx.dispatch::<RefreshTripsCommand>();
        }
        return;
    }

    let stats = ctx.compute::<TripStats>();
    ui.horizontal_wrapped(|ui| {
        widgets::stat_card(ui, "Total Trips", &stats.total.to_string(), COLOR_BLUE);
        widgets::stat_card(ui, "Active Trips", &stats.active.to_string(), COLOR_GREEN);
        widgets::stat_card(ui, "Inactive Trips", &stats.inactive.to_string(), COLOR_AMBER);
        widgets::stat_card(ui, "Total Value", &format_price(stats.total_value), COLOR_BLUE);
    });
    ui.add_space(12.0);

    let mut view = std::mem::take(&mut ctx.state_mut::<TripsPage>().table);
    let list = ctx.compute::<TripsList>();
    let columns = trip_columns();
    let clicked = DataTable::builder()
        .id("trips")
        .columns(&columns)
        .rows(list.rows())
        .revision(list.revision)
        .heading(format!("All Trips ({})", list.rows().len()))
        .build()
        .show(ui, &mut view);
    ctx.state_mut::<TripsPage>().table = view;

    if let Some(action) = clicked.into_iter().next() {
        trip_action(ctx, action.kind, action.row_id);
    }

    delete_confirmation(ctx, ui);
}
