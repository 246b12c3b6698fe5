//! Overview cards and the two activity series from `/dashboard/stats`.

use egui::Ui;
use safari_business::{DashboardCompute, RefreshDashboardCommand, Remote};

use crate::state::State;
use crate::utils::colors::{COLOR_BLUE, COLOR_GREEN, COLOR_RED};
use crate::widgets;

pub fn dashboard_page(state: &mut State, ui: &mut Ui) {
    let ctx = &mut state.ctx;
    if ctx.compute::<DashboardCompute>().status.is_idle() {
        ctx.dispatch::<RefreshDashboardCommand>();
    }

    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        if ui.button("Refresh").clicked() {
            ctx.dispatch::<RefreshDashboardCommand>();
        }
    });
    ui.add_space(8.0);

    let stats = match &ctx.compute::<DashboardCompute>().status {
        Remote::Idle | Remote::Loading => {
            ui.spinner();
            return;
        }
        Remote::Error(message) => {
            ui.colored_label(COLOR_RED, format!("Error loading dashboard: {message}"));
            return;
        }
        Remote::Loaded(stats) => stats,
    };

    ui.horizontal_wrapped(|ui| {
        for card in &stats.card_data {
            widgets::stat_card(
                ui,
                &card.title,
                card.value.as_deref().unwrap_or("0"),
                COLOR_BLUE,
            );
        }
    });
    ui.add_space(16.0);

    let growth: Vec<(String, u64)> = stats
        .user_growth_data
        .iter()
        .map(|point| (point.month.clone(), point.users))
        .collect();
    let weekly: Vec<(String, u64)> = stats
        .weekly_bookings_data
        .iter()
        .map(|point| (point.day.clone(), point.bookings))
        .collect();

    ui.columns(2, |columns| {
        widgets::bar_series(&mut columns[0], "User Growth", &growth, COLOR_GREEN);
        widgets::bar_series(&mut columns[1], "Weekly Bookings", &weekly, COLOR_BLUE);
    });
}
