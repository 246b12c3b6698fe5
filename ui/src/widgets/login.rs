//! Login form.
//!
//! Email and password go into [`LoginInput`]; submitting dispatches
//! [`LoginCommand`]. While the request runs the form is replaced by a spinner.

use egui::{Align, Layout, Response, RichText, TextEdit, Ui};
use safari_business::{AuthCompute, LoginCommand, LoginInput};
use safari_states::StateCtx;

use crate::utils::colors::COLOR_RED;

pub fn login_widget(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let auth = state_ctx.compute::<AuthCompute>();
    if auth.is_authenticating() {
        return show_loading(ui);
    }
    let error = auth.error().map(str::to_owned);
    show_login_form(state_ctx, ui, error.as_deref())
}

fn show_loading(ui: &mut Ui) -> Response {
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(60.0);
        ui.heading("Adventure Safari Admin");
        ui.add_space(40.0);

        ui.spinner();
        ui.label("Logging in...");
    })
    .response
}

fn show_login_form(state_ctx: &mut StateCtx, ui: &mut Ui, error: Option<&str>) -> Response {
    let input = state_ctx.state_mut::<LoginInput>();
    let mut should_login = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(60.0);
            ui.heading("Adventure Safari Admin");
            ui.label(RichText::new("Sign in to manage trips and bookings").weak());
            ui.add_space(30.0);

            if let Some(err) = error {
                ui.colored_label(COLOR_RED, err);
                ui.add_space(8.0);
            }

            egui::Grid::new("login_form")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Email:");
                    ui.add(
                        TextEdit::singleline(&mut input.email)
                            .hint_text("admin@example.com")
                            .desired_width(220.0),
                    );
                    ui.end_row();

                    ui.label("Password:");
                    let password = ui.add(
                        TextEdit::singleline(&mut input.password)
                            .password(true)
                            .desired_width(220.0),
                    );
                    if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        should_login = true;
                    }
                    ui.end_row();
                });

            ui.add_space(16.0);
            if ui.button("Login").clicked() {
                should_login = true;
            }
        })
        .response;

    if should_login {
        state_ctx.dispatch::<LoginCommand>();
    }

    response
}
