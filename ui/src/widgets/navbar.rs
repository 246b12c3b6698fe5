//! Top navigation bar shown on every signed-in page.

use egui::{Align, Layout, RichText, Ui};
use safari_business::{AuthCompute, LogoutCommand, Route, navigate};
use safari_states::{StateCtx, Time};

pub fn navbar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let current = state_ctx.state::<Route>().section();
    let now = *state_ctx.state::<Time>().as_ref();
    let user = state_ctx
        .compute::<AuthCompute>()
        .session_at(now)
        .map(|session| session.display_name().to_owned());

    let mut target = None;
    let mut logout = false;

    egui::MenuBar::new().ui(ui, |ui| {
        ui.label(RichText::new("Adventure Safari").strong().size(16.0));
        ui.separator();

        for route in Route::NAV {
            if ui
                .selectable_label(current.as_ref() == Some(&route), route.title())
                .clicked()
            {
                target = Some(route);
            }
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Logout").clicked() {
                logout = true;
            }
            if let Some(user) = &user {
                ui.label(user);
            }
        });
    });

    if let Some(route) = target {
        navigate(state_ctx, route);
    }
    if logout {
        state_ctx.dispatch::<LogoutCommand>();
    }
}
