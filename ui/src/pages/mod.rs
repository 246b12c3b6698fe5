//! One function per route. Each takes the app [`State`](crate::state::State)
//! and draws into the central panel.

mod booking_detail;
mod bookings;
mod dashboard;
mod login;
mod new_booking;
mod trip_detail;
mod trip_form;
mod trips;
mod users;

pub use booking_detail::booking_detail_page;
pub use bookings::{booking_columns, bookings_page};
pub use dashboard::dashboard_page;
pub use login::login_page;
pub use new_booking::new_booking_page;
pub use trip_detail::trip_detail_page;
pub use trip_form::trip_form_page;
pub use trips::{trip_columns, trips_page};
pub use users::{user_columns, users_page};
