//! Which page the console shows.

use safari_states::State;
use serde::{Deserialize, Serialize};
use ustr::Ustr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Login,
    Dashboard,
    Users,
    Bookings,
    BookingDetail(Ustr),
    NewBooking,
    Trips,
    TripDetail(Ustr),
    /// `None` creates a trip, `Some(id)` edits one.
    TripForm(Option<Ustr>),
}

impl Route {
    /// Navbar entry the route belongs to.
    pub fn section(&self) -> Option<Self> {
        match self {
            Self::Login => None,
            Self::Dashboard => Some(Self::Dashboard),
            Self::Users => Some(Self::Users),
            Self::Bookings | Self::BookingDetail(_) | Self::NewBooking => Some(Self::Bookings),
            Self::Trips | Self::TripDetail(_) | Self::TripForm(_) => Some(Self::Trips),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Bookings => "Bookings",
            Self::BookingDetail(_) => "Booking Details",
            Self::NewBooking => "New Booking",
            Self::Trips => "Trips",
            Self::TripDetail(_) => "Trip Details",
            Self::TripForm(None) => "Add New Trip",
            Self::TripForm(Some(_)) => "Edit Trip",
        }
    }

    pub const NAV: [Self; 4] = [Self::Dashboard, Self::Users, Self::Bookings, Self::Trips];
}

impl State for Route {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_route_is_login() {
        assert_eq!(Route::default(), Route::Login);
    }

    #[test]
    fn nested_pages_highlight_their_section() {
        let id = Ustr::from("t1");
        assert_eq!(Route::TripForm(Some(id)).section(), Some(Route::Trips));
        assert_eq!(Route::BookingDetail(id).section(), Some(Route::Bookings));
        assert_eq!(Route::Login.section(), None);
    }

    #[test]
    fn trip_form_title_depends_on_mode() {
        assert_eq!(Route::TripForm(None).title(), "Add New Trip");
        assert_eq!(Route::TripForm(Some(Ustr::from("t1"))).title(), "Edit Trip");
    }
}
