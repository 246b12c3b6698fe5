mod actions;
mod detail;
mod form;
mod list;

pub use actions::{DeleteTripCommand, ToggleTripCommand, TripActionCompute, TripActionInput};
pub use detail::{LoadTripCommand, TripDetail};
pub use form::{PRICE_NOT_POSITIVE, SaveTripCommand, TripFormCompute, TripFormInput};
pub use list::{RefreshTripsCommand, TripStats, TripsList, TripsPage};
