mod detail;
mod list;
mod new_booking;

pub use detail::{BookingDetail, LoadBookingCommand};
pub use list::{BookingStats, BookingsList, BookingsPage, RefreshBookingsCommand};
pub use new_booking::{
    CreateBookingCommand, FILL_REQUIRED_FIELDS, NewBookingCompute, NewBookingInput,
};
