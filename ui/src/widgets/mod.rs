mod data_table;
mod login;
mod navbar;
mod stat_card;

pub use data_table::{DataTable, NO_ENTRIES, badge, notice};
pub use login::login_widget;
pub use navbar::navbar;
pub use stat_card::{bar_series, stat_card};
