pub mod card;
pub mod month_year_select;

pub use card::{DashboardCard, Glow};
pub use month_year_select::MonthYearSelect;
