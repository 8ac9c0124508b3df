pub mod header;
pub mod nav;

pub use header::{Header, HeaderVariant};
pub use nav::{NavLink, NAV_LINKS};
