pub mod api;
pub mod feed;
pub mod ui;
