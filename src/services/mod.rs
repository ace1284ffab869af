pub mod click_service;
pub mod listing_navigator;
pub mod result_writer;

pub use click_service::{click_with_fallback, ClickMethod};
pub use listing_navigator::{listing_url, ListingNavigator, ListingSnapshot};
pub use result_writer::ResultWriter;
