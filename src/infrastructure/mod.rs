pub mod chromium_driver;
pub mod session_driver;

pub use chromium_driver::{ChromiumDriver, SessionMode};
pub use session_driver::{wait_for_url_change, SessionDriver};
