pub mod config;
pub mod error;
pub mod interact;
pub mod js_templates;
pub mod locator;
pub mod pages;
pub mod scenario;
pub mod session;
pub mod timeouts;
pub mod utils;
pub mod wait;

pub use config::Config;
pub use error::HarnessError;
pub use locator::{Locator, Strategy};
pub use wait::WaitConfig;

pub type Result<T> = std::result::Result<T, HarnessError>;
