// Library entry so integration tests can reference internal modules.
// The binary (`main.rs`) wires these together.
pub mod bot;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod session;
pub mod store;
pub mod telegram;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
