pub mod config;
mod session;

pub use config::{ConfigError, SimulationConfig};
pub use session::Session;
