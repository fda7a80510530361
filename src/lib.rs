// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Session control and configuration
pub mod application;

// Re-exports for convenience
pub use domain::{Color, Engine, GenerationReport, Grid, Neighborhood, Rule, BlendRule};
pub use application::{ConfigError, Session, SimulationConfig};
