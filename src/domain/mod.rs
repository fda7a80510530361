mod color;
mod grid;
mod rules;
mod engine;

pub use color::{Color, MeanColor};
pub use grid::{Grid, Neighborhood};
pub use rules::{Rule, BlendRule, default_rule};
pub use engine::{Engine, GenerationReport, DEFAULT_DENSITY, DEFAULT_MUTATION_CHANCE};
