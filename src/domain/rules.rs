use super::{Color, Neighborhood};

/// Trait for color cellular automaton rules
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Apply rule to compute next cell color
    fn evolve(&self, current: Color, neighbors: &Neighborhood) -> Color;
}

/// Conway's B3/S23 counts with color blending.
///
/// Three living neighbors give the cell their mean color, which both births
/// dead cells and recolors survivors. Two neighbors leave the cell exactly as
/// it was, color included. Anything else kills it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlendRule;

impl Rule for BlendRule {
    fn name(&self) -> &'static str {
        "Blend"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - births take the neighbors' mean color"
    }

    fn evolve(&self, current: Color, neighbors: &Neighborhood) -> Color {
        match neighbors.count {
            2 => current,
            3 => neighbors.mean.to_color(),
            _ => Color::DEAD,
        }
    }
}

/// Get default rule
pub fn default_rule() -> Box<dyn Rule> {
    Box::new(BlendRule)
}
