use std::time::Duration;

use log::info;

use crate::domain::{Engine, GenerationReport, Grid};
use super::config::{ConfigError, SimulationConfig, MAX_DELAY_MS};

/// Session orchestrates the simulation for a presentation layer.
/// This is the application layer that coordinates domain logic; the host
/// owns the clock and feeds elapsed time into `tick`.
pub struct Session {
    engine: Engine,
    density: f64,
    parallel: bool,
    is_running: bool,
    generation: u64,
    delay: Duration,
    update_timer: Duration,
}

impl Session {
    /// Create a paused session from a config
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let engine = match config.seed {
            Some(seed) => Engine::seeded(config.size, seed),
            None => Engine::new(config.size),
        };
        let (numerator, denominator) = config.mutation_chance;
        info!(
            "new {n}x{n} session, mutation {numerator}/{denominator}, delay {delay}ms",
            n = config.size,
            delay = config.delay_ms
        );

        Ok(Self {
            engine: engine.with_mutation_chance(numerator, denominator),
            density: config.density,
            parallel: config.parallel,
            is_running: false,
            generation: 0,
            delay: Duration::from_millis(config.delay_ms),
            update_timer: Duration::ZERO,
        })
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Generations advanced since the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Set the pause between generations, clamped to the slider range
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay = Duration::from_millis(delay_ms.min(MAX_DELAY_MS));
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Current board for rendering
    pub fn snapshot(&self) -> &Grid {
        self.engine.snapshot()
    }

    /// Give a clicked cell a random color.
    ///
    /// # Panics
    /// If `i` or `j` is outside the grid.
    pub fn click(&mut self, i: usize, j: usize) {
        self.engine.set_cell(i, j);
    }

    /// Clear the board and the generation counter
    pub fn reset(&mut self) {
        self.engine.reset();
        self.generation = 0;
        self.update_timer = Duration::ZERO;
        info!("session reset");
    }

    /// Scatter random cells at the configured density.
    /// The generation counter keeps running.
    pub fn randomize(&mut self) {
        self.engine.randomize(self.density);
        info!("randomized, population {}", self.engine.population());
    }

    /// Advance one generation regardless of the running flag
    pub fn step(&mut self) -> GenerationReport {
        let report = if self.parallel {
            self.engine.advance_generation_parallel()
        } else {
            self.engine.advance_generation()
        };
        self.generation += 1;
        if let Some((i, j)) = report.mutation {
            info!("generation {}: mutation at ({i}, {j})", self.generation);
        }
        report
    }

    /// Update simulation by one frame.
    /// Advances at most one generation, once the accumulated time reaches the delay.
    pub fn tick(&mut self, elapsed: Duration) -> Option<GenerationReport> {
        if !self.is_running {
            return None;
        }

        self.update_timer = self.update_timer.saturating_add(elapsed);
        if self.update_timer < self.delay {
            return None;
        }

        self.update_timer = Duration::ZERO;
        Some(self.step())
    }
}
