//! Double-buffered color life engine.
//!
//! The engine owns two same-sized grids. `current` is the authoritative
//! state; `prior` is refreshed from it at the start of every generation and
//! is the only grid read while neighbors are counted, so every cell updates
//! from the same starting state.

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::{default_rule, Color, Grid, Neighborhood, Rule};

/// Default odds of one random recoloring per generation
pub const DEFAULT_MUTATION_CHANCE: (u32, u32) = (1, 100);

/// Default fraction of cells brought to life by `randomize`
pub const DEFAULT_DENSITY: f64 = 0.2;

/// What changed during one generation
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GenerationReport {
    /// Dead cells that came alive through the rule
    pub births: usize,
    /// Living cells killed by the rule
    pub deaths: usize,
    /// Surviving cells whose color changed
    pub recolored: usize,
    /// Cell overwritten by the mutation step, if one fired
    pub mutation: Option<(usize, usize)>,
}

impl GenerationReport {
    fn record(mut self, before: Color, after: Color) -> Self {
        match (before.is_alive(), after.is_alive()) {
            (false, true) => self.births += 1,
            (true, false) => self.deaths += 1,
            (true, true) if before != after => self.recolored += 1,
            _ => {}
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            births: self.births + other.births,
            deaths: self.deaths + other.deaths,
            recolored: self.recolored + other.recolored,
            mutation: self.mutation.or(other.mutation),
        }
    }
}

/// Engine drives the simulation on a fixed N×N board.
///
/// Randomness comes from the injected `R`; seed it to get reproducible runs.
pub struct Engine<R = ChaCha8Rng> {
    current: Grid,
    prior: Grid,
    rule: Box<dyn Rule>,
    mutation_chance: (u32, u32),
    rng: R,
}

impl Engine<ChaCha8Rng> {
    /// Create an all-dead engine seeded from the thread generator
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Create an all-dead engine with a reproducible seed
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::with_rng(size, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Create an all-dead engine drawing randomness from `rng`
    pub fn with_rng(size: usize, rng: R) -> Self {
        Self {
            current: Grid::new(size),
            prior: Grid::new(size),
            rule: default_rule(),
            mutation_chance: DEFAULT_MUTATION_CHANCE,
            rng,
        }
    }

    /// Replace the update rule (builder pattern)
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rule = rule;
        self
    }

    /// Set the per-generation mutation odds as `numerator / denominator`.
    /// A zero numerator disables mutation.
    ///
    /// # Panics
    /// If the denominator is zero or smaller than the numerator.
    pub fn with_mutation_chance(mut self, numerator: u32, denominator: u32) -> Self {
        assert!(
            denominator != 0 && numerator <= denominator,
            "mutation chance {numerator}/{denominator} is not a probability"
        );
        self.mutation_chance = (numerator, denominator);
        self
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.current.size()
    }

    /// Current generation, read-only
    pub fn snapshot(&self) -> &Grid {
        &self.current
    }

    /// Number of living cells in the current generation
    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// Give (i, j) a fresh random color, as a user click does.
    ///
    /// # Panics
    /// If `i` or `j` is outside the grid.
    pub fn set_cell(&mut self, i: usize, j: usize) {
        let color = Color::random(&mut self.rng);
        self.current.set(i, j, color);
    }

    /// Give (i, j) a specific color.
    ///
    /// # Panics
    /// If `i` or `j` is outside the grid.
    pub fn set_color(&mut self, i: usize, j: usize, color: Color) {
        self.current.set(i, j, color);
    }

    /// Neighbor count and mean color of (i, j) as seen by the last
    /// generation advance.
    pub fn count_living_neighbors(&self, i: usize, j: usize) -> Neighborhood {
        self.prior.living_neighbors(i, j)
    }

    /// Advance one generation, then roll for a mutation
    pub fn advance_generation(&mut self) -> GenerationReport {
        self.prior.clone_from(&self.current);
        let size = self.size();
        let (prior, rule) = (&self.prior, self.rule.as_ref());

        let report = self
            .current
            .cells_mut()
            .chunks_mut(size.max(1))
            .enumerate()
            .map(|(i, row)| evolve_row(prior, rule, i, row))
            .fold(GenerationReport::default(), GenerationReport::merge);

        self.finish_generation(report)
    }

    /// Same as `advance_generation`, with rows evolved on the rayon pool.
    /// The mutation roll stays on the calling thread.
    pub fn advance_generation_parallel(&mut self) -> GenerationReport {
        self.prior.clone_from(&self.current);
        let size = self.size();
        let (prior, rule) = (&self.prior, self.rule.as_ref());

        let report = self
            .current
            .cells_mut()
            .par_chunks_mut(size.max(1))
            .enumerate()
            .map(|(i, row)| evolve_row(prior, rule, i, row))
            .reduce(GenerationReport::default, GenerationReport::merge);

        self.finish_generation(report)
    }

    fn finish_generation(&mut self, mut report: GenerationReport) -> GenerationReport {
        report.mutation = self.mutate();
        trace!(
            "generation: {} births, {} deaths, {} recolored, population {}",
            report.births,
            report.deaths,
            report.recolored,
            self.population()
        );
        report
    }

    /// Recolor one uniformly chosen cell with the configured odds
    fn mutate(&mut self) -> Option<(usize, usize)> {
        let size = self.size();
        let (numerator, denominator) = self.mutation_chance;
        if size == 0 || !self.rng.random_ratio(numerator, denominator) {
            return None;
        }
        let i = self.rng.random_range(0..size);
        let j = self.rng.random_range(0..size);
        self.set_cell(i, j);
        debug!("mutation at ({i}, {j})");
        Some((i, j))
    }

    /// Kill every cell in both buffers
    pub fn reset(&mut self) {
        self.current.clear();
        self.prior.clear();
        debug!("reset {n}x{n} grid", n = self.size());
    }

    /// Reset, then bring each cell to life with probability `density`.
    ///
    /// # Panics
    /// If `density` is not within `0.0..=1.0`.
    pub fn randomize(&mut self, density: f64) {
        assert!(
            (0.0..=1.0).contains(&density),
            "density {density} is not a probability"
        );
        self.reset();
        let size = self.size();
        for i in 0..size {
            for j in 0..size {
                if self.rng.random_bool(density) {
                    self.set_cell(i, j);
                }
            }
        }
        debug!("randomized grid, population {}", self.population());
    }
}

/// Apply the rule to one row of the current grid, reading only `prior`
fn evolve_row(prior: &Grid, rule: &dyn Rule, i: usize, row: &mut [Color]) -> GenerationReport {
    row.iter_mut()
        .enumerate()
        .fold(GenerationReport::default(), |report, (j, cell)| {
            let before = *cell;
            *cell = rule.evolve(before, &prior.living_neighbors(i, j));
            report.record(before, *cell)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 42;

    /// Engine with mutation switched off, so the rule alone decides
    fn quiet(size: usize) -> Engine {
        Engine::seeded(size, SEED).with_mutation_chance(0, 1)
    }

    fn all_dead(grid: &Grid) -> bool {
        grid.iter_cells().all(|(_, _, c)| c == Color::DEAD)
    }

    #[test]
    fn test_new_engine_is_dead() {
        for size in [1, 3, 20] {
            let engine = Engine::new(size);
            assert_eq!(engine.size(), size);
            assert!(all_dead(engine.snapshot()));
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = Engine::seeded(10, SEED);
        engine.randomize(0.5);
        engine.reset();
        let once = engine.snapshot().clone();
        engine.reset();
        assert_eq!(engine.snapshot(), &once);
        assert!(all_dead(&once));
        assert_eq!(engine.count_living_neighbors(5, 5).count, 0);
    }

    #[test]
    fn test_three_neighbors_scenario() {
        let mut engine = quiet(3);
        engine.set_color(1, 1, Color::new(9, 9, 9));
        engine.set_color(0, 1, Color::new(10, 10, 10));
        engine.set_color(1, 0, Color::new(20, 20, 20));

        let report = engine.advance_generation();
        let grid = engine.snapshot();

        assert_eq!(grid.get(0, 0), Some(Color::new(13, 13, 13)));
        assert_eq!(grid.get(1, 1), Some(Color::new(9, 9, 9)));
        assert_eq!(engine.count_living_neighbors(0, 0).count, 3);
        assert_eq!(engine.count_living_neighbors(1, 1).count, 2);
        assert_eq!(report.mutation, None);
    }

    #[test]
    fn test_birth_takes_exact_mean() {
        let mut engine = quiet(5);
        engine.set_color(1, 2, Color::new(30, 0, 90));
        engine.set_color(2, 1, Color::new(60, 3, 0));
        engine.set_color(3, 2, Color::new(0, 6, 30));

        let report = engine.advance_generation();
        assert_eq!(engine.snapshot().get(2, 2), Some(Color::new(30, 3, 40)));
        assert!(report.births >= 1);
    }

    #[test]
    fn test_lonely_and_crowded_cells_die() {
        let mut engine = quiet(5);
        // Lonely cell
        engine.set_color(0, 4, Color::new(1, 2, 3));
        // Plus sign: the center has 4 neighbors
        for (i, j) in [(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)] {
            engine.set_color(i, j, Color::new(50, 50, 50));
        }

        engine.advance_generation();
        let grid = engine.snapshot();
        assert_eq!(grid.get(0, 4), Some(Color::DEAD));
        assert_eq!(grid.get(2, 2), Some(Color::DEAD));
    }

    #[test]
    fn test_two_neighbors_keeps_color() {
        let mut engine = quiet(5);
        engine.set_color(2, 1, Color::new(200, 0, 0));
        engine.set_color(2, 2, Color::new(0, 200, 0));
        engine.set_color(2, 3, Color::new(0, 0, 200));

        engine.advance_generation();
        // The blinker's middle has exactly two neighbors
        assert_eq!(engine.snapshot().get(2, 2), Some(Color::new(0, 200, 0)));
        // Ends die, the vertical arm is born with the mean of the row
        assert_eq!(engine.snapshot().get(2, 1), Some(Color::DEAD));
        assert_eq!(engine.snapshot().get(1, 2), Some(Color::new(67, 67, 67)));
    }

    #[test]
    fn test_update_is_synchronous() {
        // Sequential in-place updates would let the first births feed later cells
        let mut engine = quiet(6);
        for (i, j) in [(0, 1), (1, 0), (1, 1)] {
            engine.set_color(i, j, Color::new(90, 90, 90));
        }
        engine.advance_generation();
        let grid = engine.snapshot();
        // A 2x2 block forms, and only that
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.get(0, 0), Some(Color::new(90, 90, 90)));
    }

    #[test]
    fn test_corner_never_overcrowded() {
        let mut engine = quiet(4);
        for i in 0..4 {
            for j in 0..4 {
                engine.set_color(i, j, Color::new(10, 10, 10));
            }
        }
        engine.advance_generation();
        // Corners had 3 neighbors and survive; everything else was crowded
        assert_eq!(engine.count_living_neighbors(0, 0).count, 3);
        let grid = engine.snapshot();
        assert_eq!(grid.get(0, 0), Some(Color::new(10, 10, 10)));
        assert_eq!(grid.get(3, 3), Some(Color::new(10, 10, 10)));
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut serial = quiet(40);
        serial.randomize(0.35);
        let mut parallel = quiet(40);
        for (i, j, c) in serial.snapshot().iter_cells() {
            parallel.set_color(i, j, c);
        }

        for _ in 0..10 {
            let a = serial.advance_generation();
            let b = parallel.advance_generation_parallel();
            assert_eq!(a, b);
            assert_eq!(serial.snapshot(), parallel.snapshot());
        }
    }

    #[test]
    fn test_certain_mutation_recolors_one_cell() {
        let mut engine = Engine::seeded(8, SEED).with_mutation_chance(1, 1);
        let report = engine.advance_generation();
        let (i, j) = report.mutation.expect("mutation should fire");
        let grid = engine.snapshot();
        // Empty grid: nothing else can have changed
        for (ci, cj, c) in grid.iter_cells() {
            if (ci, cj) != (i, j) {
                assert_eq!(c, Color::DEAD);
            }
        }
    }

    #[test]
    fn test_mutation_frequency_near_one_percent() {
        const GENERATIONS: usize = 20_000;
        let mut engine = Engine::seeded(20, SEED);
        let fired = (0..GENERATIONS)
            .filter(|_| engine.advance_generation().mutation.is_some())
            .count();
        // Expect 200; the bound is about five standard deviations
        assert!((130..=270).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn test_randomize_density() {
        let mut engine = Engine::seeded(100, SEED);
        engine.randomize(DEFAULT_DENSITY);
        let population = engine.population();
        assert!((1600..=2400).contains(&population), "population {population}");

        engine.randomize(0.0);
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let run = || {
            let mut engine = Engine::seeded(12, 7).with_mutation_chance(1, 2);
            engine.randomize(0.3);
            engine.set_cell(0, 0);
            for _ in 0..25 {
                engine.advance_generation();
            }
            engine.snapshot().clone()
        };
        assert_eq!(run(), run());
    }

    /// Every cell with any living neighbor turns white
    struct Flood;

    impl Rule for Flood {
        fn name(&self) -> &'static str {
            "Flood"
        }

        fn description(&self) -> &'static str {
            "B12345678/S12345678"
        }

        fn evolve(&self, _current: Color, neighbors: &Neighborhood) -> Color {
            if neighbors.count > 0 {
                Color::new(255, 255, 255)
            } else {
                Color::DEAD
            }
        }
    }

    #[test]
    fn test_custom_rule_drives_advance() {
        let mut engine = quiet(5).with_rule(Box::new(Flood));
        engine.set_color(2, 2, Color::new(10, 20, 30));

        let report = engine.advance_generation();
        let grid = engine.snapshot();
        // The lone cell has no neighbors, its ring of eight all see it
        assert_eq!(grid.get(2, 2), Some(Color::DEAD));
        assert_eq!(grid.get(1, 1), Some(Color::new(255, 255, 255)));
        assert_eq!(grid.get(3, 3), Some(Color::new(255, 255, 255)));
        assert_eq!(grid.population(), 8);
        assert_eq!(report.births, 8);
        assert_eq!(report.deaths, 1);

        let mut parallel = quiet(5).with_rule(Box::new(Flood));
        parallel.set_color(2, 2, Color::new(10, 20, 30));
        parallel.advance_generation_parallel();
        assert_eq!(parallel.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_blend_feeds_stored_color_forward() {
        let mut engine = quiet(5);
        engine.set_color(2, 1, Color::new(200, 0, 0));
        engine.set_color(2, 2, Color::new(0, 200, 0));
        engine.set_color(2, 3, Color::new(0, 0, 200));

        engine.advance_generation();
        assert_eq!(engine.snapshot().get(1, 2), Some(Color::new(67, 67, 67)));
        assert_eq!(engine.snapshot().get(3, 2), Some(Color::new(67, 67, 67)));

        // The next birth averages the quantized 67s, not 66.67
        engine.advance_generation();
        assert_eq!(engine.count_living_neighbors(2, 1).count, 3);
        assert_eq!(engine.snapshot().get(2, 1), Some(Color::new(45, 111, 45)));
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 grid")]
    fn test_set_cell_out_of_range_panics() {
        let mut engine = Engine::seeded(3, SEED);
        engine.set_cell(3, 0);
    }

    #[test]
    #[should_panic(expected = "not a probability")]
    fn test_bad_mutation_chance_panics() {
        let _ = Engine::seeded(3, SEED).with_mutation_chance(2, 1);
    }
}
