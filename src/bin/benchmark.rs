//! Performance benchmark comparing serial and parallel generation advance

use color_life::Engine;
use std::time::Instant;

const SEED: u64 = 42;
const DENSITY: f64 = 0.3;

fn seeded_engine(size: usize) -> Engine {
    // Mutation would make runs diverge between the two strategies
    let mut engine = Engine::seeded(size, SEED).with_mutation_chance(0, 1);
    engine.randomize(DENSITY);
    engine
}

fn benchmark_serial(size: usize, iterations: u32) -> f64 {
    let mut engine = seeded_engine(size);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.advance_generation();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_parallel(size: usize, iterations: u32) -> f64 {
    let mut engine = seeded_engine(size);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.advance_generation_parallel();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    env_logger::init();

    println!("=== Color Life Performance Benchmark ===\n");

    let sizes = [20, 100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<50}", "");

    for size in sizes {
        let serial_ms = benchmark_serial(size, iterations);
        let parallel_ms = benchmark_parallel(size, iterations);

        println!(
            "{:>12} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Throughput at 2000x2000 ===\n");

    let cells = 2000 * 2000;
    let serial_ms = benchmark_serial(2000, iterations);
    let parallel_ms = benchmark_parallel(2000, iterations);

    println!(
        "Serial:    {:.2} ms/gen, {:.1}M cells/sec",
        serial_ms,
        (cells as f64) / (serial_ms / 1000.0) / 1_000_000.0
    );
    println!(
        "Parallel:  {:.2} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        (cells as f64) / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
