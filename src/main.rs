//! Headless driver: runs a session for a fixed number of generations and
//! reports how the population evolved.

use std::process::ExitCode;

use color_life::{GenerationReport, Session, SimulationConfig};
use log::{debug, error};

fn main() -> ExitCode {
    env_logger::init();

    let config = match SimulationConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            eprintln!(
                "usage: color_life [--size N] [--density D] [--seed S] [--delay MS] \
                 [--mutation N/D] [--generations G] [--parallel]"
            );
            return ExitCode::FAILURE;
        }
    };

    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    session.randomize();

    println!("=== Color Life {n}x{n} ===\n", n = config.size);
    println!(
        "{:>10} {:>10} {:>8} {:>8} {:>10} {:>10}",
        "Gen", "Alive", "Born", "Died", "Recolored", "Mutation"
    );
    println!("{:-<62}", "");

    let mut totals = GenerationReport::default();
    let mut mutations = 0u64;
    for _ in 0..config.generations {
        let report = session.step();
        debug!("generation {}: {:?}", session.generation(), report);

        totals.births += report.births;
        totals.deaths += report.deaths;
        totals.recolored += report.recolored;
        let mutation = match report.mutation {
            Some((i, j)) => {
                mutations += 1;
                format!("({i},{j})")
            }
            None => "-".to_string(),
        };

        println!(
            "{:>10} {:>10} {:>8} {:>8} {:>10} {:>10}",
            session.generation(),
            session.engine().population(),
            report.births,
            report.deaths,
            report.recolored,
            mutation
        );
    }

    println!("\n=== Totals after {} generations ===\n", session.generation());
    println!("Born:      {:>10}", totals.births);
    println!("Died:      {:>10}", totals.deaths);
    println!("Recolored: {:>10}", totals.recolored);
    println!("Mutations: {:>10}", mutations);
    println!("Alive:     {:>10}", session.engine().population());

    ExitCode::SUCCESS
}
