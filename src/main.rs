//! Life Engine CLI - Run a timed Game of Life from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use life_engine::{
    compute::{GridStats, LifeEngine},
    driver::EngineHandle,
    schema::{EngineConfig, Seed, Shape},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run Conway's Game of Life from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to engine configuration file");
        eprintln!("  generations  Number of generations to play (default: 50)");
        eprintln!();
        eprintln!("An optional <config>.seed.json next to the config overrides the random seed.");
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(50);

    // Load configuration
    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    // Load or create seed
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        config.seed()
    };

    let engine = LifeEngine::from_seed(&seed).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    println!("Game of Life");
    println!("============");
    println!("Grid: {}x{}", engine.cols(), engine.rows());
    println!("Tick: {} ms", config.tick_interval_ms);
    println!("Generations: {}", generations);
    println!();

    let initial_stats = engine.stats();
    print_stats("Initial state", &initial_stats);

    let mut handle = EngineHandle::spawn(engine, config.tick_interval());
    if let Err(e) = handle.start() {
        eprintln!("Error starting engine: {}", e);
        std::process::exit(1);
    }

    let start = Instant::now();
    let timeout = config.tick_interval() * 10 + Duration::from_secs(1);
    let mut last = None;

    while let Some(generation) = handle.recv_generation_timeout(timeout) {
        let stats = GridStats::from_grid(generation.index, &generation.grid);
        println!(
            "Generation {} ({} alive):\n{}",
            generation.index, stats.population, generation.grid
        );
        let done = generation.index >= generations;
        last = Some(generation);
        if done {
            break;
        }
    }

    handle.shutdown();

    let Some(last) = last else {
        eprintln!("Engine produced no generations");
        std::process::exit(1);
    };

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &GridStats::from_grid(last.index, &last.grid));
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        last.index as f32 / elapsed.as_secs_f32()
    );
}

fn print_stats(label: &str, stats: &GridStats) {
    println!("{}:", label);
    println!("  Generation: {}", stats.generation);
    println!("  Live cells: {} / {}", stats.population, stats.cells);
    println!("  Live fraction: {:.4}", stats.live_fraction);
    println!();
}

fn print_example_config() {
    let config = EngineConfig {
        width: 40,
        height: 20,
        probability_of_life: 25,
        tick_interval_ms: 200,
        rng_seed: Some(42),
    };
    let seed = Seed::shape(config.width, config.height, Shape::Glider, 1, 1);

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
    println!();
    println!("Example seed (config.seed.json, optional):");
    match serde_json::to_string_pretty(&seed) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing seed: {}", e),
    }
}
