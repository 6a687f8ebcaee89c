//! Hopfield content-addressable memory demo
//!
//! Usage:
//!   cargo run --bin hopfield_cam -- recall --flips 10 --seed 42
//!   cargo run --bin hopfield_cam -- performance --repetitions 200 --output performance.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hopfield_cam::{PatternSet, Simulation, SimulationConfig, UpdateOrderPolicy};

#[derive(Parser, Debug)]
#[command(name = "hopfield_cam")]
#[command(about = "Store bipolar patterns in a Hopfield network and recall them from noisy probes")]
struct Args {
    /// JSON experiment configuration
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// JSON pattern set (defaults to the built-in letters a, b, c)
    #[arg(short, long, global = true)]
    patterns: Option<String>,

    /// Master random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Maximum sweeps per recall
    #[arg(long, global = true)]
    max_sweeps: Option<usize>,

    /// Unit update order
    #[arg(long, value_enum, global = true)]
    order: Option<OrderArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Corrupt each stored pattern and show what is recalled
    Recall {
        /// Number of units flipped per probe
        #[arg(long)]
        flips: Option<usize>,
    },
    /// Measure recall rate against the fraction of flipped units
    Performance {
        /// Trials per noise level
        #[arg(long)]
        repetitions: Option<usize>,

        /// Write the results as JSON
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    Random,
    Fixed,
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_sweeps) = args.max_sweeps {
        config.max_sweeps = max_sweeps;
    }
    match args.order {
        Some(OrderArg::Fixed) => config.order = UpdateOrderPolicy::Fixed,
        Some(OrderArg::Random) => config.order = UpdateOrderPolicy::Random { seed: None },
        None => {}
    }
    if let Command::Performance {
        repetitions: Some(repetitions),
        ..
    } = &args.command
    {
        config.repetitions = *repetitions;
    }

    config.validate()?;
    Ok(config)
}

fn print_side_by_side(columns: &[(&str, String)]) {
    let header: Vec<String> = columns
        .iter()
        .map(|(title, grid)| {
            let width = grid.lines().map(str::len).max().unwrap_or(0).max(title.len());
            format!("{:<width$}", title, width = width)
        })
        .collect();
    println!("{}", header.join("   "));

    let grids: Vec<Vec<&str>> = columns.iter().map(|(_, grid)| grid.lines().collect()).collect();
    let rows = grids.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        let line: Vec<String> = grids
            .iter()
            .zip(&header)
            .map(|(lines, head)| {
                format!("{:<width$}", lines.get(row).unwrap_or(&""), width = head.len())
            })
            .collect();
        println!("{}", line.join("   "));
    }
}

fn run_recall(set: &PatternSet, simulation: &mut Simulation, flips: usize) -> Result<()> {
    println!("=== Noisy Recall ({} units flipped) ===\n", flips);

    for result in simulation.noisy_recall(flips)? {
        let named = &set.patterns[result.index];
        println!(
            "Pattern '{}': recall error {}, {} after {} sweeps, attractor {:?}",
            named.name,
            result.squared_error,
            if result.outcome.converged { "converged" } else { "not converged" },
            result.outcome.sweeps,
            result.attractor
        );
        print_side_by_side(&[
            ("memorized", named.pattern.to_grid_string(set.width)),
            ("presented", result.probe.to_grid_string(set.width)),
            ("retrieved", result.outcome.pattern.to_grid_string(set.width)),
        ]);
        let energies: Vec<String> = result
            .outcome
            .energy_trace
            .values()
            .iter()
            .map(|e| format!("{:.0}", e))
            .collect();
        println!("Energy: {}\n", energies.join(" -> "));
    }

    Ok(())
}

fn run_performance(simulation: &mut Simulation, output: Option<&str>) -> Result<()> {
    let points = simulation.recall_performance()?;

    println!("\n=== Recall Performance ===");
    println!("{:>10} {:>12} {:>12}", "% flipped", "% recalled", "% converged");
    for point in &points {
        println!(
            "{:>10.1} {:>12.1} {:>12.1}",
            point.flip_percentage, point.recall_percentage, point.converged_percentage
        );
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&points)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path))?;
        log::info!("Saved results to {}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let set = match &args.patterns {
        Some(path) => PatternSet::from_json_file(path)
            .with_context(|| format!("loading patterns from {}", path))?,
        None => PatternSet::letters()?,
    };
    log::info!("Loaded {} patterns of {} units", set.len(), set.dimension());

    let mut simulation = Simulation::new(set.patterns(), config)?;

    match &args.command {
        Command::Recall { flips } => {
            let flips = flips.unwrap_or(simulation.config().demo_flips);
            run_recall(&set, &mut simulation, flips)?;
        }
        Command::Performance { output, .. } => {
            run_performance(&mut simulation, output.as_deref())?;
        }
    }

    Ok(())
}
