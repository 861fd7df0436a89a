#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Border Sentry bot against scripted
//! opponents.

mod duel;
mod scenario_transfer;

use anyhow::Context;
use border_sentry_core::{ArenaSize, EngagementConfig, FirePower, FirepowerPolicy};
use border_sentry_system_bootstrap::Bootstrap;
use clap::Parser;

use crate::duel::{generate_scenario, Duel};
use crate::scenario_transfer::DuelScenario;

#[derive(Debug, Parser)]
#[command(
    name = "border-sentry",
    about = "Runs a Border Sentry bot against scripted opponents."
)]
struct Args {
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Seed used to generate opponent scripts.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Arena width in world units.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Arena height in world units.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Number of scripted opponents to generate.
    #[arg(long, default_value_t = 3)]
    opponents: u32,

    /// Base fire power for every shot.
    #[arg(long, default_value_t = 3.0)]
    firepower: f64,

    /// Scale fire power down with target distance and speed.
    #[arg(long)]
    range_scaled: bool,

    /// Depth of the patrolled border band in world units.
    #[arg(long, default_value_t = 100.0)]
    border_depth: f64,

    /// Encoded scenario string to replay instead of generating one.
    #[arg(long)]
    scenario: Option<String>,

    /// Print the encoded scenario and exit without running the duel.
    #[arg(long)]
    print_scenario: bool,
}

/// Entry point for the Border Sentry command-line interface.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(encoded) => {
            DuelScenario::decode(encoded).context("invalid --scenario string")?
        }
        None => generate_scenario(args.seed, args.width, args.height, args.opponents),
    };

    if args.print_scenario {
        println!("{}", scenario.encode());
        return Ok(());
    }

    let firepower = FirePower::new(args.firepower)?;
    let policy = if args.range_scaled {
        FirepowerPolicy::RangeScaled
    } else {
        FirepowerPolicy::Fixed
    };
    let config = EngagementConfig::new(firepower, policy, args.border_depth);

    let arena = ArenaSize::new(f64::from(scenario.width), f64::from(scenario.height));
    let bootstrap = Bootstrap::default();
    bootstrap.validate(&config, arena)?;

    let mut duel = Duel::new(&scenario, config);
    println!("{}", bootstrap.welcome_banner(duel.session()));
    println!(
        "{} opponents on a {}x{} arena, up to {} ticks",
        scenario.opponents.len(),
        scenario.width,
        scenario.height,
        args.ticks
    );

    let outcome = duel.run(args.ticks);
    let report = outcome.report;
    println!(
        "duel finished: {} ticks, {} sightings, {} shots, {} eliminations, {} survivors",
        report.ticks, report.sightings, report.shots, report.eliminations, outcome.survivors
    );
    println!("{} commands issued to the host", outcome.command_log.len());
    if report.wall_collisions > 0 {
        println!("wall collisions suffered: {}", report.wall_collisions);
    }

    Ok(())
}
