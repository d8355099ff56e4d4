//! Terminal frontend for Ravenfall.

mod play;

use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::Table;

use rf_core::bundle;

#[derive(Parser)]
#[command(
    name = "rf",
    about = "Ravenfall — a branching saga of ravens, steel and grudges",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a saga and play it in the terminal
    Play {
        /// RNG seed for a reproducible run
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Starting stat bundle (see `rf bundles`)
        #[arg(short, long, default_value = "warrior")]
        bundle: String,
    },

    /// List the starting stat bundles
    Bundles,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play { seed, bundle } => play::run(seed, &bundle),
        Commands::Bundles => {
            print_bundles();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{} {err}", "error:".red().bold());
        process::exit(1);
    }
}

fn print_bundles() {
    let mut table = Table::new();
    table.set_header(vec![
        "bundle", "weapon", "health", "energy", "gold", "str", "agi", "end", "crd", "vit", "wpn",
        "int", "cha",
    ]);
    for name in bundle::names() {
        if let Ok(b) = bundle::by_name(name) {
            let a = b.attributes;
            table.add_row(vec![
                b.name.clone(),
                b.equipped_weapon.to_string(),
                b.health.to_string(),
                b.energy.to_string(),
                b.gold.to_string(),
                a.strength.to_string(),
                a.agility.to_string(),
                a.endurance.to_string(),
                a.coordination.to_string(),
                a.vitality.to_string(),
                a.weapon_skill.to_string(),
                a.intelligence.to_string(),
                a.charisma.to_string(),
            ]);
        }
    }
    println!("{table}");
}
