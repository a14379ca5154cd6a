//! Trait Forge - Entry Point
//!
//! Interactive banes and boons selection for character creation. Loads the
//! trait catalog for a shard (or from a local file), builds the opening
//! selection state for the chosen class/race/faction, and drives the
//! selection session from a small command loop.

use trait_forge::catalog::{CatalogClient, TraitCatalog};
use trait_forge::core::error::Result;
use trait_forge::core::types::{PlayerChoice, TraitCategory, TraitId};
use trait_forge::core::ClientConfig;
use trait_forge::selection::{PointSign, SelectionState, Session, TraitInfo};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Interactive trait selection for character creation
#[derive(Parser, Debug)]
#[command(name = "trait-forge")]
#[command(about = "Banes and boons trait selection for character creation")]
struct Args {
    /// Character class
    #[arg(long, default_value = "Warden")]
    class: String,

    /// Character race
    #[arg(long, default_value = "Northkin")]
    race: String,

    /// Character faction
    #[arg(long, default_value = "Dawnward")]
    faction: String,

    /// Load the catalog from a local JSON file instead of the API
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// API base URL, with trailing slash (overrides config and environment)
    #[arg(long)]
    api_url: Option<String>,

    /// Shard whose catalog to fetch (overrides config and environment)
    #[arg(long)]
    shard: Option<u32>,

    /// TOML config file with an [api] section
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("trait_forge=debug")
        .init();

    let args = Args::parse();
    tracing::info!("Trait Forge starting...");

    // Create the async runtime for the catalog fetch
    let rt = Runtime::new()?;

    // Resolve configuration: file or environment, then CLI overrides
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    if let Some(shard) = args.shard {
        config.shard_id = shard;
    }
    config.validate()?;

    // Build the opening state for the chosen character
    let choice = PlayerChoice::new(&args.class, &args.race, &args.faction);
    let mut session = Session::new();
    match &args.catalog {
        Some(path) => {
            let catalog = TraitCatalog::from_file(path)?;
            tracing::info!(
                "Loaded catalog from {}: {} traits",
                path.display(),
                catalog.traits.len()
            );
            session.initialize_with(catalog, choice);
        }
        None => {
            let client = CatalogClient::new(&config)?;
            tracing::info!("Fetching catalog from {}", client.endpoint());
            rt.block_on(session.initialize(&client, choice));
        }
    }

    // Display welcome message
    println!("\n=== TRAIT FORGE ===");
    println!(
        "Banes and boons for {} / {} / {}",
        args.class, args.race, args.faction
    );
    println!();
    println!("Commands:");
    println!("  boons           - Show the offered boon buckets");
    println!("  banes           - Show the offered bane buckets");
    println!("  added / a       - Show the current selections");
    println!("  select <id>     - Pick an offered trait (ranked traits step up)");
    println!("  cancel <id>     - Drop a held trait (rank 0 releases the chain)");
    println!("  points / p      - Show the point balance");
    println!("  report / r      - Check exclusivity groups");
    println!("  reset           - Discard every choice");
    println!("  quit / q        - Exit");
    println!();

    // Main selection loop
    loop {
        display_summary(session.state());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "boons" {
            display_buckets(session.state(), PointSign::Boon);
            continue;
        }

        if input == "banes" {
            display_buckets(session.state(), PointSign::Bane);
            continue;
        }

        if input == "added" || input == "a" {
            display_added(session.state());
            continue;
        }

        if input == "points" || input == "p" {
            display_points(session.state());
            continue;
        }

        if input == "report" || input == "r" {
            display_report(session.state());
            continue;
        }

        if input == "reset" {
            session.reset();
            println!("Selections discarded.");
            continue;
        }

        if let Some(id) = input.strip_prefix("select ") {
            match find_offered(session.state(), id.trim()) {
                Some(info) => {
                    session.select_trait(&info);
                    println!(
                        "Selected {}. Total points: {}",
                        describe(&info),
                        session.state().total_points
                    );
                }
                None => println!("No offered trait with id '{}'. Try 'boons' or 'banes'.", id),
            }
            continue;
        }

        if let Some(id) = input.strip_prefix("cancel ") {
            match find_held(session.state(), id.trim()) {
                Some(info) => {
                    session.cancel_trait(&info);
                    println!(
                        "Cancelled {}. Total points: {}",
                        describe(&info),
                        session.state().total_points
                    );
                }
                None => println!("No held trait with id '{}'. Try 'added'.", id),
            }
            continue;
        }

        println!("Unknown command. Available: boons, banes, added, select <id>, cancel <id>, points, report, reset, quit");
    }

    println!(
        "\nGoodbye! Final balance: {} points across {} selections.",
        session.state().total_points,
        SelectionState::occupied(&session.state().added_boons)
            + SelectionState::occupied(&session.state().added_banes)
    );
    Ok(())
}

/// Display a one-line summary before each prompt
fn display_summary(state: &SelectionState) {
    println!();
    println!(
        "--- Points: {} | Boons: {}/{} | Banes: {}/{} ---",
        state.total_points,
        SelectionState::occupied(&state.added_boons),
        state.added_boons.len(),
        SelectionState::occupied(&state.added_banes),
        state.added_banes.len()
    );
}

/// Display the four offered buckets for one sign
fn display_buckets(state: &SelectionState, sign: PointSign) {
    let label = match sign {
        PointSign::Boon => "Boons",
        PointSign::Bane => "Banes",
    };
    println!();
    println!("=== {} ===", label);
    for category in [
        TraitCategory::General,
        TraitCategory::Class,
        TraitCategory::Race,
        TraitCategory::Faction,
    ] {
        let bucket = state.bucket(category, sign);
        println!("{:?}:", category);
        if bucket.is_empty() {
            println!("  (none)");
            continue;
        }
        for info in bucket {
            println!("  {}", describe(info));
        }
    }
}

/// Display both selection lists, slot by slot
fn display_added(state: &SelectionState) {
    println!();
    println!("Boons:");
    for (slot, info) in state.added_boons.iter().enumerate() {
        if info.is_placeholder() {
            println!("  {}. (empty)", slot + 1);
        } else {
            println!("  {}. {}", slot + 1, describe(info));
        }
    }
    println!("Banes:");
    for (slot, info) in state.added_banes.iter().enumerate() {
        if info.is_placeholder() {
            println!("  {}. (empty)", slot + 1);
        } else {
            println!("  {}. {}", slot + 1, describe(info));
        }
    }
}

/// Display the point balance for both lists
fn display_points(state: &SelectionState) {
    let boon_points: i32 = state
        .added_boons
        .iter()
        .filter(|t| !t.is_placeholder())
        .map(|t| t.points)
        .sum();
    let bane_points: i32 = state
        .added_banes
        .iter()
        .filter(|t| !t.is_placeholder())
        .map(|t| t.points)
        .sum();
    println!();
    println!("Boon points: {:+}", boon_points);
    println!("Bane points: {:+}", bane_points);
    println!("Total:       {:+}", state.total_points);
    if state.total_points != 0 {
        println!("(a finished character balances boons against banes)");
    }
}

/// Display exclusivity groups whose selected count is out of bounds
fn display_report(state: &SelectionState) {
    let violations = state.exclusivity_report();
    println!();
    if violations.is_empty() {
        println!("All exclusivity groups within bounds.");
        return;
    }
    for violation in violations {
        println!(
            "Group {}: {} selected, allowed {}..={}",
            violation.group, violation.selected, violation.min_required, violation.max_allowed
        );
        for member in state
            .all_exclusives
            .iter()
            .filter(|m| m.exclusivity_group == Some(violation.group))
        {
            let marker = if state.holds(&member.id) { "x" } else { " " };
            println!("  [{}] {}", marker, describe(member));
        }
    }
}

/// One-line rendering of a trait: id, name, points, chain position
fn describe(info: &TraitInfo) -> String {
    let mut line = format!("{} - {} ({:+})", info.id, info.name, info.points);
    if let Some(rank) = info.rank {
        line.push_str(&format!(" [rank {}/{}]", rank + 1, info.ranks.len()));
    }
    if info.finished {
        line.push_str(" [complete]");
    }
    line
}

/// Find an offered trait by id across all eight buckets
fn find_offered(state: &SelectionState, id: &str) -> Option<TraitInfo> {
    let wanted = TraitId::from(id);
    for sign in [PointSign::Boon, PointSign::Bane] {
        for category in [
            TraitCategory::General,
            TraitCategory::Class,
            TraitCategory::Race,
            TraitCategory::Faction,
        ] {
            if let Some(info) = state
                .bucket(category, sign)
                .iter()
                .find(|t| t.id == wanted)
            {
                return Some(info.clone());
            }
        }
    }
    None
}

/// Find a held trait by id in either selection list
fn find_held(state: &SelectionState, id: &str) -> Option<TraitInfo> {
    let wanted = TraitId::from(id);
    state
        .added_boons
        .iter()
        .chain(state.added_banes.iter())
        .filter(|t| !t.is_placeholder())
        .find(|t| t.id == wanted)
        .cloned()
}
