//! Builds a narrative tree, walks its leftmost branch, and prints the result.
//!
//! Usage: `narrative_demo [config.toml] [--json]`
//!
//! Without a config file a built-in palette is used with seed 42 and depth 3.
//! `NARRATIVE_SEED` / `NARRATIVE_DEPTH` override either source.

use std::error::Error;
use std::path::Path;

use narrative_core::{NarrativeMap, NodeId};
use narrative_rules::{NarrativeConfig, StoryPalette};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "narrative_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let config_path = args.iter().find(|a| !a.starts_with("--"));

    let config = match config_path {
        Some(path) => NarrativeConfig::load(Path::new(path))?,
        None => {
            let mut config = sample_config()?;
            config.apply_env_overrides()?;
            config.validate()?;
            config
        }
    };

    let mut map = NarrativeMap::from_config(&config)?;
    map.build_tree(config.depth)?;

    let path = map.graph().leftmost_path();
    let summary = map.summarize_path(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let labels: Vec<String> = path.iter().map(NodeId::to_string).collect();
    println!("=== Path summary (left branch) ===");
    println!("Nodes: {}", labels.join(" -> "));
    println!("Choices: {}", summary.choices.join(" | "));
    println!("Total risk: {}", summary.total_risk);
    println!("Total reward: {}", summary.total_reward);
    println!("Steps: {}", summary.n_steps);

    println!("\n--- Events ---");
    for (i, event) in summary.events.iter().enumerate() {
        println!("[{}] {}", i + 1, event);
    }

    println!("\n=== Edges (choice, risk, reward) ===");
    for edge in map.graph().edges() {
        println!(
            "{} -> {}: choice='{}', risk={}, reward={}",
            edge.from, edge.to, edge.choice, edge.risk, edge.reward
        );
    }

    Ok(())
}

fn sample_config() -> Result<NarrativeConfig, Box<dyn Error>> {
    let palette = StoryPalette::new(
        ["redemption", "mystery"],
        ["an abandoned castle", "a misty valley"],
        ["the Wanderer", "the Shadow"],
    )?;
    Ok(NarrativeConfig::new(palette).with_seed(42))
}
