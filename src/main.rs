// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use paranet::config::consts::DEFAULT_LOG_LEVEL;
use paranet::config::{load_and_validate_config, RuntimeBuilder};
use paranet::observability::init_tracing;
use serde_json::{Map, Value};
use std::env;
use std::time::Instant;

fn main() -> Result<()> {
    init_tracing(DEFAULT_LOG_LEVEL);

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <network.yaml|network.toml> [more ...]", args[0]);
        eprintln!("Example: {} configs/pipeline.yaml configs/aggregation.toml", args[0]);
        bail!("no network description given");
    }

    let mut failures = 0;
    for (i, config_file) in args[1..].iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(80));
        }

        if let Err(e) = run_single_config(config_file) {
            eprintln!("❌ Failed to run {}: {:#}", config_file, e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} network(s) failed", failures, args.len() - 1);
    }
    Ok(())
}

/// Build, run and print one network description.
fn run_single_config(config_file: &str) -> Result<()> {
    println!("📋 {}", config_file);

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("loading {}", config_file))?;
    let mut runtime = RuntimeBuilder::from_config(&config)
        .with_context(|| format!("building network from {}", config_file))?;

    println!(
        "   {} nodes, {} edges, {} blocks",
        runtime.network.len(),
        runtime.network.edge_count(),
        runtime.blocks.len()
    );

    let start = Instant::now();
    runtime.run()?;
    let elapsed = start.elapsed();

    let mut records = Map::new();
    for (node_id, outputs) in runtime.network.get_all_outputs() {
        let node_records = outputs.iter().map(|signal| signal.to_record()).collect();
        records.insert(node_id.to_string(), Value::Array(node_records));
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(records))?);
    println!("⏱️  Propagated in {:.2?}", elapsed);
    Ok(())
}
