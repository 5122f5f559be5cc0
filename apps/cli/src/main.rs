#![deny(warnings)]

//! Headless stand-in for the dashboard frontends.
//!
//! Selects a dashboard preset, applies optional flag overrides, runs both
//! models once and prints the resulting tables. One computation per run,
//! mirroring the dashboards' one-recomputation-per-interaction model.

use anyhow::{Context, Result};
use neurogen_core::validate_comparison_table;
use neurogen_efficacy::EfficacyModel;
use neurogen_presets::{builtin_presets, find_preset, load_preset_dir};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    preset: String,
    presets_dir: Option<String>,
    dose: Option<u32>,
    ai: Option<String>,
    regen: Option<bool>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        preset: "baseline".to_string(),
        presets_dir: None,
        dose: None,
        ai: None,
        regen: None,
        json: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--preset" => {
                if let Some(v) = it.next() {
                    args.preset = v;
                }
            }
            "--presets-dir" => args.presets_dir = it.next(),
            "--dose" => args.dose = it.next().and_then(|s| s.parse().ok()),
            "--ai" => args.ai = it.next(),
            "--regen" => args.regen = it.next().map(|s| s == "on" || s == "true"),
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(preset = %args.preset, git_sha = env!("GIT_SHA"), "starting dashboard CLI");

    let presets = match &args.presets_dir {
        Some(dir) => load_preset_dir(dir)?,
        None => builtin_presets(),
    };
    let preset = find_preset(&presets, &args.preset)?;

    let mut input = preset.simulation_input();
    if let Some(dose) = args.dose {
        input.dose = dose;
    }
    if let Some(ai) = &args.ai {
        input.ai_level = ai
            .parse()
            .with_context(|| format!("--ai expects Low, Medium or High, got {ai:?}"))?;
    }
    if let Some(regen) = args.regen {
        input.neuro_regen_active = regen;
    }

    let model = EfficacyModel::with_defaults();
    let table = model.comparison_table(&input);
    validate_comparison_table(&table)?;
    let weights = preset.contribution_weights();
    let allocation = neurogen_steam::allocate(&weights)?;

    if args.json {
        let out = serde_json::json!({
            "preset": &preset.id,
            "input": &input,
            "comparison": &table,
            "contribution": &allocation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} | preset: {}", preset.title, preset.id);
    println!(
        "Simulation | dose: {}M | AI: {} | regeneration: {}",
        input.dose,
        input.ai_level,
        if input.neuro_regen_active { "on" } else { "off" }
    );
    println!("Efficacy and cost per patient:");
    for row in &table.rows {
        println!(
            "  {:<32} {:>6.1}%  ${}",
            row.name, row.efficacy_percent, row.cost_usd
        );
    }
    println!("STEAM contribution | dominant: {}", allocation.dominant);
    for row in &allocation.results {
        println!(
            "  {:<26} weight {:>2}  {:>5.1}%",
            row.category.label(),
            row.weight,
            row.percent
        );
    }

    Ok(())
}
