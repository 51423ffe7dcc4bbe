//! One-shot multi-platform opportunity scan
//!
//! Usage:
//!   cargo run --bin alpha_scan -- [--sectors defi,l2] [--threshold 0.5] [--max 8] [--json]

use daily_alpha::render::render_opportunities;
use daily_alpha::tools::OpportunityScanParams;
use daily_alpha::{AlphaConfig, AlphaService};
use dotenv::dotenv;
use std::env;

fn parse_args(args: &[String]) -> Result<(OpportunityScanParams, bool), String> {
    let mut params = OpportunityScanParams::default();
    let mut json = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--sectors" => {
                let value = iter.next().ok_or("--sectors needs a value")?;
                params.sectors = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "--threshold" => {
                let value = iter.next().ok_or("--threshold needs a value")?;
                params.confidence_threshold = value
                    .parse()
                    .map_err(|_| format!("invalid --threshold '{}'", value))?;
            }
            "--max" => {
                let value = iter.next().ok_or("--max needs a value")?;
                params.max_results = value
                    .parse()
                    .map_err(|_| format!("invalid --max '{}'", value))?;
            }
            "--timeframe" => {
                params.timeframe = iter.next().ok_or("--timeframe needs a value")?.clone();
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok((params, json))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let config = AlphaConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.rust_log.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (params, json) = parse_args(&args)?;

    log::info!("🔍 Scanning sectors: {}", params.sectors.join(", "));

    let service = AlphaService::from_config(&config)?;
    let report = service.scan_multi_platform_opportunities(params).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_opportunities(&report));
    }

    Ok(())
}
