//! EzPay transaction service entry point

use anyhow::Context;
use clap::Parser;
use ezpay_api::start_server;
use ezpay_config::Config;
use ezpay_core::Registries;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ezpay")]
#[command(author = "EzPay Contributors")]
#[command(version = "0.1.0")]
#[command(about = "In-memory UPI and bank transfer registry with a JSON API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, from_file) = match Config::load_or_default(args.config.clone()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e).with_context(|| {
                format!("Failed to load configuration from {}", args.config.display())
            });
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!(
            "Config file not found: {}, using defaults",
            args.config.display()
        );
    }
    log::info!(
        "Registry: success probability={}, terminal status enforced={}, demo data={}",
        config.registry.success_probability,
        config.registry.enforce_terminal_status,
        config.registry.seed_demo_data
    );

    let registries =
        Registries::from_config(&config.registry).context("Failed to initialize registries")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, registries))
        .context("Server error")?;

    Ok(())
}
