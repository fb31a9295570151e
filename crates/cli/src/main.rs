//! Command Line Interface for the BitcoinYield allocation engine.
use anyhow::{Context, Result};
use btcyield_api::{ApiServer, ServerConfig};
use btcyield_data::catalog::{ProtocolCatalog, ProtocolQuery};
use btcyield_domain::random::StdRandomSource;
use btcyield_optimization::{OptimizationRequest, PortfolioOptimizer};
use btcyield_simulation::engine::SimulationEngine;
use btcyield_simulation::monte_carlo::MonteCarloRunner;
use btcyield_simulation::state::{SimulationConfig, positions_from_allocation};
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;

mod output;

#[derive(Parser)]
#[command(name = "btcyield")]
#[command(about = "BitcoinYield allocation and projection CLI", long_about = None)]
struct Cli {
    /// JSON protocol catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize an allocation
    Optimize {
        /// Amount to invest in USD
        #[arg(short, long)]
        amount: f64,

        /// Risk tolerance from 1 (conservative) to 10 (aggressive)
        #[arg(short, long)]
        risk: i64,

        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Optimize, then project the allocation forward
    Simulate {
        #[arg(short, long)]
        amount: f64,

        #[arg(short, long)]
        risk: i64,

        /// Days to project
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Summarize many projections of an optimized allocation
    MonteCarlo {
        #[arg(short, long)]
        amount: f64,

        #[arg(short, long)]
        risk: i64,

        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Number of projections
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// List catalog protocols
    Protocols {
        /// Highest risk score to include
        #[arg(long)]
        risk_max: Option<u8>,

        /// Lowest APY to include
        #[arg(long)]
        apy_min: Option<f64>,

        /// Liquidity tier, matched exactly (very_high, high, medium, low)
        #[arg(long)]
        liquidity: Option<String>,
    },
    /// Start the REST API server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ProtocolCatalog> {
    match path {
        Some(path) => ProtocolCatalog::load(path),
        None => Ok(ProtocolCatalog::default()),
    }
}

fn rng(seed: Option<u64>) -> StdRandomSource {
    match seed {
        Some(seed) => StdRandomSource::seeded(seed),
        None => StdRandomSource::from_entropy(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let optimizer = PortfolioOptimizer::default();

    match &cli.command {
        Commands::Optimize {
            amount,
            risk,
            seed,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_ref())?;
            let request = OptimizationRequest::validate(*amount, *risk)?;
            let result = optimizer.optimize(&request, catalog.protocols(), &mut rng(*seed))?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_optimization(*amount, &result);
            }
        }
        Commands::Simulate {
            amount,
            risk,
            days,
            seed,
        } => {
            let catalog = load_catalog(cli.catalog.as_ref())?;
            let request = OptimizationRequest::validate(*amount, *risk)?;
            let mut rng = rng(*seed);
            let result = optimizer.optimize(&request, catalog.protocols(), &mut rng)?;
            output::print_optimization(*amount, &result);
            if !result.is_allocated() {
                return Ok(());
            }

            let positions = positions_from_allocation(&result.allocation);
            let config = SimulationConfig::new(Utc::now().date_naive()).with_days(*days);

            println!("\n🚀 Projecting {} day(s)...", days);
            let simulation = SimulationEngine::new(config).run(&positions, &mut rng)?;
            output::print_simulation(result.allocation.total_amount(), &simulation);
        }
        Commands::MonteCarlo {
            amount,
            risk,
            days,
            iterations,
            seed,
        } => {
            let catalog = load_catalog(cli.catalog.as_ref())?;
            let request = OptimizationRequest::validate(*amount, *risk)?;
            let mut rng = rng(*seed);
            let result = optimizer.optimize(&request, catalog.protocols(), &mut rng)?;
            output::print_optimization(*amount, &result);
            if !result.is_allocated() {
                return Ok(());
            }

            let positions = positions_from_allocation(&result.allocation);
            let config = SimulationConfig::new(Utc::now().date_naive()).with_days(*days);
            let runner = MonteCarloRunner::new(SimulationEngine::new(config), *iterations);

            info!(iterations, days, "Starting Monte Carlo run");
            let aggregate = runner.run(&positions, &mut rng)?;
            output::print_monte_carlo(result.allocation.total_amount(), &aggregate);
        }
        Commands::Protocols {
            risk_max,
            apy_min,
            liquidity,
        } => {
            let catalog = load_catalog(cli.catalog.as_ref())?;
            let query = ProtocolQuery {
                risk_max: *risk_max,
                apy_min: *apy_min,
                liquidity: liquidity.clone(),
            };
            output::print_protocols(&catalog.query(&query));
        }
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::from_env().context("Invalid server configuration")?;
            if let Some(host) = host {
                config = config.with_host(host.clone());
            }
            if let Some(port) = port {
                config = config.with_port(*port);
            }
            if let Some(path) = &cli.catalog {
                config = config.with_catalog_path(path.clone());
            }

            println!("🚀 BitcoinYield server starting on {}", config.addr());
            ApiServer::new(config)?.run().await?;
        }
    }

    Ok(())
}
