use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use empresas_scraper::config::Config;
use empresas_scraper::error::Result;
use empresas_scraper::pacing::RateGate;
use empresas_scraper::pipeline::{run_directories, run_places, RunReport};
use empresas_scraper::places::google::GooglePlacesClient;
use empresas_scraper::{constants, logging, sources};

#[derive(Parser)]
#[command(name = "empresas_scraper")]
#[command(about = "Galician business-listing harvester")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the web directories (localities x categories)
    Directories {
        /// Specific sources to run (comma-separated).
        /// Available: infobel, qdq, paginas_amarillas, paxinas_galegas
        #[arg(long)]
        sources: Option<String>,
        /// Resume from a previous checkpoint or final CSV
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Query the place-search API (grid + text phases)
    Places {
        /// Resume from a previous checkpoint or final CSV
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Run both pipelines sequentially
    Run {
        /// Specific directory sources to run (comma-separated)
        #[arg(long)]
        sources: Option<String>,
    },
}

fn parse_sources(arg: Option<String>) -> Vec<Box<dyn empresas_scraper::types::DirectorySource>> {
    match arg {
        Some(list) => list
            .split(',')
            .map(|s| s.trim())
            .filter_map(|name| {
                let source = sources::create_source(name);
                if source.is_none() {
                    println!("⚠️  Fuente desconocida: {name}");
                    println!("   Disponibles: {}", constants::supported_sources().join(", "));
                }
                source
            })
            .collect(),
        None => sources::all_sources(),
    }
}

fn print_report(report: &RunReport) {
    println!("\n📊 Resultado ({}):", report.kind);
    println!("   Objetivos procesados: {}", report.targets_processed);
    println!("   Páginas obtenidas: {}", report.pages_fetched);
    println!("   Registros aceptados: {}", report.accepted);
    println!("   Duplicados descartados: {}", report.duplicates_dropped);
    println!("   Errores: {}", report.errors.len());
    for error in &report.errors {
        println!("   - {error}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    match cli.command {
        Commands::Directories { sources, resume } => {
            let sources = parse_sources(sources);
            if sources.is_empty() {
                error!("No valid sources selected");
                return Err(empresas_scraper::error::ScraperError::Config(
                    "no valid sources selected".to_string(),
                ));
            }
            let report = run_directories(&sources, &config, resume.as_deref()).await?;
            print_report(&report);
        }
        Commands::Places { resume } => {
            // A missing credential is fatal before any target is touched
            let gate = RateGate::from_millis(config.scrape.delay_ms);
            let client = GooglePlacesClient::from_env(gate).map_err(|e| {
                error!("Failed to initialize places client: {}", e);
                e
            })?;
            let report = run_places(&client, &config, resume.as_deref()).await?;
            print_report(&report);
        }
        Commands::Run { sources } => {
            println!("🚀 Ejecutando directorios + places...");
            let sources = parse_sources(sources);
            if !sources.is_empty() {
                let report = run_directories(&sources, &config, None).await?;
                print_report(&report);
            }

            let gate = RateGate::from_millis(config.scrape.delay_ms);
            let client = GooglePlacesClient::from_env(gate).map_err(|e| {
                error!("Failed to initialize places client: {}", e);
                e
            })?;
            let report = run_places(&client, &config, None).await?;
            print_report(&report);
        }
    }
    Ok(())
}
