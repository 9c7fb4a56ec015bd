use anyhow::Result;
use empresas_scraper::config::Config;
use empresas_scraper::pipeline;
use std::fs;
use tempfile::tempdir;

fn small_config(output_dir: &str) -> Config {
    let mut config = Config::default();
    config.scrape.localities = vec!["Lugo".to_string()];
    config.scrape.categories = Vec::new();
    config.scrape.delay_ms = 0;
    config.scrape.checkpoint_every = 0;
    config.scrape.output_dir = output_dir.to_string();
    config
}

#[tokio::test]
async fn run_without_sources_still_writes_the_final_file() -> Result<()> {
    let dir = tempdir()?;
    let config = small_config(dir.path().to_str().unwrap());

    let report = pipeline::run_directories(&[], &config, None).await?;

    assert_eq!(report.kind, "directorios");
    assert_eq!(report.accepted, 0);
    assert_eq!(report.pages_fetched, 0);
    assert!(report.errors.is_empty());
    assert!(fs::metadata(&report.output_file)?.is_file());
    Ok(())
}

#[tokio::test]
async fn unwritable_output_dir_fails_the_run() -> Result<()> {
    let dir = tempdir()?;
    // A regular file where the output directory should go, so the
    // final export cannot create it.
    let blocker = dir.path().join("salida");
    fs::write(&blocker, b"")?;
    let config = small_config(&format!("{}/sub", blocker.display()));

    let outcome = pipeline::run_directories(&[], &config, None).await;

    assert!(outcome.is_err());
    Ok(())
}
