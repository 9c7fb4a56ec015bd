use crate::config::Config;
use crate::dedupe::RunState;
use crate::error::Result;
use crate::export;
use crate::extract::extract_records;
use crate::fetch::Fetcher;
use crate::pacing::RateGate;
use crate::places::{self, PlaceSearch};
use crate::targets;
use crate::types::DirectorySource;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Result of one complete pipeline run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub kind: String,
    pub targets_processed: usize,
    pub pages_fetched: usize,
    pub accepted: usize,
    pub duplicates_dropped: usize,
    pub errors: Vec<String>,
    pub output_file: String,
}

fn load_state(resume: Option<&Path>, errors: &mut Vec<String>) -> RunState {
    match resume {
        Some(path) => match export::read_csv(path) {
            Ok(records) => {
                info!(path = %path.display(), count = records.len(), "Resuming from checkpoint");
                println!("↩️  Reanudando desde {} ({} registros)", path.display(), records.len());
                RunState::preload(records)
            }
            Err(e) => {
                warn!(path = %path.display(), "Could not read resume file: {}", e);
                errors.push(format!("resume file unreadable: {e}"));
                RunState::new()
            }
        },
        None => RunState::new(),
    }
}

fn checkpoint(state: &RunState, path: &Path, errors: &mut Vec<String>) {
    match export::write_csv(path, state.records()) {
        Ok(()) => {
            println!("   → Progreso guardado: {} registros", state.accepted());
        }
        Err(e) => {
            warn!("Checkpoint write failed: {}", e);
            errors.push(format!("checkpoint write failed: {e}"));
        }
    }
}

fn finish(
    kind: &str,
    state: RunState,
    output_dir: &str,
    stamp: &str,
    pages_fetched: usize,
    errors: Vec<String>,
) -> Result<RunReport> {
    let output_file = export::final_path(output_dir, kind, stamp);
    let targets_processed = state.targets_processed();
    let duplicates_dropped = state.duplicates_dropped();
    let records = state.into_records();
    if let Err(e) = export::write_csv(&output_file, &records) {
        warn!(path = %output_file.display(), "Final export failed: {}", e);
        return Err(e);
    }
    export::print_summary(&records);
    println!("\nArchivo guardado: {}", output_file.display());

    Ok(RunReport {
        kind: kind.to_string(),
        targets_processed,
        pages_fetched,
        accepted: records.len(),
        duplicates_dropped,
        errors,
        output_file: output_file.display().to_string(),
    })
}

/// Run the directory pipeline over every (locality, category) target
/// for the given sources.
#[instrument(skip_all)]
pub async fn run_directories(
    sources: &[Box<dyn DirectorySource>],
    config: &Config,
    resume: Option<&Path>,
) -> Result<RunReport> {
    let stamp = export::run_stamp();
    let mut errors = Vec::new();
    let mut state = load_state(resume, &mut errors);
    let mut pages_fetched = 0usize;

    let gate = RateGate::from_millis(config.scrape.delay_ms);
    let fetcher = Fetcher::new(gate);
    let all_targets = targets::directory_targets(&config.scrape);
    let checkpoint_file =
        export::checkpoint_path(&config.scrape.output_dir, "directorios", &stamp);

    info!(targets = all_targets.len(), sources = sources.len(), "Starting directory run");
    println!("🔄 Directorios: {} objetivos x {} fuentes", all_targets.len(), sources.len());

    for (i, target) in all_targets.iter().enumerate() {
        println!(
            "[{}/{}] {} - {}",
            i + 1,
            all_targets.len(),
            target.locality,
            target.category.as_deref().unwrap_or("(todas)")
        );

        for source in sources {
            if let Some(page) = fetcher.fetch_directory_page(source.as_ref(), target).await {
                pages_fetched += 1;
                for record in extract_records(&page, source.source_name(), source.hints()) {
                    state.offer(record);
                }
            }
        }

        if state.target_done(config.scrape.checkpoint_every) {
            checkpoint(&state, &checkpoint_file, &mut errors);
        }
    }

    finish(
        "directorios",
        state,
        &config.scrape.output_dir,
        &stamp,
        pages_fetched,
        errors,
    )
}

/// Run the place-search pipeline: grid phase first, then the
/// text-search phase, one shared dedup state across both.
#[instrument(skip_all)]
pub async fn run_places(
    client: &dyn PlaceSearch,
    config: &Config,
    resume: Option<&Path>,
) -> Result<RunReport> {
    let stamp = export::run_stamp();
    let mut errors = Vec::new();
    let mut state = load_state(resume, &mut errors);
    let mut pages_fetched = 0usize;

    let checkpoint_file = export::checkpoint_path(&config.scrape.output_dir, "places", &stamp);

    let grid = targets::grid_targets(&config.places);
    info!(targets = grid.len(), "Starting place-search grid phase");
    println!("🗺️  Fase 1: búsqueda por cuadrícula ({} objetivos)", grid.len());

    for (i, target) in grid.iter().enumerate() {
        if (i + 1) % 25 == 0 {
            println!("   Búsqueda {}/{}", i + 1, grid.len());
        }
        let pages = places::fetch_nearby_pages(client, target, &config.places).await;
        pages_fetched += pages.len();
        for page in &pages {
            let records = places::records_from_page(client, page, &state, &config.places).await;
            for record in records {
                state.offer(record);
            }
        }
        if state.target_done(config.scrape.checkpoint_every) {
            checkpoint(&state, &checkpoint_file, &mut errors);
        }
    }

    let text = targets::text_targets(&config.places);
    info!(targets = text.len(), "Starting place-search text phase");
    println!("🔎 Fase 2: búsqueda por términos ({} objetivos)", text.len());

    for target in &text {
        let pages = places::fetch_text_pages(client, target, &config.places).await;
        pages_fetched += pages.len();
        for page in &pages {
            let records = places::records_from_page(client, page, &state, &config.places).await;
            for record in records {
                state.offer(record);
            }
        }
        if state.target_done(config.scrape.checkpoint_every) {
            checkpoint(&state, &checkpoint_file, &mut errors);
        }
    }

    finish(
        "places",
        state,
        &config.scrape.output_dir,
        &stamp,
        pages_fetched,
        errors,
    )
}
