use crate::error::Result;
use crate::types::BusinessRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exported column order, fixed by the serde field order of
/// `BusinessRecord`.
pub const COLUMNS: &[&str] = &[
    "source",
    "name",
    "phone",
    "email",
    "website",
    "address",
    "locality",
    "category",
    "external_id",
    "latitude",
    "longitude",
    "rating",
    "types",
    "user_ratings_total",
];

/// Timestamp used in output filenames
pub fn run_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Checkpoint file for one run; each write supersedes the previous one
pub fn checkpoint_path(output_dir: &str, kind: &str, stamp: &str) -> PathBuf {
    Path::new(output_dir).join(format!("progreso_{kind}_{stamp}.csv"))
}

pub fn final_path(output_dir: &str, kind: &str, stamp: &str) -> PathBuf {
    Path::new(output_dir).join(format!("empresas_{kind}_{stamp}.csv"))
}

/// Write records as CSV. A UTF-8 BOM goes first so spreadsheet tools
/// keep accented Galician names intact.
pub fn write_csv(path: &Path, records: &[BusinessRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(b"\xEF\xBB\xBF")?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), count = records.len(), "Wrote tabular output");
    Ok(())
}

/// Reload a checkpoint or final file into records.
pub fn read_csv(path: &Path) -> Result<Vec<BusinessRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: BusinessRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Human-readable run summary: totals, per-source counts and field
/// completeness, printed at the end of every run.
pub fn print_summary(records: &[BusinessRecord]) {
    println!("\n=== RESUMEN FINAL ===");
    println!("Total empresas: {}", records.len());
    if records.is_empty() {
        return;
    }

    let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *by_source.entry(record.source.as_str()).or_default() += 1;
    }
    println!("Por fuente:");
    for (source, count) in by_source {
        println!("  - {source}: {count}");
    }

    let pct = |n: usize| n as f64 / records.len() as f64 * 100.0;
    let with_phone = records.iter().filter(|r| r.phone.is_some()).count();
    let with_email = records.iter().filter(|r| r.email.is_some()).count();
    let with_web = records.iter().filter(|r| r.website.is_some()).count();
    println!("Con teléfono: {} ({:.1}%)", with_phone, pct(with_phone));
    println!("Con email: {} ({:.1}%)", with_email, pct(with_email));
    println!("Con web: {} ({:.1}%)", with_web, pct(with_web));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BusinessRecord> {
        vec![
            BusinessRecord {
                source: "infobel".to_string(),
                name: "Panadería Rosalía".to_string(),
                phone: Some("981 123 456".to_string()),
                address: Some("Rúa Nova 7, Santiago".to_string()),
                locality: "Santiago de Compostela".to_string(),
                category: Some("alimentación".to_string()),
                ..BusinessRecord::default()
            },
            BusinessRecord {
                source: "places_api".to_string(),
                name: "Café Derby".to_string(),
                locality: "Santiago de Compostela".to_string(),
                external_id: Some("place-123".to_string()),
                latitude: Some(42.8782),
                longitude: Some(-8.5448),
                rating: Some(4.5),
                types: Some("cafe, establishment".to_string()),
                user_ratings_total: Some(321),
                ..BusinessRecord::default()
            },
        ]
    }

    #[test]
    fn csv_round_trip_preserves_records_and_accents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empresas.csv");
        let records = sample();
        write_csv(&path, &records).unwrap();

        let reloaded = read_csv(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].name, "Panadería Rosalía");
        assert_eq!(reloaded[0].address.as_deref(), Some("Rúa Nova 7, Santiago"));
        assert_eq!(reloaded[0].email, None);
        assert_eq!(reloaded[1].external_id.as_deref(), Some("place-123"));
        assert_eq!(reloaded[1].latitude, Some(42.8782));
        assert_eq!(reloaded[1].types.as_deref(), Some("cafe, establishment"));
        assert_eq!(reloaded[1].user_ratings_total, Some(321));
    }

    #[test]
    fn header_row_matches_documented_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empresas.csv");
        write_csv(&path, &sample()).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..3], b"\xEF\xBB\xBF");
        let text = String::from_utf8(raw[3..].to_vec()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
    }

    #[test]
    fn checkpoint_and_final_paths_are_distinct() {
        let stamp = "20250101_120000";
        let progress = checkpoint_path("output", "directorios", stamp);
        let done = final_path("output", "directorios", stamp);
        assert_ne!(progress, done);
        assert!(progress.to_string_lossy().contains("progreso"));
    }
}
