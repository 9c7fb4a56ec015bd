use anyhow::Result;
use empresas_scraper::dedupe::RunState;
use empresas_scraper::export;
use empresas_scraper::extract::extract_records;
use empresas_scraper::sources::paginas_amarillas::PaginasAmarillas;
use empresas_scraper::types::{DirectorySource, PageContent, RawPage, SearchTarget};
use tempfile::tempdir;

fn page_for(source_locality: &str, category: Option<&str>, body: &str) -> RawPage {
    RawPage {
        target: SearchTarget::directory(source_locality, category),
        content: PageContent::Markup(body.to_string()),
        page_token: None,
    }
}

#[test]
fn full_listing_page_flows_into_a_deduplicated_export() -> Result<()> {
    let body = r#"
        <html><body>
          <div class="listado-item">
            <h2 itemprop="name">Mariscos do Berbés</h2>
            <span itemprop="telephone">986 222 333</span>
            <span itemprop="address">Rúa do Berbés 4, Vigo</span>
            <a itemprop="url" href="https://mariscosberbes.gal">web</a>
          </div>
          <div class="listado-item">
            <h2 itemprop="name">Mariscos do Berbés</h2>
            <span itemprop="telephone">986-222-333</span>
          </div>
          <div class="listado-item">
            <h2 itemprop="name">Conservas Rías Baixas</h2>
            <a href="mailto:info@conservasrb.es">contacto</a>
          </div>
        </html></body>
    "#;

    let source = PaginasAmarillas;
    let page = page_for("Vigo", Some("alimentacion"), body);
    let records = extract_records(&page, source.source_name(), source.hints());
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].website.as_deref(), Some("https://mariscosberbes.gal"));
    assert_eq!(records[2].email.as_deref(), Some("info@conservasrb.es"));

    // the duplicate listing with reformatted phone collapses on accept
    let mut state = RunState::new();
    for record in records {
        state.offer(record);
    }
    assert_eq!(state.accepted(), 2);
    assert_eq!(state.duplicates_dropped(), 1);

    // exported file reproduces the accepted set exactly
    let dir = tempdir()?;
    let path = dir.path().join("vigo.csv");
    export::write_csv(&path, state.records())?;
    let reloaded = export::read_csv(&path)?;
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].name, "Mariscos do Berbés");
    assert_eq!(reloaded[0].locality, "Vigo");
    assert_eq!(reloaded[0].category.as_deref(), Some("alimentacion"));
    Ok(())
}

#[test]
fn fallback_heuristic_extracts_from_unstructured_markup() {
    // no listado-item containers at all, only loose markup with phones
    let body = r#"
        <div>
          <div>
            <b>Carpintería Souto</b>
            <p>Teléfono: 982 444 555</p>
            <p>Praza Maior 1, Lugo</p>
          </div>
          <div>
            <p>Texto sin datos de contacto</p>
          </div>
        </div>
    "#;
    let source = PaginasAmarillas;
    let page = page_for("Lugo", None, body);
    let records = extract_records(&page, source.source_name(), source.hints());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Carpintería Souto");
    assert_eq!(records[0].phone.as_deref(), Some("982 444 555"));
    assert_eq!(records[0].address.as_deref(), Some("Praza Maior 1, Lugo"));
}
