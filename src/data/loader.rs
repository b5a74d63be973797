use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Brewery, Snapshot, SnapshotSource};
use crate::config::DashboardConfig;

/// Failures specific to reading a brewery catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog responded with HTTP {status}")]
    Http { status: u16 },

    #[error("expected a top-level JSON array of breweries")]
    NotAnArray,

    #[error("none of the {0} records could be decoded")]
    NoUsableRecords(usize),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Remote catalog
// ---------------------------------------------------------------------------

/// Build the single-page request URL, e.g. `...breweries?per_page=50`.
pub fn catalog_url(config: &DashboardConfig) -> String {
    let sep = if config.api_url.contains('?') { '&' } else { '?' };
    format!("{}{sep}per_page={}", config.api_url, config.page_size)
}

/// Fetch one bounded page of breweries from the remote catalog.
///
/// Blocks for up to the configured timeout; call it off the UI thread.
pub fn fetch_catalog(config: &DashboardConfig) -> Result<Snapshot> {
    let url = catalog_url(config);
    log::info!("Fetching brewery catalog from {url}");

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(&url)
        .header(
            USER_AGENT,
            format!("brewery-dashboard/{}", env!("CARGO_PKG_VERSION")),
        )
        .header(ACCEPT, "application/json")
        .send()
        .with_context(|| format!("requesting {url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Http {
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.text().context("reading catalog response body")?;
    let breweries = parse_catalog_json(&body)?;
    Ok(Snapshot::from_breweries(
        breweries,
        SnapshotSource::Remote(url),
    ))
}

// ---------------------------------------------------------------------------
// JSON decoding
// ---------------------------------------------------------------------------

/// Decode a catalog payload:
///
/// ```json
/// [
///   { "id": "b54b16e1", "name": "Oak Barrel", "brewery_type": "micro",
///     "city": "Austin", "state": "Texas", ... },
///   ...
/// ]
/// ```
///
/// Extra fields are ignored. Records that fail to decode are skipped with a
/// warning, so a partly broken payload still yields the usable rows.
pub fn parse_catalog_json(text: &str) -> Result<Vec<Brewery>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing catalog JSON")?;
    let JsonValue::Array(records) = root else {
        return Err(CatalogError::NotAnArray.into());
    };

    let n_records = records.len();
    let mut breweries = Vec::with_capacity(n_records);
    for (i, rec) in records.into_iter().enumerate() {
        match serde_json::from_value::<Brewery>(rec) {
            Ok(b) => breweries.push(b),
            Err(e) => log::warn!("Skipping catalog record {i}: {e}"),
        }
    }

    if breweries.is_empty() && n_records > 0 {
        return Err(CatalogError::NoUsableRecords(n_records).into());
    }
    if breweries.len() < n_records {
        log::warn!(
            "Decoded {} of {n_records} catalog records",
            breweries.len()
        );
    }
    Ok(breweries)
}

// ---------------------------------------------------------------------------
// Local files
// ---------------------------------------------------------------------------

/// Load a snapshot from a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – the same array payload the remote catalog returns
/// * `.csv`  – header `id,name,brewery_type,city,state` (extra columns ignored)
pub fn load_file(path: &Path) -> Result<Snapshot> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let breweries = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(CatalogError::UnsupportedExtension(other.to_string()).into()),
    };
    Ok(Snapshot::from_breweries(
        breweries,
        SnapshotSource::File(path.to_path_buf()),
    ))
}

fn load_json(path: &Path) -> Result<Vec<Brewery>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_catalog_json(&text)
}

fn load_csv(path: &Path) -> Result<Vec<Brewery>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in ["id", "name"] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut breweries = Vec::new();
    let mut n_rows = 0usize;
    for (row_no, result) in reader.deserialize::<Brewery>().enumerate() {
        n_rows += 1;
        match result {
            Ok(b) => breweries.push(b),
            Err(e) => log::warn!("Skipping CSV row {row_no}: {e}"),
        }
    }

    if breweries.is_empty() && n_rows > 0 {
        return Err(CatalogError::NoUsableRecords(n_rows).into());
    }
    if breweries.len() < n_rows {
        log::warn!("Decoded {} of {n_rows} CSV rows", breweries.len());
    }
    Ok(breweries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::BreweryType;

    const PAYLOAD: &str = r#"[
        {"id": "1", "name": "Oak St", "brewery_type": "micro", "city": "Austin", "state": "Texas", "phone": null},
        {"id": "2", "name": "Hill Brew", "brewery_type": "regional", "city": "Denver", "state": "Colorado"},
        {"name": "No Id"},
        {"id": "4", "name": "Mystery", "brewery_type": null, "city": null, "state": null}
    ]"#;

    #[test]
    fn skips_malformed_records_and_keeps_order() {
        let breweries = parse_catalog_json(PAYLOAD).unwrap();
        let ids: Vec<&str> = breweries.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert_eq!(breweries[1].brewery_type, BreweryType::Regional);
        assert_eq!(breweries[2].city, "");
        assert_eq!(breweries[2].brewery_type, BreweryType::default());
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = parse_catalog_json(r#"{"message": "rate limited"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::NotAnArray)
        ));
        assert!(parse_catalog_json("not json").is_err());
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        assert!(parse_catalog_json("[]").unwrap().is_empty());
        let err = parse_catalog_json(r#"[{"bogus": true}]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::NoUsableRecords(1))
        ));
    }

    #[test]
    fn catalog_url_appends_page_size() {
        let mut config = DashboardConfig::default();
        config.api_url = "https://example.test/v1/breweries".into();
        config.page_size = 50;
        assert_eq!(
            catalog_url(&config),
            "https://example.test/v1/breweries?per_page=50"
        );
        config.api_url = "https://example.test/v1/breweries?by_state=ohio".into();
        assert_eq!(
            catalog_url(&config),
            "https://example.test/v1/breweries?by_state=ohio&per_page=50"
        );
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();
        let snap = load_file(file.path()).unwrap();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.source, SnapshotSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn loads_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name,brewery_type,city,state,website_url").unwrap();
        writeln!(file, "1,Oak St,micro,Austin,Texas,").unwrap();
        writeln!(file, "2,Hill Brew,regional,Denver,Colorado,http://hill.test").unwrap();
        writeln!(file, "3,Lonely,,,,").unwrap();
        let snap = load_file(file.path()).unwrap();
        let names: Vec<&str> = snap.breweries().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Oak St", "Hill Brew", "Lonely"]);
        assert_eq!(snap.breweries()[2].state, "");
        assert!(snap.states.contains("Colorado"));
    }

    #[test]
    fn csv_with_no_decodable_rows_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name,brewery_type,city,state").unwrap();
        writeln!(file, "1,Oak St").unwrap();
        writeln!(file, "2").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::NoUsableRecords(2))
        ));
    }

    #[test]
    fn csv_with_header_only_is_an_empty_catalog() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name,brewery_type,city,state").unwrap();
        assert!(load_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::UnsupportedExtension(ext)) if ext == "parquet"
        ));
    }
}
