use super::{Catalog, Film};
use anyhow::{Context, Result};
use tracing::info;

/// Load the catalog from a JSON dataset file (an array of film records).
///
/// Loading is all-or-nothing: a missing file, malformed JSON or invalid
/// record aborts startup, there is no partial catalog.
pub fn load_catalog<P: AsRef<std::path::Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file_text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {:?}", path))?;
    let films: Vec<Film> = serde_json::from_str(&file_text)
        .with_context(|| format!("Failed to parse dataset file {:?}", path))?;
    let catalog = Catalog::new(films)?;

    let (min_year, max_year) = catalog.year_bounds().unwrap_or((0, 0));
    info!(
        "Catalog has {} films across {} genres, years {}-{}",
        catalog.len(),
        catalog.genres().len(),
        min_year,
        max_year
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_dataset_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": "1", "title": "Ghilli", "year": 2004, "genre": "Action", "rating": 8.1 }},
                {{ "id": "2", "title": "96", "year": 2018, "genre": "Romance" }}
            ]"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_by_id("1").unwrap().rating, Some(8.1));
    }

    #[test]
    fn malformed_dataset_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(load_catalog(file.path()).is_err());
    }

    #[test]
    fn missing_dataset_is_fatal() {
        assert!(load_catalog("/nonexistent/films.json").is_err());
    }
}
