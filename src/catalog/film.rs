use serde::{Deserialize, Serialize};

/// A single immutable entry of the film catalog.
///
/// The wire format mirrors the dataset file (camelCase keys). Everything
/// beyond id/title/year/genre is optional; enrichment-capable fields
/// (synopsis, runtime, languages, imdb data) may also arrive later from the
/// enrichment side document.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub genre: String,

    #[serde(default)]
    pub rating: Option<f64>,
    /// Box office gross in the smallest currency unit. Display layers divide
    /// by 10,000,000 for crore formatting.
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub director: Option<String>,
    /// Legacy flat cast form, comma-separated names.
    #[serde(default)]
    pub actor: Option<String>,
    /// Structured cast names, preferred over `actor` when non-empty.
    #[serde(default)]
    pub cast_list: Option<Vec<String>>,
    #[serde(default)]
    pub poster_url: Option<String>,

    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_film() {
        let s = r#"
        {
            "id": "f42",
            "title": "Ghilli",
            "year": 2004,
            "genre": "Action"
        }
        "#;
        let parsed: Film = serde_json::from_str(s).unwrap();
        assert_eq!(parsed.id, "f42");
        assert_eq!(parsed.title, "Ghilli");
        assert_eq!(parsed.year, 2004);
        assert_eq!(parsed.genre, "Action");
        assert!(parsed.rating.is_none());
        assert!(parsed.cast_list.is_none());
    }

    #[test]
    fn parses_full_film() {
        let s = r#"
        {
            "id": "f1",
            "title": "Vikram",
            "year": 2022,
            "genre": "Action",
            "rating": 8.3,
            "revenue": 5000000000,
            "director": "Lokesh Kanagaraj",
            "actor": "Kamal Haasan, Vijay Sethupathi",
            "castList": ["Kamal Haasan", "Vijay Sethupathi", "Fahadh Faasil"],
            "posterUrl": "/posters/vikram.jpg",
            "runtimeMinutes": 174,
            "languages": ["Tamil"],
            "imdbId": "tt9179430",
            "imdbRating": 8.2
        }
        "#;
        let expected = Film {
            id: "f1".to_owned(),
            title: "Vikram".to_owned(),
            year: 2022,
            genre: "Action".to_owned(),
            rating: Some(8.3),
            revenue: Some(5_000_000_000),
            director: Some("Lokesh Kanagaraj".to_owned()),
            actor: Some("Kamal Haasan, Vijay Sethupathi".to_owned()),
            cast_list: Some(vec![
                "Kamal Haasan".to_owned(),
                "Vijay Sethupathi".to_owned(),
                "Fahadh Faasil".to_owned(),
            ]),
            poster_url: Some("/posters/vikram.jpg".to_owned()),
            synopsis: None,
            runtime_minutes: Some(174),
            languages: Some(vec!["Tamil".to_owned()]),
            imdb_id: Some("tt9179430".to_owned()),
            imdb_rating: Some(8.2),
        };
        match serde_json::from_str::<Film>(s) {
            Ok(x) => assert_eq!(x, expected),
            Err(e) => panic!("Did not parse json string: {}", e),
        }
    }

    #[test]
    fn rejects_film_without_year() {
        let s = r#"{ "id": "f1", "title": "Vikram", "genre": "Action" }"#;
        assert!(serde_json::from_str::<Film>(s).is_err());
    }
}
