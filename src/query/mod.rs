//! Filtering, sorting and pagination of resolved film records.
//!
//! Filters compose as an AND. Search matches against the effective record,
//! so a corrected director name is findable the moment the edit lands.
//! Pages are 1-indexed; a page past the end returns an empty item list with
//! the true totals, and callers are expected to reset to page 1 whenever
//! they change a filter.

use crate::resolver::EffectiveFilm;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    YearDesc,
    YearAsc,
    RatingDesc,
    RatingAsc,
    RevenueDesc,
    TitleAsc,
}

#[derive(Debug, Clone)]
pub struct QueryParams {
    /// Inclusive year range, applied before any other filter.
    pub year_range: Option<(i32, i32)>,
    /// Case-insensitive substring over title, director and cast.
    pub search: String,
    pub genre: Option<String>,
    pub sort: SortKey,
    /// 1-indexed.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            year_range: None,
            search: String::new(),
            genre: None,
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    pub items: Vec<EffectiveFilm>,
    /// Count after filtering, before pagination.
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

fn matches_search(film: &EffectiveFilm, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&film.title)
        || film.director.as_deref().map(hit).unwrap_or(false)
        || film.actor.as_deref().map(hit).unwrap_or(false)
        || film.cast_list.iter().any(|name| hit(name))
}

/// Run a listing query over resolved records.
pub fn query(films: &[EffectiveFilm], params: &QueryParams) -> QueryPage {
    let needle = params.search.trim().to_lowercase();

    let mut matched: Vec<EffectiveFilm> = films
        .iter()
        .filter(|film| {
            params
                .year_range
                .map(|(min, max)| (min..=max).contains(&film.year))
                .unwrap_or(true)
        })
        .filter(|film| needle.is_empty() || matches_search(film, &needle))
        .filter(|film| {
            params
                .genre
                .as_deref()
                .map(|genre| film.genre == genre)
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    // Stable sort keeps ingest order for equal keys.
    match params.sort {
        SortKey::YearDesc => matched.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::YearAsc => matched.sort_by(|a, b| a.year.cmp(&b.year)),
        SortKey::RatingDesc => matched.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
        SortKey::RatingAsc => matched.sort_by(|a, b| {
            a.rating
                .unwrap_or(0.0)
                .total_cmp(&b.rating.unwrap_or(0.0))
        }),
        SortKey::RevenueDesc => {
            matched.sort_by(|a, b| b.revenue.unwrap_or(0).cmp(&a.revenue.unwrap_or(0)))
        }
        SortKey::TitleAsc => matched.sort_by(|a, b| a.title.cmp(&b.title)),
    }

    let total_count = matched.len();
    let page_size = params.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);
    let page = params.page.max(1);

    let start = (page - 1).saturating_mul(page_size);
    let items = if start >= total_count {
        Vec::new()
    } else {
        matched[start..(start + page_size).min(total_count)].to_vec()
    };

    QueryPage {
        items,
        total_count,
        total_pages,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(title: &str, year: i32, genre: &str, rating: Option<f64>, revenue: Option<u64>) -> EffectiveFilm {
        EffectiveFilm {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_owned(),
            year,
            genre: genre.to_owned(),
            rating,
            revenue,
            director: None,
            actor: None,
            cast_list: vec![],
            poster_url: None,
            synopsis: None,
            runtime_minutes: None,
            languages: vec![],
            imdb_id: None,
            imdb_rating: None,
            edited: false,
        }
    }

    fn fixture() -> Vec<EffectiveFilm> {
        let mut ghilli = film("Ghilli", 2004, "Action", Some(8.1), Some(500_000_000));
        ghilli.director = Some("Dharani".to_owned());
        ghilli.cast_list = vec!["Vijay".to_owned(), "Trisha".to_owned()];
        vec![
            ghilli,
            film("Anniyan", 2005, "Thriller", Some(8.2), Some(560_000_000)),
            film("96", 2018, "Romance", Some(8.5), None),
            film("Master", 2021, "Action", Some(7.3), Some(2_500_000_000)),
            film("Vikram", 2022, "Action", Some(8.3), Some(4_000_000_000)),
        ]
    }

    #[test]
    fn filters_compose_as_and() {
        let films = fixture();
        let page = query(
            &films,
            &QueryParams {
                year_range: Some((2010, 2025)),
                genre: Some("Action".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(page.total_count, 2);
        // Default sort is year-desc.
        assert_eq!(page.items[0].title, "Vikram");
        assert_eq!(page.items[1].title, "Master");
    }

    #[test]
    fn search_matches_title_director_and_cast() {
        let films = fixture();

        let by_title = query(
            &films,
            &QueryParams {
                search: "vikram".to_owned(),
                ..Default::default()
            },
        );
        assert_eq!(by_title.total_count, 1);

        let by_director = query(
            &films,
            &QueryParams {
                search: "DHARANI".to_owned(),
                ..Default::default()
            },
        );
        assert_eq!(by_director.total_count, 1);
        assert_eq!(by_director.items[0].title, "Ghilli");

        let by_cast = query(
            &films,
            &QueryParams {
                search: "trisha".to_owned(),
                ..Default::default()
            },
        );
        assert_eq!(by_cast.items[0].title, "Ghilli");
    }

    #[test]
    fn rating_sort_is_deterministic_with_missing_values() {
        let films = vec![
            film("A", 2020, "Action", Some(7.0), None),
            film("B", 2020, "Action", None, None),
            film("C", 2020, "Action", Some(9.0), None),
        ];
        let page = query(
            &films,
            &QueryParams {
                sort: SortKey::RatingDesc,
                ..Default::default()
            },
        );
        let titles: Vec<&str> = page.items.iter().map(|f| f.title.as_str()).collect();
        // Missing rating sorts as zero, ties keep input order.
        assert_eq!(titles, vec!["C", "A", "B"]);

        let asc = query(
            &films,
            &QueryParams {
                sort: SortKey::RatingAsc,
                ..Default::default()
            },
        );
        assert_eq!(asc.items[0].title, "B");
    }

    #[test]
    fn pagination_reports_true_totals() {
        let films: Vec<EffectiveFilm> = (0..30)
            .map(|i| film(&format!("Film {:02}", i), 2000 + i, "Drama", None, None))
            .collect();
        let page = query(
            &films,
            &QueryParams {
                page: 2,
                ..Default::default()
            },
        );
        assert_eq!(page.total_count, 30);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), DEFAULT_PAGE_SIZE);

        let last = query(
            &films,
            &QueryParams {
                page: 3,
                ..Default::default()
            },
        );
        assert_eq!(last.items.len(), 6);
    }

    #[test]
    fn equal_sort_keys_keep_input_order() {
        let films = vec![
            film("B", 2020, "Action", Some(5.0), None),
            film("A", 2020, "Action", Some(5.0), None),
        ];
        let page = query(
            &films,
            &QueryParams {
                sort: SortKey::RatingDesc,
                ..Default::default()
            },
        );
        // Not re-ordered to alphabetical: ties preserve filter order.
        assert_eq!(page.items[0].title, "B");
        assert_eq!(page.items[1].title, "A");
    }

    #[test]
    fn empty_year_range_matches_nothing() {
        let films = fixture();
        let page = query(
            &films,
            &QueryParams {
                year_range: Some((2030, 2031)),
                ..Default::default()
            },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn concatenated_pages_reproduce_the_full_sequence() {
        let films: Vec<EffectiveFilm> = (0..25)
            .map(|i| film(&format!("Film {:02}", i), 2000 + i, "Drama", None, None))
            .collect();
        let params = QueryParams {
            sort: SortKey::TitleAsc,
            page_size: 4,
            ..Default::default()
        };

        let total_pages = query(&films, &params).total_pages;
        let mut seen: Vec<String> = Vec::new();
        for page in 1..=total_pages {
            let result = query(
                &films,
                &QueryParams {
                    page,
                    ..params.clone()
                },
            );
            seen.extend(result.items.into_iter().map(|f| f.title));
        }

        let mut expected: Vec<String> = films.iter().map(|f| f.title.clone()).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let films = fixture();
        let page = query(
            &films,
            &QueryParams {
                page: 99,
                ..Default::default()
            },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn no_match_is_an_empty_page() {
        let films = fixture();
        let page = query(
            &films,
            &QueryParams {
                search: "nonexistent film".to_owned(),
                ..Default::default()
            },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
