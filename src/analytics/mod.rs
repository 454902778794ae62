//! Aggregations over resolved film records.
//!
//! Everything here is a pure function over a slice of [`EffectiveFilm`];
//! nothing is cached, views recompute per request. Callers pass records
//! already resolved through the overlay so corrected values flow into every
//! aggregate.

use crate::resolver::EffectiveFilm;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rupees per crore, for revenue rollups.
const CRORE: f64 = 10_000_000.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreShare {
    pub genre: String,
    /// Percentage of that year's films, 0 when the year has no films.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreShareYear {
    pub year: i32,
    pub shares: Vec<GenreShare>,
}

/// Per-year genre share over an inclusive year range. Every year in the
/// range gets a row, including years with no films (all shares 0).
pub fn genre_share_by_year(
    films: &[EffectiveFilm],
    genres: &[String],
    (min_year, max_year): (i32, i32),
) -> Vec<GenreShareYear> {
    let mut per_year: HashMap<i32, HashMap<&str, usize>> = HashMap::new();
    for film in films {
        *per_year
            .entry(film.year)
            .or_default()
            .entry(film.genre.as_str())
            .or_default() += 1;
    }

    (min_year..=max_year)
        .map(|year| {
            let counts = per_year.get(&year);
            let total: usize = counts.map(|c| c.values().sum()).unwrap_or(0);
            let shares = genres
                .iter()
                .map(|genre| {
                    let count = counts
                        .and_then(|c| c.get(genre.as_str()))
                        .copied()
                        .unwrap_or(0);
                    let share = if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64 * 100.0
                    };
                    GenreShare {
                        genre: genre.clone(),
                        share,
                    }
                })
                .collect();
            GenreShareYear { year, shares }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreBreakdownEntry {
    pub genre: String,
    /// Rounded integer percentage. Rounding is not renormalized, so the
    /// column can sum to 99 or 101.
    pub percentage: u32,
}

/// Share of each genre over the whole slice, largest first. Ties keep the
/// caller's genre enumeration order.
pub fn genre_breakdown(films: &[EffectiveFilm], genres: &[String]) -> Vec<GenreBreakdownEntry> {
    let total = films.len().max(1) as f64;
    let mut entries: Vec<GenreBreakdownEntry> = genres
        .iter()
        .map(|genre| {
            let count = films.iter().filter(|f| &f.genre == genre).count();
            GenreBreakdownEntry {
                genre: genre.clone(),
                percentage: (count as f64 / total * 100.0).round() as u32,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    entries
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    /// Integer rating 0 through 10.
    pub bucket: u8,
    pub count: usize,
}

/// Distribution of ratings over eleven integer buckets. Ratings round to
/// the nearest bucket and clamp into 0..=10; films without a rating land
/// in bucket 0.
pub fn rating_histogram(films: &[EffectiveFilm]) -> Vec<RatingBucket> {
    let mut counts = [0usize; 11];
    for film in films {
        let bucket = film
            .rating
            .map(|r| r.round().clamp(0.0, 10.0) as usize)
            .unwrap_or(0);
        counts[bucket] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(bucket, &count)| RatingBucket {
            bucket: bucket as u8,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRevenue {
    pub year: i32,
    /// Total revenue for the year, rounded to whole crores.
    pub crores: i64,
}

/// Total revenue per year over an inclusive range. Films without a revenue
/// figure contribute nothing; years with no films report 0.
pub fn revenue_by_year(
    films: &[EffectiveFilm],
    (min_year, max_year): (i32, i32),
) -> Vec<YearRevenue> {
    let mut per_year: HashMap<i32, u64> = HashMap::new();
    for film in films {
        *per_year.entry(film.year).or_default() += film.revenue.unwrap_or(0);
    }
    (min_year..=max_year)
        .map(|year| {
            let total = per_year.get(&year).copied().unwrap_or(0);
            YearRevenue {
                year,
                crores: (total as f64 / CRORE).round() as i64,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankMetric {
    Rating,
    Revenue,
}

/// The top `limit` films by the given metric.
///
/// Ranking by rating skips films without one; ranking by revenue treats a
/// missing figure as zero. Ties keep ingest order (the sort is stable).
pub fn top_films(films: &[EffectiveFilm], metric: RankMetric, limit: usize) -> Vec<EffectiveFilm> {
    let mut ranked: Vec<EffectiveFilm> = match metric {
        RankMetric::Rating => films.iter().filter(|f| f.rating.is_some()).cloned().collect(),
        RankMetric::Revenue => films.to_vec(),
    };
    match metric {
        RankMetric::Rating => ranked.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
        RankMetric::Revenue => {
            ranked.sort_by(|a, b| b.revenue.unwrap_or(0).cmp(&a.revenue.unwrap_or(0)))
        }
    }
    ranked.truncate(limit);
    ranked
}

/// Restrict to a fixed allow-list of titles, then rank. Titles missing from
/// the slice are simply absent from the result.
pub fn ranked_titles(
    films: &[EffectiveFilm],
    titles: &[&str],
    metric: RankMetric,
) -> Vec<EffectiveFilm> {
    let subset: Vec<EffectiveFilm> = films
        .iter()
        .filter(|f| titles.contains(&f.title.as_str()))
        .cloned()
        .collect();
    top_films(&subset, metric, subset.len())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub film_count: usize,
    pub average_rating: Option<f64>,
    pub top_genre: Option<String>,
    pub distinct_years: usize,
    pub top_rated_title: Option<String>,
    pub top_grossing_title: Option<String>,
}

/// Headline numbers for the slice.
pub fn summary(films: &[EffectiveFilm], genres: &[String]) -> SummaryStats {
    let rated: Vec<f64> = films.iter().filter_map(|f| f.rating).collect();
    let average_rating = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    let top_genre = genre_breakdown(films, genres)
        .into_iter()
        .next()
        .filter(|e| e.percentage > 0)
        .map(|e| e.genre);

    let distinct_years = {
        let mut years: Vec<i32> = films.iter().map(|f| f.year).collect();
        years.sort_unstable();
        years.dedup();
        years.len()
    };

    SummaryStats {
        film_count: films.len(),
        average_rating,
        top_genre,
        distinct_years,
        top_rated_title: top_films(films, RankMetric::Rating, 1)
            .first()
            .map(|f| f.title.clone()),
        top_grossing_title: top_films(films, RankMetric::Revenue, 1)
            .first()
            .filter(|f| f.revenue.unwrap_or(0) > 0)
            .map(|f| f.title.clone()),
    }
}
