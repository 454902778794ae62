use crate::analytics::{
    genre_breakdown, genre_share_by_year, ranked_titles, rating_histogram, revenue_by_year,
    summary, top_films, RankMetric,
};
use crate::resolver::EffectiveFilm;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::state::ServerState;

/// Crowd-puller titles surfaced on the landing view. Curated by hand, not
/// derived from the data.
const BLOCKBUSTER_TITLES: &[&str] = &[
    "Leo",
    "2.0",
    "Sarkar",
    "Petta",
    "Bigil",
    "Master",
    "Vikram",
    "Ponniyin Selvan: I",
    "Ponniyin Selvan: II",
    "Jailer",
    "Mark Antony",
    "Captain Miller",
];

#[derive(Deserialize, Debug, Default)]
struct RangeQuery {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

#[derive(Deserialize, Debug, Default)]
struct TopQuery {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub metric: Option<RankMetric>,
    pub limit: Option<usize>,
}

/// Resolved films restricted to the requested year range, plus the
/// effective range itself (defaults to the catalog's year bounds).
async fn films_in_range(
    state: &ServerState,
    from: Option<i32>,
    to: Option<i32>,
) -> anyhow::Result<(Vec<EffectiveFilm>, (i32, i32))> {
    let films = state.resolver().resolve_all().await?;
    let (min, max) = state.catalog.year_bounds().unwrap_or((0, 0));
    let range = (from.unwrap_or(min), to.unwrap_or(max));
    let filtered = films
        .into_iter()
        .filter(|f| (range.0..=range.1).contains(&f.year))
        .collect();
    Ok((filtered, range))
}

fn internal_error(err: anyhow::Error) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response()
}

async fn get_genre_share(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    match films_in_range(&state, range.from, range.to).await {
        Ok((films, bounds)) => {
            Json(genre_share_by_year(&films, &state.catalog.genres(), bounds)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn get_genre_breakdown(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    match films_in_range(&state, range.from, range.to).await {
        Ok((films, _)) => Json(genre_breakdown(&films, &state.catalog.genres())).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_rating_histogram(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    match films_in_range(&state, range.from, range.to).await {
        Ok((films, _)) => Json(rating_histogram(&films)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_revenue_by_year(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    match films_in_range(&state, range.from, range.to).await {
        Ok((films, bounds)) => Json(revenue_by_year(&films, bounds)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_top_films(
    State(state): State<ServerState>,
    Query(params): Query<TopQuery>,
) -> Response {
    match films_in_range(&state, params.from, params.to).await {
        Ok((films, _)) => Json(top_films(
            &films,
            params.metric.unwrap_or(RankMetric::Rating),
            params.limit.unwrap_or(5),
        ))
        .into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_blockbusters(
    State(state): State<ServerState>,
    Query(params): Query<TopQuery>,
) -> Response {
    match films_in_range(&state, params.from, params.to).await {
        Ok((films, _)) => Json(ranked_titles(
            &films,
            BLOCKBUSTER_TITLES,
            params.metric.unwrap_or(RankMetric::Revenue),
        ))
        .into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_summary(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> Response {
    match films_in_range(&state, range.from, range.to).await {
        Ok((films, _)) => Json(summary(&films, &state.catalog.genres())).into_response(),
        Err(err) => internal_error(err),
    }
}

pub fn make_analytics_routes(state: ServerState) -> Router {
    Router::new()
        .route("/genre-share", get(get_genre_share))
        .route("/genre-breakdown", get(get_genre_breakdown))
        .route("/rating-histogram", get(get_rating_histogram))
        .route("/revenue-by-year", get(get_revenue_by_year))
        .route("/top-films", get(get_top_films))
        .route("/blockbusters", get(get_blockbusters))
        .route("/summary", get(get_summary))
        .with_state(state)
}
