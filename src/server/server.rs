use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::catalog::{genre_color, genre_description, Catalog};
use crate::enrichment::EnrichmentCache;
use crate::overlay::{EditStore, FilmEdit};
use crate::query::{query, QueryParams, SortKey};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, make_analytics_routes, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub films: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        films: state.catalog.len(),
    };
    Json(stats)
}

#[derive(Deserialize, Debug, Default)]
struct FilmsQuery {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub search: Option<String>,
    pub genre: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
}

async fn list_films(
    State(state): State<ServerState>,
    Query(params): Query<FilmsQuery>,
) -> Response {
    let films = match state.resolver().resolve_all().await {
        Ok(films) => films,
        Err(err) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    };

    let year_range = match (params.from, params.to, state.catalog.year_bounds()) {
        (None, None, _) => None,
        (from, to, bounds) => {
            let (min, max) = bounds.unwrap_or((0, 0));
            Some((from.unwrap_or(min), to.unwrap_or(max)))
        }
    };

    let page = query(
        &films,
        &QueryParams {
            year_range,
            search: params.search.unwrap_or_default(),
            genre: params.genre,
            sort: params.sort.unwrap_or_default(),
            page: params.page.unwrap_or(1),
            page_size: state.config.page_size,
        },
    );
    Json(page).into_response()
}

async fn get_film(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    match state.resolver().resolve_id(&id).await {
        Ok(Some(film)) => Json(film).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn put_film_edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(partial): Json<FilmEdit>,
) -> Response {
    if state.catalog.get_by_id(&id).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Err(err) = state.edit_store.set(&id, &partial) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response();
    }
    // Respond with the record as readers will now see it.
    match state.resolver().resolve_id(&id).await {
        Ok(Some(film)) => Json(film).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn delete_film_edit(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    if state.catalog.get_by_id(&id).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    match state.edit_store.clear(&id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn delete_all_edits(State(state): State<ServerState>) -> Response {
    match state.edit_store.reset_all() {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

#[derive(Serialize)]
struct GenreEntry {
    genre: String,
    count: usize,
    color: String,
    description: String,
}

async fn get_genres(State(catalog): State<GuardedCatalog>) -> Response {
    let entries: Vec<GenreEntry> = catalog
        .genres()
        .into_iter()
        .map(|genre| GenreEntry {
            count: catalog.count_by_genre(&genre),
            color: genre_color(&genre).to_owned(),
            description: genre_description(&genre).to_owned(),
            genre,
        })
        .collect();
    Json(entries).into_response()
}

pub fn make_app(
    config: ServerConfig,
    catalog: Catalog,
    edit_store: Arc<dyn EditStore>,
    enrichment: EnrichmentCache,
) -> Result<Router> {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        catalog: Arc::new(catalog),
        edit_store,
        enrichment: Arc::new(enrichment),
        hash: env!("GIT_HASH").to_owned(),
    };

    let film_routes: Router = Router::new()
        .route("/", get(list_films))
        .route("/{id}", get(get_film))
        .route("/{id}/edit", put(put_film_edit))
        .route("/{id}/edit", delete(delete_film_edit))
        .with_state(state.clone());

    let edit_routes: Router = Router::new()
        .route("/", delete(delete_all_edits))
        .with_state(state.clone());

    let genre_routes: Router = Router::new()
        .route("/", get(get_genres))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/films", film_routes)
        .nest("/v1/edits", edit_routes)
        .nest("/v1/genres", genre_routes)
        .nest("/v1/analytics", make_analytics_routes(state.clone()));

    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    catalog: Catalog,
    edit_store: Arc<dyn EditStore>,
    enrichment: EnrichmentCache,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    page_size: usize,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        page_size,
        frontend_dir_path,
    };
    let app = make_app(config, catalog, edit_store, enrichment)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
