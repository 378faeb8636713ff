use std::path::PathBuf;
use std::sync::Arc;
use ring::rand::SystemRandom;
use rocket::{State, get, post, fs::NamedFile, response::Redirect, serde::json::Json};
use tracing::{debug, instrument};
use shared::{Catalog, RequesterIdentity};
use shared::models::*;
use crate::{
    config::Config,
    error::ApiError,
    processor::StripProcessor,
    store::VoteStore,
    utils::{parse_param, random_u64},
};

pub struct AppState {
    pub store: Arc<VoteStore>,
    pub catalog: Arc<Catalog>,
    pub rng: SystemRandom,
    pub strips_per_page: usize,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: VoteStore, catalog: Catalog, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            rng: SystemRandom::new(),
            strips_per_page: config.strips_per_page,
            static_dir: config.static_dir.clone(),
        }
    }
}

#[get("/")]
pub fn index(state: &State<AppState>) -> Result<Json<ComicPage>, ApiError> {
    comic_latest(state)
}

#[get("/comic")]
pub fn comic_latest(state: &State<AppState>) -> Result<Json<ComicPage>, ApiError> {
    let latest = state.catalog.latest_id();
    StripProcessor::comic_page(&state.catalog, &state.store, latest).map(Json)
}

#[get("/comic/<id>")]
pub fn comic(state: &State<AppState>, id: Result<ComicId, &str>) -> Result<Json<ComicPage>, ApiError> {
    let id = parse_param(id)?;
    StripProcessor::comic_page(&state.catalog, &state.store, id).map(Json)
}

#[get("/random")]
pub fn random(state: &State<AppState>) -> Result<Redirect, ApiError> {
    let roll = random_u64(&state.rng)?;
    let id = StripProcessor::pick_comic(&state.catalog, roll).ok_or(ApiError::NotFound)?;
    debug!("Random comic {}", id);
    Ok(Redirect::to(format!("/comic/{}", id)))
}

#[get("/archive")]
pub fn archive_home() -> Redirect {
    Redirect::to("/archive/1")
}

#[get("/archive/<page>")]
pub fn archive(state: &State<AppState>, page: Result<usize, &str>) -> Result<Json<StripListPage>, ApiError> {
    let page = parse_param(page)?;
    StripProcessor::archive_page(&state.catalog, &state.store, page, state.strips_per_page).map(Json)
}

#[get("/top")]
pub fn top_home() -> Redirect {
    Redirect::to("/top/1")
}

#[get("/top/<page>")]
pub fn top(state: &State<AppState>, page: Result<usize, &str>) -> Result<Json<StripListPage>, ApiError> {
    let page = parse_param(page)?;
    StripProcessor::top_page(&state.catalog, &state.store, page, state.strips_per_page).map(Json)
}

// The identity is whatever `IdentitySource` the server was started with; with
// the default peer-address source, a reverse proxy makes every visitor the
// same voter.
#[instrument(skip(state, id, identity), fields(comic = ?id))]
#[post("/like/<id>")]
pub async fn like(
    state: &State<AppState>,
    id: Result<ComicId, &str>,
    identity: RequesterIdentity,
) -> Result<Json<LikesResponse>, ApiError> {
    let id = parse_param(id)?;
    let store = Arc::clone(&state.store);
    let catalog = Arc::clone(&state.catalog);

    let likes = tokio::task::spawn_blocking(move || {
        StripProcessor::cast_vote(&catalog, &store, id, identity.as_str())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(LikesResponse { likes }))
}

#[get("/static/<path..>")]
pub async fn static_file(state: &State<AppState>, path: PathBuf) -> Option<NamedFile> {
    let file_path = state.static_dir.join(path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        None
    }
}
