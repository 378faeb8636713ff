use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tracing::{error, info};
use crate::routes::AppState;

/// Reports the vote store at liftoff and writes a final snapshot at shutdown.
pub struct VoteStoreLifecycle;

#[rocket::async_trait]
impl Fairing for VoteStoreLifecycle {
    fn info(&self) -> Info {
        Info {
            name: "Vote store lifecycle",
            kind: Kind::Liftoff | Kind::Shutdown,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let Some(state) = rocket.state::<AppState>() else { return };

        match state.store.snapshot() {
            Ok(db) => info!(
                "📚 Serving {} comics (latest #{}), {} likes across {} comics",
                state.catalog.len(),
                state.catalog.latest_id(),
                db.total_likes(),
                db.likes.len(),
            ),
            Err(e) => error!("Vote store unavailable at liftoff: {}", e),
        }
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        let Some(state) = rocket.state::<AppState>() else { return };

        match state.store.flush() {
            Ok(()) => info!("💾 Vote database flushed on shutdown"),
            Err(e) => error!("Failed to flush vote database on shutdown: {}", e),
        }
    }
}
