pub mod catchers;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod processor;
pub mod routes;
pub mod store;
pub mod utils;
pub use shared::{models::*, catalog::*, requester::*};

use rocket::{catchers, routes, Build, Rocket};
use crate::{
    catchers::{bad_request, internal_error, not_found},
    lifecycle::VoteStoreLifecycle,
    routes::*,
};

/// Assembles the server around an already loaded store and catalog.
pub fn build_rocket(state: AppState, identity_source: IdentitySource) -> Rocket<Build> {
    rocket::build()
        .attach(VoteStoreLifecycle)
        .manage(state)
        .manage(identity_source)
        .mount(
            "/",
            routes![
                index,
                comic_latest,
                comic,
                random,
                archive_home,
                archive,
                top_home,
                top,
                like,
                static_file
            ],
        )
        .register("/", catchers![bad_request, not_found, internal_error])
}
