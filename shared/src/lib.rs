pub mod catalog;
pub mod error;
pub mod models;
pub mod requester;
pub mod validation;

pub use catalog::{Catalog, CatalogError, DEFAULT_LATEST_COMIC};
pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use requester::{IdentitySource, RequesterIdentity};
pub use validation::*;

#[cfg(test)]
mod tests;
