//! Web server module
//!
//! JSON API over the repositories and the search engine, plus the static
//! frontend.

mod error;
mod extract;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use routes::create_router;
pub use state::AppState;
