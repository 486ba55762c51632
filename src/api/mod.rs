pub mod response;
pub mod routes;

pub use routes::{create_router, AppState, CONFIG_PATH, FALLBACK_CONFIG_PATH};
