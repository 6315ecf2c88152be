pub mod handlers;
pub mod routes;

pub use routes::{create_app, create_default_state, AppState};
