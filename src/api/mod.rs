pub mod models;
pub mod routes;

pub use routes::{configure, AppState};
