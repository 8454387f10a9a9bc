//! Web server module
//!
//! Exposes the search proxy as an HTTP-triggered function.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
