//! Browser CRUD shell for the roster
//!
//! Serves a single-page UI over the record store. Every request reloads the
//! backing file and every mutation rewrites it, so concurrent requests can
//! race and clobber each other's writes; that limitation is accepted rather
//! than papered over with locking.

mod handlers;
mod render;

use axum::routing::get;
use axum::Router;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state: just the backing file path; the store itself is reopened
/// per request
#[derive(Debug, Clone)]
pub struct WebState {
    /// Path of the JSON backing file
    pub data_file: PathBuf,
}

/// Build the application router
#[must_use]
pub fn app(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/add", axum::routing::post(handlers::add))
        .route("/edit/:id", get(handlers::edit_form).post(handlers::edit_save))
        .route("/delete/:id", get(handlers::delete))
        .route("/export.csv", get(handlers::export_csv))
        .with_state(state)
}

/// Bind and serve the web shell until the process is stopped
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run(addr: SocketAddr, data_file: PathBuf) -> Result<(), Box<dyn Error>> {
    let state = Arc::new(WebState { data_file });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    logger::info!("Web shell listening on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
