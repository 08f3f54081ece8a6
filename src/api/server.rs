use crate::api::routes::{self, SharedClient, SharedState};
use std::net::SocketAddr;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `port` - Port number to listen on for incoming HTTP connections
/// * `state` - Application state served by the API
/// * `client` - Generation client used by the generate endpoints
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok when the server shuts down, Error if it fails to bind or serve
pub async fn launch_server(
    port: u16,
    state: SharedState,
    client: SharedClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::app(state, client);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
