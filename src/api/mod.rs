/// JSON error body and mapping from domain errors
pub mod errors;
/// Request handlers, one per operation exposed to the shell
pub mod handlers;
/// Router and shared state types
pub mod routes;
/// HTTP server launcher
pub mod server;
