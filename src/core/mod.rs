//! Domain model and application state
//!
//! This module contains:
//! - Templates, projects, clients and workflow steps
//! - The template store and the template edit session
//! - Project instantiation from templates
//! - `AppState`, the single owner of all mutable data

mod client;
mod editor;
mod ids;
mod project;
mod state;
mod template;
mod template_store;
mod workflow;

pub use client::*;
pub use editor::*;
pub use ids::*;
pub use project::*;
pub use state::*;
pub use template::*;
pub use template_store::*;
pub use workflow::*;
