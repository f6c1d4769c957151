//! Terminal client for the metadata analysis service.
//!
//! The library is split the way the binary uses it:
//! - `services::metadata_gateway` talks HTTP to the `/metadata` resource,
//! - `controllers::metadata_list` is the list view-model (pagination, create,
//!   status changes, edit with change detection),
//! - `services::display` holds the pure formatting helpers,
//! - `handlers` and `routes` map terminal input onto the controller.

pub mod config;
pub mod controllers;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
