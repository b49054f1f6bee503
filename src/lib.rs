//! Noventer company dashboard client.
//!
//! The `data` feature exposes the domain model, forms and page math only; the
//! default `client` feature adds the API client, list controller, views and
//! the command-line front end.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod cli;
#[cfg(feature = "client")]
pub mod controller;
#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "client")]
pub mod lookup;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod routes;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
#[cfg(feature = "client")]
pub mod views;
