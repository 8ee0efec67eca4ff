//! Field Operations Console
//!
//! Client library for the field operations CRM backend: employee directory,
//! team hierarchy, stores, visits, notes, tickets and brand feedback.

pub mod client;
pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod listing;
pub mod models;
pub mod prefs;
pub mod session;

pub use client::ApiClient;
pub use config::Config;
pub use errors::ClientError;
