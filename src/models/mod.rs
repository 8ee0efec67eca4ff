//! Data models for the field operations console.
//!
//! These mirror the backend JSON contract and decode defensively: absent or
//! `null` fields become empty values instead of errors.

mod activity;
mod employee;
mod hierarchy;
pub mod lenient;
mod role;
mod store;
mod team;

pub use activity::*;
pub use employee::*;
pub use hierarchy::*;
pub use role::*;
pub use store::*;
pub use team::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A backend record served under the generic `{path}/getAll`,
/// `{path}/getById`, `{path}/create`, `{path}/edit`, `{path}/delete` routes.
pub trait Resource: DeserializeOwned + Serialize + Send {
    /// Path segment of the resource, e.g. `store`.
    const PATH: &'static str;

    fn id(&self) -> i64;
}
