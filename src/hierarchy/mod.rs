//! Team hierarchy projection.
//!
//! Turns the nested AVP / manager / field-officer payload into a flat list of
//! [`TeamCard`]s that the view can filter by category and group by role.

mod card;
mod filter;
mod group;
mod projector;

pub use card::*;
pub use filter::*;
pub use group::*;
pub use projector::*;
