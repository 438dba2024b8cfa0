//! Pure task projection: scope, search, status, priority filters and sorting.
//!
//! # Responsibility
//! - Turn the canonical task collection into the ordered slice a view shows.
//! - Keep every call a pure function of its inputs; the clock is an explicit
//!   parameter and no state is owned here.

pub mod dates;
pub mod projection;
