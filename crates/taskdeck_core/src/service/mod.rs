//! View-facing state orchestration.
//!
//! # Responsibility
//! - Hold the client-side canonical task/list collections.
//! - Run the confirmed-response mutation protocol over the repositories.
//!
//! # See also
//! - `query` for the pure projection the views render from.

pub mod workspace;
