//! Test helpers shared across the `baserepo` workspace.
//!
//! - [`package`] builds throwaway module directories for the resolver and the
//!   emitter.
//! - [`recording`] provides a [`baserepo::Database`] that records every call.
//! - [`figment`] wraps `figment::Jail` for configuration layering tests.

pub mod figment;
pub mod package;
pub mod recording;
