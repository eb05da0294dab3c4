//! Compiles a repository generated by `baserepo-gen` against the `baserepo`
//! runtime.
//!
//! The build script renders `order_base_repo.rs` for [`order::Order`] into
//! `OUT_DIR`; the crate's tests drive it with a recording database.

pub mod order;

/// Repository generated for [`order::Order`].
pub mod order_base_repo {
    include!(concat!(env!("OUT_DIR"), "/order_base_repo.rs"));
}
