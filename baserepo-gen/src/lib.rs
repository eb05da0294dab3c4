//! Repository generator for declared Rust types.
//!
//! The pipeline has two stages. The [`resolver`] parses one module directory
//! and finds the file declaring a requested type; the [`emitter`] renders a
//! `<type>_base_repo.rs` file beside it with CRUD, criteria and migration
//! methods that delegate to the `baserepo` runtime.
//!
//! ```
//! use baserepo_gen::{Emitter, EmitterOptions, Package, SourceUnit};
//!
//! let unit = SourceUnit::parse("/app/src/user.rs".into(), "pub struct User { id: u64 }")?;
//! let package = Package::from_units("/app/src".into(), vec![unit]);
//! let user = package.resolve("User").expect("User is declared");
//!
//! let artifact = Emitter::new(EmitterOptions::default(), "-t User").render(&user)?;
//! assert_eq!(artifact.output_path.as_str(), "/app/src/user_base_repo.rs");
//! assert!(artifact.contents.contains("use super::user::User;"));
//! assert!(artifact.contents.contains("pub struct userBaseRepo<D>"));
//! # Ok::<(), baserepo_gen::GenerateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod naming;
pub mod output;
pub mod resolver;

pub use config::{ConfigOverrides, GeneratorConfig};
pub use emitter::{
    Emitter, EmitterOptions, Formatting, GeneratedArtifact, Generator, Outcome, canonicalize,
};
pub use error::GenerateError;
pub use naming::Identifiers;
pub use resolver::{InputSet, Package, SourceUnit, TypeDeclaration};
