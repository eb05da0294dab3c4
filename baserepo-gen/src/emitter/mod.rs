//! Template emitter.
//!
//! [`Emitter::render`] turns a resolved declaration into the text of its
//! repository file without touching the filesystem; [`Emitter::emit`] renders
//! and writes. Every call builds its output from scratch, so nothing carries
//! over from one type to the next.

pub mod templates;

use std::fmt;

use camino::Utf8PathBuf;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::naming::{Identifiers, rust_ident};
use crate::output;
use crate::resolver::{Package, TypeDeclaration};
use templates::{Bindings, METHOD_TEMPLATES, REPOSITORY_TEMPLATE};

/// Program name recorded in generated headers.
pub const TOOL_NAME: &str = "baserepo-gen";

/// Default crate providing the runtime data-access surface.
pub const DEFAULT_RUNTIME_CRATE: &str = "baserepo";

/// Whether output went through the pretty-printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatting {
    /// Parsed and pretty-printed.
    Canonical,
    /// Written as raw token text after the pretty-printer rejected it.
    Raw,
}

/// Options shared by every emitted file.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Path generated files import the runtime surface from.
    pub runtime_crate: syn::Path,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            runtime_crate: syn::Path::from(Ident::new(
                DEFAULT_RUNTIME_CRATE,
                proc_macro2::Span::call_site(),
            )),
        }
    }
}

/// Output rendered for one type.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Names derived from the type.
    pub identifiers: Identifiers,
    /// Absolute destination path.
    pub output_path: Utf8PathBuf,
    /// Complete file contents.
    pub contents: String,
    /// How `contents` was produced.
    pub formatting: Formatting,
}

/// Renders repository files.
#[derive(Debug, Clone)]
pub struct Emitter {
    options: EmitterOptions,
    invocation: String,
}

impl Emitter {
    /// Creates an emitter. `invocation` holds the command-line arguments,
    /// excluding the program name, recorded in every header.
    #[must_use]
    pub fn new(options: EmitterOptions, invocation: impl Into<String>) -> Self {
        Self {
            options,
            invocation: invocation.into(),
        }
    }

    /// Renders the repository file for `declaration`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidIdentifier`] when the type name or the
    /// declaring file's module name cannot be used as an identifier.
    pub fn render(
        &self,
        declaration: &TypeDeclaration<'_>,
    ) -> Result<GeneratedArtifact, GenerateError> {
        let identifiers = Identifiers::derive(declaration.name())?;
        let bindings = Bindings::new(&identifiers);

        let entity_import = entity_import(declaration, bindings.type_name())?;
        let runtime = &self.options.runtime_crate;
        let repository = (REPOSITORY_TEMPLATE.render)(&bindings);
        let methods = METHOD_TEMPLATES
            .iter()
            .map(|template| (template.render)(&bindings));
        let tokens = quote! {
            #entity_import
            use #runtime::{Criteria, Database, Entity, Fields, Query, RepoError, Result};

            #repository
            #(#methods)*
        };

        let (body, formatting) = canonicalize(tokens);
        let contents = format!("{}\n\n{body}", self.header());
        let output_path = declaration
            .unit()
            .directory()
            .join(identifiers.output_file_name());

        Ok(GeneratedArtifact {
            identifiers,
            output_path,
            contents,
            formatting,
        })
    }

    /// Renders the repository file for `declaration` and writes it beside the
    /// declaring file, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Emitter::render`] and
    /// [`GenerateError::Write`] when the file cannot be written.
    pub fn emit(
        &self,
        declaration: &TypeDeclaration<'_>,
    ) -> Result<GeneratedArtifact, GenerateError> {
        let artifact = self.render(declaration)?;
        output::write_atomic(&artifact.output_path, &artifact.contents)?;
        info!(
            type_name = declaration.name(),
            path = %artifact.output_path,
            "wrote repository"
        );
        Ok(artifact)
    }

    fn header(&self) -> String {
        let command = if self.invocation.is_empty() {
            TOOL_NAME.to_owned()
        } else {
            format!("{TOOL_NAME} {}", self.invocation)
        };
        format!("// Code generated by \"{command}\"; DO NOT EDIT.")
    }
}

fn entity_import(
    declaration: &TypeDeclaration<'_>,
    type_name: &Ident,
) -> Result<TokenStream, GenerateError> {
    let Some(module) = declaration.unit().module() else {
        return Ok(quote!(use super::#type_name;));
    };
    let module_ident = rust_ident(module, "declaring file name is not a valid module name")?;
    Ok(quote!(use super::#module_ident::#type_name;))
}

/// Pretty-prints `tokens` as a Rust file.
///
/// Tokens that do not parse are returned as raw text with a warning.
#[must_use]
pub fn canonicalize(tokens: TokenStream) -> (String, Formatting) {
    syn::parse2::<syn::File>(tokens.clone()).map_or_else(
        |err| {
            warn!(error = %err, "generated code does not parse; writing it unformatted");
            (format!("{tokens}\n"), Formatting::Raw)
        },
        |file| (prettyplease::unparse(&file), Formatting::Canonical),
    )
}

/// Result of one requested type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The type was found and its repository written.
    Generated {
        /// Requested type name.
        type_name: String,
        /// Written file.
        path: Utf8PathBuf,
        /// How the file contents were produced.
        formatting: Formatting,
    },
    /// No parsed file declares the type.
    NotFound {
        /// Requested type name.
        type_name: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated {
                type_name, path, ..
            } => write!(f, "Type {type_name} repository is generated: {path}"),
            Self::NotFound { type_name } => write!(f, "Type {type_name} is not found"),
        }
    }
}

/// Resolves requested types in a parsed package and emits their repositories.
#[derive(Debug)]
pub struct Generator {
    package: Package,
    emitter: Emitter,
}

impl Generator {
    /// Pairs a parsed package with an emitter.
    #[must_use]
    pub const fn new(package: Package, emitter: Emitter) -> Self {
        Self { package, emitter }
    }

    /// Generates the repository for `type_name`.
    ///
    /// A type no parsed file declares yields [`Outcome::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Emitter::emit`].
    pub fn generate(&self, type_name: &str) -> Result<Outcome, GenerateError> {
        let Some(declaration) = self.package.resolve(type_name) else {
            return Ok(Outcome::NotFound {
                type_name: type_name.to_owned(),
            });
        };
        let artifact = self.emitter.emit(&declaration)?;
        Ok(Outcome::Generated {
            type_name: type_name.to_owned(),
            path: artifact.output_path,
            formatting: artifact.formatting,
        })
    }
}
