//! Declaration resolver.
//!
//! Parses a module directory's Rust sources into [`SourceUnit`]s and resolves
//! a type name to the unit that declares it. Only top-level `struct`, `enum`,
//! `union` and `type` items count as named-type declarations.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use syn::ext::IdentExt;
use tracing::{debug, warn};

use crate::error::GenerateError;

/// File names whose module is the directory itself rather than a child.
const DIRECTORY_MODULE_FILES: [&str; 3] = ["lib.rs", "main.rs", "mod.rs"];

/// Kind of a top-level item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `struct` item.
    Struct,
    /// `enum` item.
    Enum,
    /// `union` item.
    Union,
    /// `type` alias item.
    TypeAlias,
    /// Any other item; never matched by [`Package::resolve`].
    Other,
}

impl DeclarationKind {
    /// Returns `true` for kinds that declare a named type.
    #[must_use]
    pub const fn is_named_type(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// One top-level item of a source file. `name` has any `r#` prefix removed
/// and is `None` for unnamed items such as `impl` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    kind: DeclarationKind,
    name: Option<String>,
}

impl Declaration {
    fn from_item(item: &syn::Item) -> Self {
        let (kind, ident) = match item {
            syn::Item::Struct(def) => (DeclarationKind::Struct, Some(&def.ident)),
            syn::Item::Enum(def) => (DeclarationKind::Enum, Some(&def.ident)),
            syn::Item::Union(def) => (DeclarationKind::Union, Some(&def.ident)),
            syn::Item::Type(def) => (DeclarationKind::TypeAlias, Some(&def.ident)),
            syn::Item::Trait(def) => (DeclarationKind::Other, Some(&def.ident)),
            syn::Item::Fn(def) => (DeclarationKind::Other, Some(&def.sig.ident)),
            syn::Item::Mod(def) => (DeclarationKind::Other, Some(&def.ident)),
            syn::Item::Const(def) => (DeclarationKind::Other, Some(&def.ident)),
            syn::Item::Static(def) => (DeclarationKind::Other, Some(&def.ident)),
            _ => (DeclarationKind::Other, None),
        };
        Self {
            kind,
            name: ident.map(|id| id.unraw().to_string()),
        }
    }

    fn declares_type(&self, type_name: &str) -> bool {
        self.kind.is_named_type() && self.name.as_deref() == Some(type_name)
    }
}

/// One parsed input file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: Utf8PathBuf,
    module: Option<String>,
    declarations: Vec<Declaration>,
}

impl SourceUnit {
    /// Parses `text` as the contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Parse`] with the location of the first
    /// offending token when `text` is not a valid Rust file.
    pub fn parse(path: Utf8PathBuf, text: &str) -> Result<Self, GenerateError> {
        let file = syn::parse_file(text).map_err(|err| {
            let start = err.span().start();
            GenerateError::Parse {
                path: path.clone(),
                line: start.line,
                column: start.column + 1,
                message: err.to_string(),
            }
        })?;
        let declarations: Vec<Declaration> =
            file.items.iter().map(Declaration::from_item).collect();
        let module = module_name(&path);
        debug!(%path, declarations = declarations.len(), "parsed source file");
        Ok(Self {
            path,
            module,
            declarations,
        })
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Directory containing the file.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        self.path.parent().unwrap_or_else(|| Utf8Path::new("."))
    }

    /// Module the file defines relative to its directory, or `None` when the
    /// file is the directory's own module (`lib.rs`, `main.rs`, `mod.rs`).
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    fn find_type(&self, type_name: &str) -> Option<(&str, DeclarationKind)> {
        self.declarations
            .iter()
            .filter(|declaration| declaration.declares_type(type_name))
            .find_map(|declaration| {
                declaration
                    .name
                    .as_deref()
                    .map(|name| (name, declaration.kind))
            })
    }
}

fn module_name(path: &Utf8Path) -> Option<String> {
    let file_name = path.file_name()?;
    if DIRECTORY_MODULE_FILES.contains(&file_name) {
        return None;
    }
    path.file_stem().map(str::to_owned)
}

/// A named type found in a parsed package.
#[derive(Debug, Clone, Copy)]
pub struct TypeDeclaration<'a> {
    name: &'a str,
    kind: DeclarationKind,
    unit: &'a SourceUnit,
}

impl<'a> TypeDeclaration<'a> {
    /// Declared type name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Item kind of the declaration.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Unit that declares the type.
    #[must_use]
    pub const fn unit(&self) -> &'a SourceUnit {
        self.unit
    }
}

/// Inputs selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSet {
    /// Parse every Rust source file directly inside a directory.
    Directory(Utf8PathBuf),
    /// Parse exactly these files as one module directory.
    Files(Vec<Utf8PathBuf>),
}

impl InputSet {
    /// Classifies positional arguments.
    ///
    /// No arguments means the current directory. A single argument naming a
    /// directory selects directory mode; anything else is an explicit file
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] when a single argument cannot be
    /// inspected.
    pub fn from_args(args: &[Utf8PathBuf]) -> Result<Self, GenerateError> {
        match args {
            [] => Ok(Self::Directory(Utf8PathBuf::from("."))),
            [single] => {
                let metadata = single.metadata().map_err(|source| GenerateError::Io {
                    path: single.clone(),
                    source,
                })?;
                if metadata.is_dir() {
                    Ok(Self::Directory(single.clone()))
                } else {
                    Ok(Self::Files(vec![single.clone()]))
                }
            }
            many => Ok(Self::Files(many.to_vec())),
        }
    }
}

/// Every parsed unit of one module directory.
#[derive(Debug, Clone)]
pub struct Package {
    directory: Utf8PathBuf,
    units: Vec<SourceUnit>,
}

impl Package {
    /// Parses the files selected by `inputs`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Package::parse_dir`] and
    /// [`Package::parse_files`].
    pub fn load(inputs: &InputSet) -> Result<Self, GenerateError> {
        match inputs {
            InputSet::Directory(directory) => Self::parse_dir(directory),
            InputSet::Files(files) => Self::parse_files(files),
        }
    }

    /// Parses every non-hidden `*.rs` regular file directly inside
    /// `directory`, in file-name order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Directory`] when the directory cannot be
    /// listed, [`GenerateError::NoSourceFiles`] when it holds no Rust sources,
    /// and any error raised while reading or parsing a file.
    pub fn parse_dir(directory: &Utf8Path) -> Result<Self, GenerateError> {
        let absolute = absolute_dir(directory)?;
        let dir = Dir::open_ambient_dir(&absolute, ambient_authority()).map_err(|source| {
            GenerateError::Directory {
                path: directory.to_path_buf(),
                source,
            }
        })?;

        let mut names = Vec::new();
        for entry_result in dir.entries().map_err(|source| GenerateError::Directory {
            path: directory.to_path_buf(),
            source,
        })? {
            let entry = entry_result.map_err(|source| GenerateError::Directory {
                path: directory.to_path_buf(),
                source,
            })?;
            let name = entry.file_name().map_err(|source| GenerateError::Directory {
                path: directory.to_path_buf(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| GenerateError::Io {
                path: directory.join(&name),
                source,
            })?;
            if file_type.is_file() && is_source_file_name(&name) {
                names.push(name);
            } else {
                debug!(directory = %directory, entry = %name, "skipping non-source entry");
            }
        }

        if names.is_empty() {
            return Err(GenerateError::NoSourceFiles {
                directory: directory.to_path_buf(),
            });
        }
        names.sort();

        let units = names
            .iter()
            .map(|name| read_unit(&dir, &absolute, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            directory: absolute,
            units,
        })
    }

    /// Parses exactly `files`, skipping arguments that are not `*.rs`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NoSourceFiles`] when no argument is a Rust
    /// source, [`GenerateError::MixedPackage`] when the sources live in
    /// different directories, and any error raised while reading or parsing.
    pub fn parse_files(files: &[Utf8PathBuf]) -> Result<Self, GenerateError> {
        let mut selected: Vec<&str> = Vec::new();
        let mut package_dir: Option<Utf8PathBuf> = None;

        for file in files {
            let Some(name) = file.file_name().filter(|_| file.extension() == Some("rs")) else {
                debug!(path = %file, "skipping non-Rust input");
                continue;
            };
            let parent = absolute_dir(parent_or_current(file))?;
            match &package_dir {
                Some(first) if *first != parent => {
                    return Err(GenerateError::MixedPackage {
                        first: first.clone(),
                        other: parent,
                    });
                }
                Some(_) => {}
                None => package_dir = Some(parent),
            }
            selected.push(name);
        }

        let Some(directory) = package_dir else {
            return Err(GenerateError::NoSourceFiles {
                directory: Utf8PathBuf::from("."),
            });
        };
        let dir = Dir::open_ambient_dir(&directory, ambient_authority()).map_err(|source| {
            GenerateError::Directory {
                path: directory.clone(),
                source,
            }
        })?;

        let units = selected
            .iter()
            .map(|name| read_unit(&dir, &directory, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { directory, units })
    }

    /// Builds a package from already parsed units.
    #[must_use]
    pub const fn from_units(directory: Utf8PathBuf, units: Vec<SourceUnit>) -> Self {
        Self { directory, units }
    }

    /// Absolute module directory.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Units in parse order.
    #[must_use]
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// Finds the first unit, in parse order, declaring a type named exactly
    /// `type_name`.
    ///
    /// Later declarations of the same name are reported at warn level and
    /// otherwise ignored.
    #[must_use]
    pub fn resolve(&self, type_name: &str) -> Option<TypeDeclaration<'_>> {
        let mut matches = self
            .units
            .iter()
            .filter_map(|unit| unit.find_type(type_name).map(|found| (unit, found)));
        let (unit, (name, kind)) = matches.next()?;
        for (duplicate, _) in matches {
            warn!(
                type_name,
                used = %unit.path(),
                ignored = %duplicate.path(),
                "type is declared more than once; using the first declaration"
            );
        }
        Some(TypeDeclaration { name, kind, unit })
    }
}

fn is_source_file_name(name: &str) -> bool {
    !name.starts_with('.') && Utf8Path::new(name).extension() == Some("rs")
}

fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Absolute form of `path` with `.` and `..` components resolved lexically.
fn absolute_dir(path: &Utf8Path) -> Result<Utf8PathBuf, GenerateError> {
    let native = std::path::absolute(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let absolute = Utf8PathBuf::from_path_buf(native).map_err(GenerateError::NonUtf8Path)?;
    Ok(clean(&absolute))
}

fn clean(path: &Utf8Path) -> Utf8PathBuf {
    let mut cleaned = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

fn read_unit(dir: &Dir, directory: &Utf8Path, name: &str) -> Result<SourceUnit, GenerateError> {
    let path = directory.join(name);
    let text = dir.read_to_string(name).map_err(|source| GenerateError::Io {
        path: path.clone(),
        source,
    })?;
    SourceUnit::parse(path, &text)
}
