//! Typed templates for the generated repository.
//!
//! Each [`MethodTemplate`] renders one self-contained `impl` block for the
//! repository struct. Templates only see the values in [`Bindings`] and list
//! the [`Slot`]s they read, so a template can neither reference a missing
//! substitution nor declare one it never uses without failing the registry
//! test below.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::naming::Identifiers;

/// Substitution keys available to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Repository struct name, e.g. `userBaseRepo`.
    RepoName,
    /// Entity type name, e.g. `User`.
    TypeName,
    /// Borrowed entity type, e.g. `&User`.
    TypeNameWithPointer,
}

/// Token values substituted into templates.
#[derive(Debug, Clone)]
pub struct Bindings {
    repo_name: Ident,
    type_name: Ident,
    type_name_with_pointer: TokenStream,
}

impl Bindings {
    /// Builds bindings from validated identifiers.
    #[must_use]
    pub fn new(identifiers: &Identifiers) -> Self {
        let type_name = identifiers.type_ident().clone();
        Self {
            repo_name: Ident::new(identifiers.repo_name(), Span::call_site()),
            type_name_with_pointer: quote!(&#type_name),
            type_name,
        }
    }

    /// Entity type identifier.
    #[must_use]
    pub const fn type_name(&self) -> &Ident {
        &self.type_name
    }
}

/// One generated `impl` block.
#[derive(Debug, Clone, Copy)]
pub struct MethodTemplate {
    /// Name of the method the block defines; `repository` for the struct
    /// definition.
    pub name: &'static str,
    /// Slots the block reads.
    pub slots: &'static [Slot],
    /// Renders the block.
    pub render: fn(&Bindings) -> TokenStream,
}

/// Struct definition, constructor and accessor.
pub const REPOSITORY_TEMPLATE: MethodTemplate = MethodTemplate {
    name: "repository",
    slots: &[Slot::RepoName],
    render: repository,
};

/// Method blocks in emission order.
pub const METHOD_TEMPLATES: [MethodTemplate; 14] = [
    MethodTemplate {
        name: "apply_criteria",
        slots: &[Slot::RepoName],
        render: apply_criteria,
    },
    MethodTemplate {
        name: "related",
        slots: &[Slot::RepoName, Slot::TypeNameWithPointer],
        render: related,
    },
    MethodTemplate {
        name: "get",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: get,
    },
    MethodTemplate {
        name: "get_all",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: get_all,
    },
    MethodTemplate {
        name: "get_by",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: get_by,
    },
    MethodTemplate {
        name: "get_by_first",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: get_by_first,
    },
    MethodTemplate {
        name: "get_by_last",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: get_by_last,
    },
    MethodTemplate {
        name: "create",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: create,
    },
    MethodTemplate {
        name: "update",
        slots: &[Slot::RepoName, Slot::TypeNameWithPointer],
        render: update,
    },
    MethodTemplate {
        name: "delete",
        slots: &[Slot::RepoName, Slot::TypeNameWithPointer],
        render: delete,
    },
    MethodTemplate {
        name: "auto_migrate",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: auto_migrate,
    },
    MethodTemplate {
        name: "add_unique_index",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: add_unique_index,
    },
    MethodTemplate {
        name: "add_foreign_key",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: add_foreign_key,
    },
    MethodTemplate {
        name: "add_index",
        slots: &[Slot::RepoName, Slot::TypeName],
        render: add_index,
    },
];

fn repository(bindings: &Bindings) -> TokenStream {
    let Bindings { repo_name, .. } = bindings;
    quote! {
        /// Data-access repository generated for one entity type.
        #[expect(
            non_camel_case_types,
            reason = "repository names start with the lower-cased entity name"
        )]
        #[derive(Debug, Clone)]
        pub struct #repo_name<D> {
            db: D,
        }

        impl<D: Database> #repo_name<D> {
            /// Wraps a database handle.
            #[must_use]
            pub const fn new(db: D) -> Self {
                Self { db }
            }

            /// Returns the wrapped database handle.
            #[must_use]
            pub const fn db(&self) -> &D {
                &self.db
            }
        }
    }
}

fn apply_criteria(bindings: &Bindings) -> TokenStream {
    let Bindings { repo_name, .. } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            fn apply_criteria(&self, criteria: &[Criteria]) -> Query {
                criteria
                    .iter()
                    .fold(self.db.query(), |search, option| option.apply(search))
            }
        }
    }
}

fn related(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name_with_pointer,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads the rows associated with `claim` into `related`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the association cannot be loaded.
            pub fn related<R: Entity>(
                &self,
                claim: #type_name_with_pointer,
                related: &mut Vec<R>,
                criteria: &[Criteria],
            ) -> Result<()> {
                self.db.related(&self.apply_criteria(criteria), claim, related)
            }
        }
    }
}

fn get(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads the row whose primary key is `id`.
            ///
            /// # Errors
            ///
            /// Returns [`RepoError::RecordNotFound`] when no row matches.
            pub fn get(&self, id: u64) -> Result<#type_name> {
                let query = self.db.query().and("id = ?", vec![id.into()]);
                self.db
                    .find::<#type_name>(&query)?
                    .into_iter()
                    .next()
                    .ok_or(RepoError::RecordNotFound)
            }
        }
    }
}

fn get_all(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads every row.
            ///
            /// # Errors
            ///
            /// Returns the database error when the read fails.
            pub fn get_all(&self) -> Result<Vec<#type_name>> {
                self.get_by(&[])
            }
        }
    }
}

fn get_by(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads every row matching `criteria`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the read fails.
            pub fn get_by(&self, criteria: &[Criteria]) -> Result<Vec<#type_name>> {
                self.db.find(&self.apply_criteria(criteria))
            }
        }
    }
}

fn get_by_first(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads the first row matching `criteria`.
            ///
            /// # Errors
            ///
            /// Returns [`RepoError::RecordNotFound`] when no row matches.
            pub fn get_by_first(&self, criteria: &[Criteria]) -> Result<#type_name> {
                self.db.first(&self.apply_criteria(criteria))
            }
        }
    }
}

fn get_by_last(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Loads the last row matching `criteria`.
            ///
            /// # Errors
            ///
            /// Returns [`RepoError::RecordNotFound`] when no row matches.
            pub fn get_by_last(&self, criteria: &[Criteria]) -> Result<#type_name> {
                self.db.last(&self.apply_criteria(criteria))
            }
        }
    }
}

fn create(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Inserts `entity` and returns it with its assigned primary key.
            ///
            /// # Errors
            ///
            /// Returns [`RepoError::PrimaryNotBlank`] without touching the
            /// database when `entity` already has a primary key.
            pub fn create(&self, mut entity: #type_name) -> Result<#type_name> {
                if !self.db.new_record(&entity) {
                    return Err(RepoError::PrimaryNotBlank);
                }
                self.db.create(&mut entity)?;
                Ok(entity)
            }
        }
    }
}

fn update(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name_with_pointer,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Writes `fields` onto `entity`'s rows matching `criteria`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the update fails.
            pub fn update(
                &self,
                entity: #type_name_with_pointer,
                fields: &Fields,
                criteria: &[Criteria],
            ) -> Result<()> {
                self.db.updates(&self.apply_criteria(criteria), entity, fields)
            }
        }
    }
}

fn delete(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name_with_pointer,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Deletes `entity`, restricted by `criteria`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the delete fails.
            pub fn delete(&self, entity: #type_name_with_pointer, criteria: &[Criteria]) -> Result<()> {
                self.db.delete(&self.apply_criteria(criteria), entity)
            }
        }
    }
}

fn auto_migrate(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Brings the entity's table in line with its definition.
            ///
            /// # Errors
            ///
            /// Returns the database error when the schema change fails.
            pub fn auto_migrate(&self) -> Result<()> {
                self.db.auto_migrate::<#type_name>()
            }
        }
    }
}

fn add_unique_index(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Adds a unique index named `name` over `columns`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the schema change fails.
            pub fn add_unique_index(&self, name: &str, columns: &[&str]) -> Result<()> {
                self.db.add_unique_index::<#type_name>(name, columns)
            }
        }
    }
}

fn add_foreign_key(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Adds a foreign key from `field` to `dest`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the schema change fails.
            pub fn add_foreign_key(
                &self,
                field: &str,
                dest: &str,
                on_delete: &str,
                on_update: &str,
            ) -> Result<()> {
                self.db
                    .add_foreign_key::<#type_name>(field, dest, on_delete, on_update)
            }
        }
    }
}

fn add_index(bindings: &Bindings) -> TokenStream {
    let Bindings {
        repo_name,
        type_name,
        ..
    } = bindings;
    quote! {
        impl<D: Database> #repo_name<D> {
            /// Adds an index named `name` over `columns`.
            ///
            /// # Errors
            ///
            /// Returns the database error when the schema change fails.
            pub fn add_index(&self, name: &str, columns: &[&str]) -> Result<()> {
                self.db.add_index::<#type_name>(name, columns)
            }
        }
    }
}
