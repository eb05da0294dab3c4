//! Traits implemented by row types and storage engines.

use crate::error::Result;
use crate::query::Query;
use crate::value::Fields;

/// A row type a repository can be generated for.
pub trait Entity {
    /// Table backing the type.
    fn table_name() -> &'static str;

    /// Primary key, or `None` before the row is inserted.
    fn primary_key(&self) -> Option<u64>;

    /// Records the key assigned by the engine on insert.
    fn set_primary_key(&mut self, key: u64);

    /// Returns `true` while the primary key is blank (`None` or zero).
    fn is_new_record(&self) -> bool {
        matches!(self.primary_key(), None | Some(0))
    }
}

/// Storage primitives generated repositories delegate to.
///
/// Every read receives the fully folded [`Query`]; engines decide how
/// clause order maps onto their own semantics.
pub trait Database {
    /// Base query criteria are folded over.
    fn query(&self) -> Query {
        Query::new()
    }

    /// Returns `true` when `entity` may be inserted.
    fn new_record<T: Entity>(&self, entity: &T) -> bool {
        entity.is_new_record()
    }

    /// Loads every row matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine fails.
    fn find<T: Entity>(&self, query: &Query) -> Result<Vec<T>>;

    /// Loads the first matching row by primary key order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepoError::RecordNotFound`] when nothing matches.
    fn first<T: Entity>(&self, query: &Query) -> Result<T>;

    /// Loads the last matching row by primary key order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepoError::RecordNotFound`] when nothing matches.
    fn last<T: Entity>(&self, query: &Query) -> Result<T>;

    /// Inserts `entity`, assigning its primary key.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine rejects the row.
    fn create<T: Entity>(&self, entity: &mut T) -> Result<()>;

    /// Writes `fields` onto the rows of `entity` matched by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine fails.
    fn updates<T: Entity>(&self, query: &Query, entity: &T, fields: &Fields) -> Result<()>;

    /// Deletes `entity`, restricted by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine fails.
    fn delete<T: Entity>(&self, query: &Query, entity: &T) -> Result<()>;

    /// Loads rows of `R` associated with `claim` into `related`.
    ///
    /// # Errors
    ///
    /// Returns an error when the association is unknown or the engine fails.
    fn related<T: Entity, R: Entity>(
        &self,
        query: &Query,
        claim: &T,
        related: &mut Vec<R>,
    ) -> Result<()>;

    /// Creates or alters the table for `T` to match its definition.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema change fails.
    fn auto_migrate<T: Entity>(&self) -> Result<()>;

    /// Adds a unique index named `name` over `columns`.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema change fails.
    fn add_unique_index<T: Entity>(&self, name: &str, columns: &[&str]) -> Result<()>;

    /// Adds a foreign key from `field` to `dest` with the given actions.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema change fails.
    fn add_foreign_key<T: Entity>(
        &self,
        field: &str,
        dest: &str,
        on_delete: &str,
        on_update: &str,
    ) -> Result<()>;

    /// Adds a non-unique index named `name` over `columns`.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema change fails.
    fn add_index<T: Entity>(&self, name: &str, columns: &[&str]) -> Result<()>;
}
