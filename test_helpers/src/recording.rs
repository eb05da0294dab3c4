//! A [`Database`] double that records calls instead of touching storage.
//!
//! Reads return no rows, inserts hand out increasing primary keys and every
//! schema operation succeeds. Tests inspect [`RecordingDatabase::calls`] to
//! check what a repository delegated and with which query.

use baserepo::{Database, Entity, Fields, Query, RepoError, Result};
use parking_lot::Mutex;

/// One delegated storage call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// [`Database::find`].
    Find {
        /// Table of the requested type.
        table: &'static str,
        /// Query as received.
        query: Query,
    },
    /// [`Database::first`].
    First {
        /// Table of the requested type.
        table: &'static str,
        /// Query as received.
        query: Query,
    },
    /// [`Database::last`].
    Last {
        /// Table of the requested type.
        table: &'static str,
        /// Query as received.
        query: Query,
    },
    /// [`Database::create`].
    Create {
        /// Table written to.
        table: &'static str,
        /// Key assigned to the new row.
        key: u64,
    },
    /// [`Database::updates`].
    Updates {
        /// Table written to.
        table: &'static str,
        /// Query as received.
        query: Query,
        /// Primary key of the entity passed in.
        key: Option<u64>,
        /// Fields as received.
        fields: Fields,
    },
    /// [`Database::delete`].
    Delete {
        /// Table written to.
        table: &'static str,
        /// Query as received.
        query: Query,
        /// Primary key of the entity passed in.
        key: Option<u64>,
    },
    /// [`Database::related`].
    Related {
        /// Table of the owning entity.
        table: &'static str,
        /// Table of the associated rows.
        related: &'static str,
        /// Query as received.
        query: Query,
    },
    /// [`Database::auto_migrate`].
    AutoMigrate {
        /// Migrated table.
        table: &'static str,
    },
    /// [`Database::add_unique_index`].
    AddUniqueIndex {
        /// Indexed table.
        table: &'static str,
        /// Index name.
        name: String,
        /// Indexed columns.
        columns: Vec<String>,
    },
    /// [`Database::add_foreign_key`].
    AddForeignKey {
        /// Referencing table.
        table: &'static str,
        /// Referencing column.
        field: String,
        /// Referenced `table(column)`.
        dest: String,
        /// `ON DELETE` action.
        on_delete: String,
        /// `ON UPDATE` action.
        on_update: String,
    },
    /// [`Database::add_index`].
    AddIndex {
        /// Indexed table.
        table: &'static str,
        /// Index name.
        name: String,
        /// Indexed columns.
        columns: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    last_key: u64,
}

/// Storage double recording every call in order.
#[derive(Debug, Default)]
pub struct RecordingDatabase {
    state: Mutex<State>,
}

impl RecordingDatabase {
    /// Creates a database with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_owned()).collect()
}

impl Database for RecordingDatabase {
    fn find<T: Entity>(&self, query: &Query) -> Result<Vec<T>> {
        self.record(Call::Find {
            table: T::table_name(),
            query: query.clone(),
        });
        Ok(Vec::new())
    }

    fn first<T: Entity>(&self, query: &Query) -> Result<T> {
        self.record(Call::First {
            table: T::table_name(),
            query: query.clone(),
        });
        Err(RepoError::RecordNotFound)
    }

    fn last<T: Entity>(&self, query: &Query) -> Result<T> {
        self.record(Call::Last {
            table: T::table_name(),
            query: query.clone(),
        });
        Err(RepoError::RecordNotFound)
    }

    fn create<T: Entity>(&self, entity: &mut T) -> Result<()> {
        let mut state = self.state.lock();
        state.last_key += 1;
        let key = state.last_key;
        entity.set_primary_key(key);
        state.calls.push(Call::Create {
            table: T::table_name(),
            key,
        });
        Ok(())
    }

    fn updates<T: Entity>(&self, query: &Query, entity: &T, fields: &Fields) -> Result<()> {
        self.record(Call::Updates {
            table: T::table_name(),
            query: query.clone(),
            key: entity.primary_key(),
            fields: fields.clone(),
        });
        Ok(())
    }

    fn delete<T: Entity>(&self, query: &Query, entity: &T) -> Result<()> {
        self.record(Call::Delete {
            table: T::table_name(),
            query: query.clone(),
            key: entity.primary_key(),
        });
        Ok(())
    }

    fn related<T: Entity, R: Entity>(
        &self,
        query: &Query,
        _claim: &T,
        _related: &mut Vec<R>,
    ) -> Result<()> {
        self.record(Call::Related {
            table: T::table_name(),
            related: R::table_name(),
            query: query.clone(),
        });
        Ok(())
    }

    fn auto_migrate<T: Entity>(&self) -> Result<()> {
        self.record(Call::AutoMigrate {
            table: T::table_name(),
        });
        Ok(())
    }

    fn add_unique_index<T: Entity>(&self, name: &str, columns: &[&str]) -> Result<()> {
        self.record(Call::AddUniqueIndex {
            table: T::table_name(),
            name: name.to_owned(),
            columns: owned(columns),
        });
        Ok(())
    }

    fn add_foreign_key<T: Entity>(
        &self,
        field: &str,
        dest: &str,
        on_delete: &str,
        on_update: &str,
    ) -> Result<()> {
        self.record(Call::AddForeignKey {
            table: T::table_name(),
            field: field.to_owned(),
            dest: dest.to_owned(),
            on_delete: on_delete.to_owned(),
            on_update: on_update.to_owned(),
        });
        Ok(())
    }

    fn add_index<T: Entity>(&self, name: &str, columns: &[&str]) -> Result<()> {
        self.record(Call::AddIndex {
            table: T::table_name(),
            name: name.to_owned(),
            columns: owned(columns),
        });
        Ok(())
    }
}
