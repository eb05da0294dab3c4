//! Runtime surface for repositories emitted by `baserepo-gen`.
//!
//! Generated `*_base_repo.rs` files import this crate. It defines the
//! [`Criteria`] options callers pass to repository methods, the ordered
//! [`Query`] state those options fold into, and the [`Entity`] and
//! [`Database`] traits a storage engine implements. No engine ships here;
//! generated code is generic over any [`Database`].
//!
//! ```
//! use baserepo::{Criteria, Query};
//!
//! let query = baserepo::apply_all(
//!     Query::new(),
//!     &[Criteria::and("age > ?", [18_i64]), Criteria::limit(10)],
//! );
//! let statement = query.to_statement("users");
//! assert_eq!(statement.sql, "SELECT * FROM users WHERE (age > ?) LIMIT 10");
//! ```

mod criteria;
mod entity;
mod error;
mod query;
mod value;

pub use criteria::{Criteria, apply_all};
pub use entity::{Database, Entity};
pub use error::{RepoError, Result};
pub use query::{Clause, Query, Statement};
pub use value::{Fields, Value};
