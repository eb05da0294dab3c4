//! Criteria options accepted by generated repository methods.
//!
//! Each option is a pure transformation of a [`Query`]. Repositories fold a
//! caller's options left to right over the base query, so the order in which
//! options are listed is preserved in the resulting state.

use crate::query::Query;
use crate::value::Value;

/// A single query transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    /// Adds an `AND` condition.
    And {
        /// SQL fragment with `?` placeholders.
        query: String,
        /// Placeholder values.
        args: Vec<Value>,
    },
    /// Adds a negated condition.
    Not {
        /// SQL fragment with `?` placeholders.
        query: String,
        /// Placeholder values.
        args: Vec<Value>,
    },
    /// Adds an `OR` condition.
    Or {
        /// SQL fragment with `?` placeholders.
        query: String,
        /// Placeholder values.
        args: Vec<Value>,
    },
    /// Restricts the projected columns.
    Select {
        /// Column list fragment.
        columns: String,
        /// Placeholder values.
        args: Vec<Value>,
    },
    /// Orders by `name orientation`.
    OrderBy {
        /// Column name.
        name: String,
        /// `asc` or `desc`.
        orientation: String,
        /// Discard previous orderings first.
        reorder: bool,
    },
    /// Caps the number of rows.
    Limit(u64),
    /// Skips leading rows.
    Offset(u64),
    /// Eager-loads an association.
    Preload(String),
}

impl Criteria {
    /// `AND` condition with bound values.
    pub fn and<I, V>(query: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::And {
            query: query.into(),
            args: collect_args(args),
        }
    }

    /// Negated condition with bound values.
    pub fn not<I, V>(query: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Not {
            query: query.into(),
            args: collect_args(args),
        }
    }

    /// `OR` condition with bound values.
    pub fn or<I, V>(query: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Or {
            query: query.into(),
            args: collect_args(args),
        }
    }

    /// Projection with bound values.
    pub fn select<I, V>(columns: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Select {
            columns: columns.into(),
            args: collect_args(args),
        }
    }

    /// Ordering on `name` in the given orientation.
    pub fn order_by(name: impl Into<String>, orientation: impl Into<String>, reorder: bool) -> Self {
        Self::OrderBy {
            name: name.into(),
            orientation: orientation.into(),
            reorder,
        }
    }

    /// Row limit.
    #[must_use]
    pub const fn limit(limit: u64) -> Self {
        Self::Limit(limit)
    }

    /// Row offset.
    #[must_use]
    pub const fn offset(offset: u64) -> Self {
        Self::Offset(offset)
    }

    /// Association preload.
    pub fn preload(field: impl Into<String>) -> Self {
        Self::Preload(field.into())
    }

    /// Applies this option to `query`, returning the new state.
    #[must_use]
    pub fn apply(&self, query: Query) -> Query {
        match self {
            Self::And { query: cond, args } => query.and(cond.clone(), args.clone()),
            Self::Not { query: cond, args } => query.not(cond.clone(), args.clone()),
            Self::Or { query: cond, args } => query.or(cond.clone(), args.clone()),
            Self::Select { columns, args } => query.select(columns.clone(), args.clone()),
            Self::OrderBy {
                name,
                orientation,
                reorder,
            } => query.order(format!("{name} {orientation}"), *reorder),
            Self::Limit(limit) => query.limit(*limit),
            Self::Offset(offset) => query.offset(*offset),
            Self::Preload(field) => query.preload(field.clone()),
        }
    }
}

/// Folds `criteria` over `base` from left to right.
#[must_use]
pub fn apply_all(base: Query, criteria: &[Criteria]) -> Query {
    criteria
        .iter()
        .fold(base, |search, option| option.apply(search))
}

fn collect_args<I, V>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    args.into_iter().map(Into::into).collect()
}
