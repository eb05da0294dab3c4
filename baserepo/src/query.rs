//! Ordered query-builder state.
//!
//! A [`Query`] records clauses in the order they were applied and never
//! normalises them, so two criteria lists that differ only in order produce
//! distinguishable states. Whether the difference matters is decided by the
//! engine that consumes the query; [`Query::to_statement`] documents the
//! reference rendering.

use crate::value::Value;

/// One recorded query-builder step.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Condition joined with `AND`.
    Where {
        /// SQL fragment with `?` placeholders.
        condition: String,
        /// Values bound to the placeholders.
        args: Vec<Value>,
    },
    /// Negated condition joined with `AND`.
    Not {
        /// SQL fragment with `?` placeholders.
        condition: String,
        /// Values bound to the placeholders.
        args: Vec<Value>,
    },
    /// Condition joined with `OR`.
    Or {
        /// SQL fragment with `?` placeholders.
        condition: String,
        /// Values bound to the placeholders.
        args: Vec<Value>,
    },
    /// Column projection; the last one applied wins.
    Select {
        /// Column list fragment.
        columns: String,
        /// Values bound to placeholders in the projection.
        args: Vec<Value>,
    },
    /// Ordering expression such as `created_at desc`.
    Order {
        /// Column and direction.
        expr: String,
        /// Discard previously applied orderings first.
        reorder: bool,
    },
    /// Row limit; the last one applied wins.
    Limit(u64),
    /// Row offset; the last one applied wins.
    Offset(u64),
    /// Association to load alongside the rows.
    Preload(String),
}

/// Immutable-by-convention query state; every builder consumes and returns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: Vec<Clause>,
}

/// SQL text plus the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Rendered SQL.
    pub sql: String,
    /// Bound values.
    pub args: Vec<Value>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Appends an `AND` condition.
    #[must_use]
    pub fn and(self, condition: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Clause::Where {
            condition: condition.into(),
            args,
        })
    }

    /// Appends a negated condition.
    #[must_use]
    pub fn not(self, condition: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Clause::Not {
            condition: condition.into(),
            args,
        })
    }

    /// Appends an `OR` condition.
    #[must_use]
    pub fn or(self, condition: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Clause::Or {
            condition: condition.into(),
            args,
        })
    }

    /// Replaces the projection.
    #[must_use]
    pub fn select(self, columns: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(Clause::Select {
            columns: columns.into(),
            args,
        })
    }

    /// Appends an ordering expression.
    #[must_use]
    pub fn order(self, expr: impl Into<String>, reorder: bool) -> Self {
        self.push(Clause::Order {
            expr: expr.into(),
            reorder,
        })
    }

    /// Sets the row limit.
    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.push(Clause::Limit(limit))
    }

    /// Sets the row offset.
    #[must_use]
    pub fn offset(self, offset: u64) -> Self {
        self.push(Clause::Offset(offset))
    }

    /// Requests eager loading of an association.
    #[must_use]
    pub fn preload(self, association: impl Into<String>) -> Self {
        self.push(Clause::Preload(association.into()))
    }

    /// Clauses in application order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Associations requested through [`Query::preload`], in order.
    pub fn preloads(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().filter_map(|clause| match clause {
            Clause::Preload(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Renders a `SELECT` against `table`.
    ///
    /// Conditions are joined in application order, each wrapped in
    /// parentheses; `Not` renders as `AND NOT (..)`. The last projection,
    /// limit and offset win, so `limit(5).offset(10)` and
    /// `offset(10).limit(5)` render identically here even though the two
    /// queries are not equal. Preloads do not affect the statement.
    #[must_use]
    pub fn to_statement(&self, table: &str) -> Statement {
        let mut projection: Option<(&str, &[Value])> = None;
        let mut conditions: Vec<(&str, String, &[Value])> = Vec::new();
        let mut orders: Vec<&str> = Vec::new();
        let mut limit = None;
        let mut offset = None;

        for clause in &self.clauses {
            match clause {
                Clause::Where { condition, args } => {
                    conditions.push(("AND", format!("({condition})"), args.as_slice()));
                }
                Clause::Not { condition, args } => {
                    conditions.push(("AND", format!("NOT ({condition})"), args.as_slice()));
                }
                Clause::Or { condition, args } => {
                    conditions.push(("OR", format!("({condition})"), args.as_slice()));
                }
                Clause::Select { columns, args } => {
                    projection = Some((columns.as_str(), args.as_slice()));
                }
                Clause::Order { expr, reorder } => {
                    if *reorder {
                        orders.clear();
                    }
                    orders.push(expr.as_str());
                }
                Clause::Limit(value) => limit = Some(*value),
                Clause::Offset(value) => offset = Some(*value),
                Clause::Preload(_) => {}
            }
        }

        let mut args = Vec::new();
        let columns = match projection {
            Some((columns, select_args)) => {
                args.extend_from_slice(select_args);
                columns
            }
            None => "*",
        };

        let mut sql = format!("SELECT {columns} FROM {table}");
        for (index, &(joiner, ref condition, condition_args)) in conditions.iter().enumerate() {
            let keyword = if index == 0 { "WHERE" } else { joiner };
            sql.push_str(&format!(" {keyword} {condition}"));
            args.extend_from_slice(condition_args);
        }
        if !orders.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", orders.join(", ")));
        }
        if let Some(value) = limit {
            sql.push_str(&format!(" LIMIT {value}"));
        }
        if let Some(value) = offset {
            sql.push_str(&format!(" OFFSET {value}"));
        }

        Statement { sql, args }
    }

    fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}
