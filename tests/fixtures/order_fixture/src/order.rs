//! Row types the repository is generated for.

use baserepo::Entity;

/// A customer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    /// Primary key, unset until inserted.
    pub id: Option<u64>,
    /// Order status, e.g. `paid`.
    pub status: String,
    /// Total in cents.
    pub total: i64,
}

impl Order {
    /// Unsaved order with the given status and total.
    #[must_use]
    pub fn new(status: impl Into<String>, total: i64) -> Self {
        Self {
            id: None,
            status: status.into(),
            total,
        }
    }
}

impl Entity for Order {
    fn table_name() -> &'static str {
        "orders"
    }

    fn primary_key(&self) -> Option<u64> {
        self.id
    }

    fn set_primary_key(&mut self, key: u64) {
        self.id = Some(key);
    }
}

/// One line of an [`Order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    /// Primary key.
    pub id: Option<u64>,
    /// Owning order.
    pub order_id: u64,
}

impl Entity for LineItem {
    fn table_name() -> &'static str {
        "line_items"
    }

    fn primary_key(&self) -> Option<u64> {
        self.id
    }

    fn set_primary_key(&mut self, key: u64) {
        self.id = Some(key);
    }
}
