//! Behaviour of the generated `Order` repository against a recording
//! database.

use baserepo::{Criteria, Fields, Query, RepoError, Value, apply_all};
use order_fixture::order::{LineItem, Order};
use order_fixture::order_base_repo::orderBaseRepo;
use rstest::{fixture, rstest};
use test_helpers::recording::{Call, RecordingDatabase};

type Repo = orderBaseRepo<RecordingDatabase>;

#[fixture]
fn repo() -> Repo {
    orderBaseRepo::new(RecordingDatabase::new())
}

#[rstest]
fn create_assigns_a_key_to_new_orders(repo: Repo) {
    let saved = repo.create(Order::new("paid", 1200)).expect("create order");

    assert_eq!(saved.id, Some(1));
    assert_eq!(
        repo.db().calls(),
        [Call::Create {
            table: "orders",
            key: 1
        }]
    );
}

#[rstest]
fn create_refuses_orders_with_a_key(repo: Repo) {
    let order = Order {
        id: Some(7),
        ..Order::new("paid", 1200)
    };

    let err = repo.create(order).expect_err("key is not blank");

    assert!(matches!(err, RepoError::PrimaryNotBlank));
    assert!(repo.db().calls().is_empty());
}

#[rstest]
fn zero_key_counts_as_blank(repo: Repo) {
    let order = Order {
        id: Some(0),
        ..Order::new("paid", 1200)
    };

    let saved = repo.create(order).expect("create order");

    assert_eq!(saved.id, Some(1));
}

#[rstest]
fn get_by_folds_criteria_in_order(repo: Repo) {
    let criteria = [
        Criteria::and("status = ?", ["paid"]),
        Criteria::order_by("total", "desc", false),
        Criteria::limit(10),
        Criteria::offset(20),
    ];

    let orders = repo.get_by(&criteria).expect("query orders");

    assert!(orders.is_empty());
    assert_eq!(
        repo.db().calls(),
        [Call::Find {
            table: "orders",
            query: apply_all(Query::new(), &criteria),
        }]
    );
}

#[rstest]
fn get_all_applies_no_criteria(repo: Repo) {
    repo.get_all().expect("query orders");

    assert_eq!(
        repo.db().calls(),
        [Call::Find {
            table: "orders",
            query: Query::new(),
        }]
    );
}

#[rstest]
fn get_looks_up_the_primary_key(repo: Repo) {
    let err = repo.get(42).expect_err("recording database has no rows");

    assert!(matches!(err, RepoError::RecordNotFound));
    assert_eq!(
        repo.db().calls(),
        [Call::Find {
            table: "orders",
            query: Query::new().and("id = ?", vec![Value::from(42_u64)]),
        }]
    );
}

#[rstest]
fn first_and_last_delegate_with_criteria(repo: Repo) {
    let criteria = [Criteria::and("total > ?", [100_i64])];
    let query = apply_all(Query::new(), &criteria);

    let first = repo.get_by_first(&criteria);
    let last = repo.get_by_last(&criteria);

    assert!(matches!(first, Err(RepoError::RecordNotFound)));
    assert!(matches!(last, Err(RepoError::RecordNotFound)));
    assert_eq!(
        repo.db().calls(),
        [
            Call::First {
                table: "orders",
                query: query.clone(),
            },
            Call::Last {
                table: "orders",
                query,
            },
        ]
    );
}

#[rstest]
fn update_and_delete_pass_the_entity_through(repo: Repo) {
    let order = Order {
        id: Some(3),
        ..Order::new("paid", 1200)
    };
    let fields = Fields::from([("status".to_owned(), Value::from("refunded"))]);
    let criteria = [Criteria::and("status = ?", ["paid"])];
    let query = apply_all(Query::new(), &criteria);

    repo.update(&order, &fields, &criteria).expect("update order");
    repo.delete(&order, &[]).expect("delete order");

    assert_eq!(
        repo.db().calls(),
        [
            Call::Updates {
                table: "orders",
                query,
                key: Some(3),
                fields,
            },
            Call::Delete {
                table: "orders",
                query: Query::new(),
                key: Some(3),
            },
        ]
    );
}

#[rstest]
fn related_names_both_tables(repo: Repo) {
    let order = Order {
        id: Some(3),
        ..Order::new("paid", 1200)
    };
    let mut items: Vec<LineItem> = Vec::new();

    repo.related(&order, &mut items, &[Criteria::preload("Product")])
        .expect("load line items");

    assert_eq!(
        repo.db().calls(),
        [Call::Related {
            table: "orders",
            related: "line_items",
            query: Query::new().preload("Product"),
        }]
    );
}

#[rstest]
fn schema_operations_pass_arguments_through(repo: Repo) {
    repo.auto_migrate().expect("migrate");
    repo.add_unique_index("idx_orders_number", &["number"])
        .expect("unique index");
    repo.add_foreign_key("customer_id", "customers(id)", "CASCADE", "RESTRICT")
        .expect("foreign key");
    repo.add_index("idx_orders_status", &["status", "total"])
        .expect("index");

    assert_eq!(
        repo.db().calls(),
        [
            Call::AutoMigrate { table: "orders" },
            Call::AddUniqueIndex {
                table: "orders",
                name: "idx_orders_number".to_owned(),
                columns: vec!["number".to_owned()],
            },
            Call::AddForeignKey {
                table: "orders",
                field: "customer_id".to_owned(),
                dest: "customers(id)".to_owned(),
                on_delete: "CASCADE".to_owned(),
                on_update: "RESTRICT".to_owned(),
            },
            Call::AddIndex {
                table: "orders",
                name: "idx_orders_status".to_owned(),
                columns: vec!["status".to_owned(), "total".to_owned()],
            },
        ]
    );
}
