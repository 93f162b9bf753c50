use crumb::{params, Context, Kind, Reflection, Value};
use crumb_core::{
    driver::{
        operation::{Delete, Filter, Insert, Key, Query, Update},
        Operation,
    },
    stmt::Stored,
};
use pretty_assertions::assert_eq;
use tests::{schemas, tests, DbTest};

fn schema() -> Reflection {
    schemas! {
        "user" => |user| {
            user.attribute("name", Kind::String);
            user.attribute("age", Kind::Integer);
        },
    }
}

fn key(id: i64) -> Key {
    Key {
        column: "id".to_string(),
        value: Stored::Integer(id),
    }
}

async fn basic_crud(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    // ========== CREATE ==========
    let mut user = users
        .create(params! { "name" => "Alice", "age" => 30 })
        .unwrap();
    user.insert(&cx).await.unwrap();
    assert!(test.log().has_insert());

    assert_eq!(
        test.log().pop().expect("Expected insert operation"),
        Operation::Insert(Insert {
            table: "users".to_string(),
            primary_key: "id".to_string(),
            values: vec![
                ("name".to_string(), Stored::from("Alice")),
                ("age".to_string(), Stored::Integer(30)),
            ],
        })
    );

    // ========== READ ==========
    let mut user = users.find(&cx, 1).await.unwrap();

    assert_eq!(
        test.log().pop().expect("Expected query operation"),
        Operation::Query(Query {
            table: "users".to_string(),
            filters: vec![Filter::Eq {
                column: "id".to_string(),
                value: Stored::Integer(1),
            }],
            ..Query::default()
        })
    );

    // ========== UPDATE ==========
    user.set("age", 31).unwrap();
    user.update(&cx).await.unwrap();

    assert_eq!(
        test.log().pop().expect("Expected update operation"),
        Operation::Update(Update {
            table: "users".to_string(),
            key: key(1),
            values: vec![
                ("name".to_string(), Stored::from("Alice")),
                ("age".to_string(), Stored::Integer(31)),
            ],
        })
    );

    // ========== DELETE ==========
    user.delete(&cx).await.unwrap();

    assert_eq!(
        test.log().pop().expect("Expected delete operation"),
        Operation::Delete(Delete {
            table: "users".to_string(),
            key: key(1),
        })
    );

    assert!(test.log().is_empty());
}

async fn where_lowers_to_filters(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    db.relation("user")
        .unwrap()
        .where_("name", "Alice")
        .where_("age >= ?", 18)
        .where_("nickname = ?", Value::Null)
        .to_a(&cx)
        .await
        .unwrap();

    let Some(Operation::Query(query)) = test.log().pop() else {
        panic!("expected a query");
    };
    assert_eq!(
        query.filters,
        [
            Filter::Eq {
                column: "name".to_string(),
                value: Stored::from("Alice"),
            },
            Filter::Predicate {
                text: "age >= ?".to_string(),
                args: vec![Stored::Integer(18)],
            },
            Filter::Predicate {
                text: "nickname = ?".to_string(),
                args: vec![Stored::Null],
            },
        ]
    );
}

async fn find_issues_one_query(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    users
        .insert_all(
            &cx,
            [
                params! { "id" => 7, "name" => "Alice", "age" => 30 },
                params! { "id" => 8, "name" => "Bob", "age" => 41 },
            ],
        )
        .await
        .unwrap();
    test.log().clear();

    let user = users.find(&cx, 8).await.unwrap();
    assert_eq!(user.get("name"), Some(&Value::from("Bob")));
    assert_eq!(test.log().len(), 1);
    assert!(test.log().has_query());
    assert!(!test.log().has_insert());
}

tests!(basic_crud, where_lowers_to_filters, find_issues_one_query);
