use crumb::{params, Context, Kind, Reflection, Value};
use tests::{assert_err, schemas, tests, DbTest};

fn schema() -> Reflection {
    schemas! {
        "user" => |user| {
            user.attribute("name", Kind::String).length(1, 20);
            user.attribute("age", Kind::Integer).range(0.0, 150.0);
            user.attribute("email", Kind::String)
                .nullable()
                .pattern("^[^@]+@[^@]+$");
        },
    }
}

async fn crud(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    // ========== CREATE ==========
    let mut user = users
        .create(params! { "name" => "Ishmael", "age" => 27 })
        .unwrap();
    assert!(!user.is_persisted());

    user.insert(&cx).await.unwrap();
    assert!(user.is_persisted());
    let id = user.id().cloned().unwrap();

    // ========== READ ==========
    let mut found = users.find(&cx, id.clone()).await.unwrap();
    assert_eq!(found.id(), Some(&id));
    assert_eq!(found.get("name"), Some(&Value::from("Ishmael")));
    assert_eq!(found.get("age"), Some(&Value::from(27)));
    assert_eq!(found.get("email"), Some(&Value::Null));

    // ========== UPDATE ==========
    found.set("email", "ishmael@pequod.sea").unwrap();
    found.update(&cx).await.unwrap();

    let reloaded = users.find(&cx, id.clone()).await.unwrap();
    assert_eq!(
        reloaded.get("email"),
        Some(&Value::from("ishmael@pequod.sea"))
    );

    // ========== DELETE ==========
    found.delete(&cx).await.unwrap();
    assert!(found.is_deleted());

    let err = assert_err!(users.find(&cx, id).await);
    assert!(err.is_record_not_found());
}

async fn generated_ids_increase(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    let mut ids = vec![];
    for name in ["Starbuck", "Stubb", "Flask"] {
        let mut user = users.create(params! { "name" => name, "age" => 30 }).unwrap();
        user.insert(&cx).await.unwrap();
        ids.push(user.id().cloned().unwrap());
    }

    assert_eq!(ids, [Value::from(1), Value::from(2), Value::from(3)]);
}

async fn find_missing_record(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let err = assert_err!(db.relation("user").unwrap().find(&cx, 99).await);
    assert!(err.is_record_not_found());
    assert!(err.is_not_found());
}

async fn validation_fails_fast(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    // Both attributes are invalid; only the first is reported
    let err = assert_err!(users.create(params! {
        "name" => "Captain Ahab of the Pequod, Nantucket",
        "age" => 200,
    }));
    assert!(err.is_validation());
    assert!(err.to_string().contains("`name`"), "{err}");
    assert!(!err.to_string().contains("`age`"), "{err}");

    let err = assert_err!(users.create(params! {
        "name" => "Queequeg",
        "age" => 30,
        "email" => "harpooner",
    }));
    assert!(err.is_validation());
    assert!(err.to_string().contains("`email`"), "{err}");

    let err = assert_err!(users.create(params! { "age" => 30 }));
    assert!(err.is_validation());
    assert!(err.to_string().contains("must not be null"), "{err}");

    // Nothing reached the connection
    assert!(test.log().is_empty());
}

async fn insert_twice_fails(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let users = db.relation("user").unwrap();

    let mut user = users
        .create(params! { "name" => "Pip", "age" => 12 })
        .unwrap();
    user.insert(&cx).await.unwrap();

    let err = assert_err!(user.insert(&cx).await);
    assert!(err.is_invalid_statement());
    assert_eq!(users.to_a(&cx).await.unwrap().len(), 1);
}

async fn update_missing_record(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut user = db
        .relation("user")
        .unwrap()
        .create(params! { "id" => 42, "name" => "Fedallah", "age" => 50 })
        .unwrap();

    let err = assert_err!(user.update(&cx).await);
    assert!(err.is_record_not_found());
}

tests!(
    crud,
    generated_ids_increase,
    find_missing_record,
    validation_fails_fast,
    insert_twice_fails,
    update_missing_record,
);
