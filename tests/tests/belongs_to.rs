use crumb::{params, Associated, Context, Kind, Reflection, Value};
use tests::{assert_err, assert_none, schemas, tests, DbTest};

fn schema() -> Reflection {
    schemas! {
        "author" => |author| {
            author.attribute("name", Kind::String);
        },
        "book" => |book| {
            book.attribute("title", Kind::String);
            book.belongs_to("author");
        },
    }
}

async fn default_foreign_key(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;
    let book = db.reflection().lookup("book").unwrap();

    let foreign_key = book.attribute("author_id").unwrap();
    assert_eq!(foreign_key.kind(), Kind::Integer);
    assert!(foreign_key.is_nullable());
    assert!(!foreign_key.is_primary_key());
}

async fn resolves_target_by_foreign_key(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let authors = db
        .relation("author")
        .unwrap()
        .insert_all(
            &cx,
            [
                params! { "name" => "Hawthorne" },
                params! { "name" => "Melville" },
            ],
        )
        .await
        .unwrap();
    let melville = authors[1].id().cloned().unwrap();

    let mut book = db
        .relation("book")
        .unwrap()
        .create(params! { "title" => "Moby-Dick" })
        .unwrap();
    book.set("author_id", melville.clone()).unwrap();
    book.insert(&cx).await.unwrap();

    let author = book.association(&cx, "author").await.unwrap().unwrap();
    let Associated::One(author) = author else {
        panic!("expected one author; actual={author:?}");
    };
    assert_eq!(author.id(), Some(&melville));
    assert_eq!(author.get("name"), Some(&Value::from("Melville")));

    // Cached after the first resolution
    test.log().clear();
    assert!(book.association(&cx, "author").await.unwrap().is_some());
    assert!(book.associated("author").is_some());
    assert!(test.log().is_empty());
}

async fn unset_foreign_key_resolves_to_none(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut book = db
        .relation("book")
        .unwrap()
        .create(params! { "title" => "Anonymous" })
        .unwrap();
    book.insert(&cx).await.unwrap();

    assert_none!(book.association(&cx, "author").await.unwrap());
}

async fn dangling_foreign_key_is_not_found(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut book = db
        .relation("book")
        .unwrap()
        .create(params! { "title" => "Lost", "author_id" => 404 })
        .unwrap();

    let err = assert_err!(book.association(&cx, "author").await);
    assert!(err.is_record_not_found());
}

async fn unknown_association(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut book = db
        .relation("book")
        .unwrap()
        .create(params! { "title" => "Typee" })
        .unwrap();

    let err = assert_err!(book.association(&cx, "publisher").await);
    assert!(err.is_association_not_found());
    assert!(err.is_not_found());
}

async fn assign_does_not_persist_relationship(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut author = db
        .relation("author")
        .unwrap()
        .create(params! { "name" => "Melville" })
        .unwrap();
    author.insert(&cx).await.unwrap();

    let books = db.relation("book").unwrap();
    let mut book = books.create(params! { "title" => "Omoo" }).unwrap();
    book.assign_association("author", author).unwrap();
    book.insert(&cx).await.unwrap();

    // Bound in memory only; the foreign key was never assigned
    assert!(book.associated("author").is_some());

    let reloaded = books.find(&cx, book.id().cloned().unwrap()).await.unwrap();
    assert_eq!(reloaded.get("author_id"), Some(&Value::Null));
    assert!(reloaded.associated("author").is_none());
}

async fn foreign_key_override(test: &mut DbTest) {
    let cx = Context::background();
    let reflection = schemas! {
        "author" => |author| {
            author.attribute("name", Kind::String);
            author.has_many("book");
        },
        "book" => |book| {
            book.attribute("title", Kind::String);
            book.belongs_to("author").named("writer").foreign_key("writer_id");
        },
    };
    let db = test.setup_db(reflection).await;

    let book_schema = db.reflection().lookup("book").unwrap();
    assert!(book_schema.attribute("writer_id").is_some());
    assert!(book_schema.attribute("author_id").is_none());

    let mut author = db
        .relation("author")
        .unwrap()
        .create(params! { "name" => "Melville" })
        .unwrap();
    author.insert(&cx).await.unwrap();

    let mut book = db
        .relation("book")
        .unwrap()
        .create(params! { "title" => "Mardi", "writer_id" => author.id().cloned().unwrap() })
        .unwrap();
    book.insert(&cx).await.unwrap();

    let writer = book.association(&cx, "writer").await.unwrap().unwrap();
    assert_eq!(writer.as_one().unwrap().get("name"), Some(&Value::from("Melville")));

    // The inverse side picks up the overridden key
    let books = author.association(&cx, "book").await.unwrap().unwrap();
    assert_eq!(books.len(), 1);
}

tests!(
    default_foreign_key,
    resolves_target_by_foreign_key,
    unset_foreign_key_resolves_to_none,
    dangling_foreign_key_is_not_found,
    unknown_association,
    assign_does_not_persist_relationship,
    foreign_key_override,
);
