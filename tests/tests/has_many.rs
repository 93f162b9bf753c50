use crumb::{params, Context, Db, Entity, Kind, Reflection, Value};
use tests::{assert_eq_unordered, prelude::*, schemas, tests, DbTest};

fn schema() -> Reflection {
    schemas! {
        "author" => |author| {
            author.attribute("name", Kind::String);
            author.has_many("book");
            author.has_one("book").named("first_book");
        },
        "book" => |book| {
            book.attribute("title", Kind::String);
            book.belongs_to("author");
        },
    }
}

async fn create_author(db: &Db, cx: &Context, name: &str) -> Entity {
    let mut author = db
        .relation("author")
        .unwrap()
        .create(params! { "name" => name })
        .unwrap();
    author.insert(cx).await.unwrap();
    author
}

fn title(entity: &Entity) -> &str {
    entity.get("title").and_then(Value::as_str).unwrap()
}

fn titles(entities: &[Entity]) -> Vec<String> {
    let mut titles: Vec<_> = entities
        .iter()
        .map(|entity| entity.get("title").and_then(Value::as_str).unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

async fn melville_has_three_books(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut author = create_author(&db, &cx, "Melville").await;
    assert_eq!(author.id(), Some(&Value::from(1)));

    db.relation("book")
        .unwrap()
        .insert_all(
            &cx,
            ["Typee", "Omoo", "Moby-Dick"]
                .map(|title| params! { "title" => title, "author_id" => 1 }),
        )
        .await
        .unwrap();

    let books = author.association(&cx, "book").await.unwrap().unwrap();
    assert_eq!(books.len(), 3);
    for book in books.as_many() {
        assert_eq!(book.get("author_id"), Some(&Value::from(1)));
    }
}

async fn resolves_regardless_of_insertion_order(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut melville = create_author(&db, &cx, "Melville").await;
    let mut hawthorne = create_author(&db, &cx, "Hawthorne").await;

    let mut books = vec![
        ("Typee", melville.id().cloned().unwrap()),
        ("Pierre", melville.id().cloned().unwrap()),
        ("Omoo", melville.id().cloned().unwrap()),
        ("Fanshawe", hawthorne.id().cloned().unwrap()),
        ("The Scarlet Letter", hawthorne.id().cloned().unwrap()),
    ];
    books.shuffle();

    db.relation("book")
        .unwrap()
        .insert_all(
            &cx,
            books
                .into_iter()
                .map(|(title, author_id)| params! { "title" => title, "author_id" => author_id }),
        )
        .await
        .unwrap();

    let melville_books = melville.association(&cx, "book").await.unwrap().unwrap();
    assert_eq_unordered!(
        melville_books.as_many().iter().map(title),
        ["Omoo", "Pierre", "Typee"]
    );

    let hawthorne_books = hawthorne.association(&cx, "book").await.unwrap().unwrap();
    assert_eq_unordered!(
        hawthorne_books.as_many().iter().map(title),
        ["Fanshawe", "The Scarlet Letter"]
    );
}

async fn no_matches_is_an_empty_list(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut author = create_author(&db, &cx, "Bartleby").await;

    let books = author.association(&cx, "book").await.unwrap().unwrap();
    assert_empty!(books.as_many());

    assert_none!(author.association(&cx, "first_book").await.unwrap());
}

async fn has_one_takes_first_match(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut author = create_author(&db, &cx, "Melville").await;
    db.relation("book")
        .unwrap()
        .insert_all(
            &cx,
            [
                params! { "title" => "Typee", "author_id" => 1 },
                params! { "title" => "Omoo", "author_id" => 1 },
            ],
        )
        .await
        .unwrap();

    let first = author.association(&cx, "first_book").await.unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(
        first.as_one().unwrap().get("title"),
        Some(&Value::from("Typee"))
    );
}

async fn unpersisted_owner_resolves_to_none(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;

    let mut author = db
        .relation("author")
        .unwrap()
        .create(params! { "name" => "Unpublished" })
        .unwrap();

    assert_none!(author.association(&cx, "book").await.unwrap());
    assert!(test.log().is_empty());
}

tests!(
    melville_has_three_books,
    resolves_regardless_of_insertion_order,
    no_matches_is_an_empty_list,
    has_one_takes_first_match,
    unpersisted_owner_resolves_to_none,
);
