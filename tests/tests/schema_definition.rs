use crumb::{Kind, Reflection, Schema};
use tests::{assert_err, assert_ok};

#[test]
fn primary_key_is_synthesized() {
    let mut builder = Schema::builder("author");
    builder.attribute("name", Kind::String);

    let schema = assert_ok!(builder.build());
    assert_eq!(schema.primary_key_name(), "id");
    assert_eq!(schema.primary_key().kind(), Kind::Integer);
    assert!(schema.primary_key().is_primary_key());
    assert_eq!(schema.table_name(), "authors");
}

#[test]
fn explicit_primary_key_is_kept() {
    let mut builder = Schema::builder("book");
    builder.attribute("isbn", Kind::String).primary_key();
    builder.attribute("title", Kind::String);

    let schema = assert_ok!(builder.build());
    assert_eq!(schema.primary_key_name(), "isbn");
    assert!(schema.attribute("id").is_none());
}

#[test]
fn two_primary_keys_fail() {
    let mut builder = Schema::builder("book");
    builder.attribute("isbn", Kind::String).primary_key();
    builder.attribute("ean", Kind::String).primary_key();

    let err = assert_err!(builder.build());
    assert!(err.is_invalid_schema());
}

#[test]
fn unknown_declared_primary_key_fails() {
    let mut builder = Schema::builder("book");
    builder.primary_key("isbn");
    builder.attribute("title", Kind::String);

    assert!(assert_err!(builder.build()).is_invalid_schema());
}

#[test]
fn id_attribute_collides_with_synthesized_key() {
    let mut builder = Schema::builder("book");
    builder.attribute("id", Kind::String);

    assert!(assert_err!(builder.build()).is_invalid_schema());
}

#[test]
fn validator_must_fit_kind() {
    let mut builder = Schema::builder("book");
    builder.attribute("pages", Kind::Integer).max_length(3);

    assert!(assert_err!(builder.build()).is_invalid_schema());
}

#[test]
fn registry_rejects_duplicate_names() {
    let reflection = Reflection::new();
    assert_ok!(reflection.define("author", |_| {}));

    let err = assert_err!(reflection.define("author", |author| {
        author.attribute("name", Kind::String);
    }));
    assert!(err.is_invalid_schema());

    // The first definition is still the published one
    let author = assert_ok!(reflection.lookup("author"));
    assert!(author.attribute("name").is_none());
}

#[test]
fn lookup_missing_schema_is_not_found() {
    let reflection = Reflection::new();
    let err = assert_err!(reflection.lookup("whale"));
    assert!(err.is_model_not_found());
    assert!(err.is_not_found());
}

#[test]
fn association_targets_may_be_defined_later() {
    let reflection = Reflection::new();
    assert_ok!(reflection.define("book", |book| {
        book.belongs_to("author");
    }));
    assert_ok!(reflection.define("author", |author| {
        author.has_many("book");
    }));

    assert_eq!(assert_ok!(reflection.names()), ["author", "book"]);

    assert_ok!(reflection.reset());
    assert!(assert_ok!(reflection.names()).is_empty());
}
