//! Inflection helpers used to derive table and foreign key names.

use heck::ToSnakeCase;

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// Plural form of the last word in a snake_case identifier.
pub fn pluralize(src: &str) -> String {
    inflect_last_word(src, |word| pluralizer::pluralize(word, 2, false))
}

/// Singular form of the last word in a snake_case identifier.
pub fn singularize(src: &str) -> String {
    inflect_last_word(src, |word| pluralizer::pluralize(word, 1, false))
}

fn inflect_last_word(src: &str, f: impl FnOnce(&str) -> String) -> String {
    match src.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", f(last)),
        None => f(src),
    }
}
