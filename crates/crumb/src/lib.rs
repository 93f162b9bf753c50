pub mod db;
pub use db::Db;

pub mod entity;
pub use entity::{Associated, Entity};

pub mod relation;
pub use relation::Relation;

pub use crumb_core::{
    driver::{operation::Direction, ConnectionConfig, Connections},
    schema::{Kind, Reflection, Schema, SchemaBuilder},
    stmt::Value,
    Context, Error, Result,
};

/// Attribute assignments for [`Relation::build`], [`Relation::create`] and
/// [`Relation::insert_all`].
///
/// ```
/// let params = crumb::params! { "title" => "Typee", "pages" => 304 };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ( $( $name:expr => $value:expr ),* $(,)? ) => {
        {
            let params: ::std::vec::Vec<(::std::string::String, $crate::Value)> =
                vec![ $( (::std::string::String::from($name), $crate::Value::from($value)) ),* ];
            params
        }
    };
}
