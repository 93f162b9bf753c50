//! Typed values and their stored representation.

mod stored;
pub use stored::Stored;

mod value;
pub use value::Value;

mod value_chrono;
