//! Assertions that hand back the value they unwrap, so a test can keep
//! inspecting it.

/// Asserts `$e` is `Err` and evaluates to the error.
///
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(err) => err,
            Ok(value) => {
                let context = String::new() $( + &format!(" ({})", format_args!($($t)*)) )?;
                panic!("assert_err! got Ok({:?}){}", value, context)
            }
        }
    };
}

/// Asserts `$e` is `Ok` and evaluates to the value.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("assert_ok! got Err({err:?})"),
        }
    };
}

/// Asserts the option behind `$e` is `None`.
#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        if let Some(value) = &$e {
            panic!("assert_none! got Some({value:?})");
        }
    };
}

/// Asserts the slice behind `$e` has no elements.
#[macro_export]
macro_rules! assert_empty {
    ($slice:expr) => {{
        let slice = &$slice[..];
        if !slice.is_empty() {
            panic!("assert_empty! got {} elements: {:?}", slice.len(), slice);
        }
    }};
}
