/// Asserts two collections hold the same distinct items, in any order.
#[macro_export]
macro_rules! assert_eq_unordered {
    ($actual:expr, $expect:expr) => {{
        let mut remaining = std::collections::HashSet::new();

        for item in $actual {
            assert!(remaining.insert(item), "`{:?}` returned twice", item);
        }

        for item in $expect {
            assert!(remaining.remove(item), "`{:?}` missing", item);
        }

        assert!(remaining.is_empty(), "unexpected items: {:?}", remaining);
    }};
}

/// Defines schemas on a fresh registry.
///
/// ```ignore
/// let reflection = schemas! {
///     "author" => |author| { author.attribute("name", Kind::String); },
/// };
/// ```
#[macro_export]
macro_rules! schemas {
    (
        $( $name:literal => $configure:expr ),* $(,)?
    ) => {{
        let reflection = crumb::Reflection::new();
        $( reflection.define($name, $configure).unwrap(); )*
        reflection
    }};
}

#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        #[cfg(feature = "memory")]
        mod memory {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbTest::new(
                        Box::new($crate::db::memory::SetupMemory)
                    );

                    $crate::block_on(super::$f(&mut test));
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
