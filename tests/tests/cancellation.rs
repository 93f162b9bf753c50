use crumb::{params, Context, Kind, Reflection};
use std::time::Duration;
use tests::{assert_err, schemas, tests, DbTest};

fn schema() -> Reflection {
    schemas! {
        "whale" => |whale| {
            whale.attribute("name", Kind::String);
        },
    }
}

async fn cancelled_before_call(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;
    let whales = db.relation("whale").unwrap();

    let cx = Context::background();
    cx.cancel();
    assert!(cx.is_cancelled());

    let mut whale = whales.create(params! { "name" => "Moby Dick" }).unwrap();
    let err = assert_err!(whale.insert(&cx).await);
    assert!(err.is_cancelled());
    assert!(!whale.is_persisted());

    let err = assert_err!(whales.to_a(&cx).await);
    assert!(err.is_cancelled());

    // Nothing was written
    let fresh = Context::background();
    assert!(whales.to_a(&fresh).await.unwrap().is_empty());
}

async fn cancelled_while_streaming(test: &mut DbTest) {
    let cx = Context::background();
    let db = test.setup_db(schema()).await;
    let whales = db.relation("whale").unwrap();

    whales
        .insert_all(
            &cx,
            ["Moby Dick", "Mocha Dick", "Timor Jack"].map(|name| params! { "name" => name }),
        )
        .await
        .unwrap();

    let mut visited = 0;
    let err = assert_err!(
        whales
            .each(&cx, |_| {
                visited += 1;
                cx.cancel();
                Ok(true)
            })
            .await
    );
    assert!(err.is_cancelled());
    assert_eq!(visited, 1);
}

async fn deadline_elapsed(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;

    let cx = Context::with_timeout(Duration::ZERO);
    let err = assert_err!(db.relation("whale").unwrap().to_a(&cx).await);
    assert!(err.is_timed_out());
    assert!(err.is_cancelled());
}

tests!(cancelled_before_call, cancelled_while_streaming, deadline_elapsed);
