//! Runs the API smoke test client against a live server on an ephemeral port.

use libris::{
    client::{smoke, ClientError},
    server::{config::SecurityProfile, startup::build_app},
};
use libris_test_utils::prelude::*;
use tokio::net::TcpListener;

async fn serve(test: &TestContext) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_app(test.db.clone(), SecurityProfile::from_debug(true));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Expect every smoke test step to pass against a fresh database
#[tokio::test]
async fn smoke_test_passes() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::ApiBook)
        .build()
        .await?;
    test.user().insert_superuser("admin").await?;
    let url = serve(&test).await;

    let report = smoke::run(&url, "admin", TEST_PASSWORD).await.unwrap();

    assert_eq!(report.listed, 0);
    let created = report.created.unwrap();
    assert_eq!(created.title, "Test-Driven Development with Python");
    assert_eq!(report.updated.unwrap().title, "Test-Driven Development with Python (Updated)");

    Ok(())
}

/// Expect the token step to fail with the server's status for bad credentials
#[tokio::test]
async fn smoke_test_reports_bad_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_table(entity::prelude::ApiBook)
        .build()
        .await?;
    test.user().insert_superuser("admin").await?;
    let url = serve(&test).await;

    let err = smoke::run(&url, "admin", "wrong-password").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { actual, .. } if actual == 400
    ));

    Ok(())
}
