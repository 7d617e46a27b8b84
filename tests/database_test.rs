//! Migration management tests against a file-backed SQLite database.

use herdbook::config::Config;
use herdbook::infra::{Database, Persistence, UnitOfWork};

#[tokio::test]
async fn test_migration_lifecycle() {
    let path = std::env::temp_dir().join(format!(
        "herdbook-migrations-{}.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let config = Config::with_database_url(format!("sqlite://{}?mode=rwc", path.display()));

    let db = Database::connect(&config).await.unwrap();
    db.run_migrations().await.unwrap();

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 3);
    assert!(status.iter().all(|(_, applied)| *applied));

    // The migrated schema accepts queries through the regular stack
    let uow = Persistence::new(db.get_connection());
    assert_eq!(uow.users().count_total().await.unwrap(), 0);
    assert_eq!(uow.animals().count_total().await.unwrap(), 0);

    // Rolling back leaves exactly the last migration pending
    db.rollback_migration().await.unwrap();
    let status = db.migration_status().await.unwrap();
    let (_, last_applied) = status.last().unwrap();
    assert!(!last_applied);
    assert_eq!(status.iter().filter(|(_, applied)| *applied).count(), 2);

    db.fresh_migrations().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert!(status.iter().all(|(_, applied)| *applied));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_connect_reports_a_bad_url_as_an_error() {
    let config = Config::with_database_url("not-a-connection-url");
    let result = Database::connect(&config).await;
    assert!(result.is_err());
}
