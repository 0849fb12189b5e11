use backend::config::db::{ConnectionSettings, DatabaseConfig, DbKind};
use backend::config::profile::Profile;
use backend::infra::db::{bootstrap_db, ensure_database_exists};
use backend::infra::state::build_state;
use backend::repos::todos;
use migration::{count_applied_migrations, MigratorTrait};
use sea_orm::{ConnectionTrait, Statement};

use crate::support::resolve_test_db_kind;

fn sqlite_file_settings(dir: &tempfile::TempDir) -> ConnectionSettings {
    let url = format!("sqlite://{}", dir.path().join("todos_test.sqlite3").display());
    ConnectionSettings::from_url(Profile::Test, url).expect("valid sqlite url")
}

#[tokio::test]
async fn fresh_database_applies_every_migration() {
    let settings =
        ConnectionSettings::from_url(Profile::Test, "sqlite::memory:").expect("valid url");
    let db = bootstrap_db(&settings).await.expect("bootstrap");

    let applied = count_applied_migrations(&db).await.expect("count migrations");
    assert_eq!(applied, migration::Migrator::migrations().len());

    let ok = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) FROM todos",
        ))
        .await;
    assert!(ok.is_ok(), "todos table should exist");
    db.close().await.expect("close");
}

#[tokio::test]
async fn rerunning_bootstrap_applies_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = sqlite_file_settings(&dir);

    let first = bootstrap_db(&settings).await.expect("bootstrap-1");
    let before = count_applied_migrations(&first).await.expect("count-1");
    first.close().await.expect("close-1");

    let second = bootstrap_db(&settings).await.expect("bootstrap-2");
    let after = count_applied_migrations(&second).await.expect("count-2");
    second.close().await.expect("close-2");

    assert_eq!(before, after, "migration count changed on second bootstrap");
}

#[tokio::test]
async fn sqlite_file_keeps_rows_between_pools() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = sqlite_file_settings(&dir);

    let state = build_state()
        .with_settings(settings.clone())
        .build()
        .await
        .expect("state-1");
    backend::adapters::todos_sea::create(
        state.db(),
        backend::adapters::todos_sea::TodoCreate::new("Persisted"),
    )
    .await
    .expect("insert");
    state.close().await.expect("close-1");

    let state = build_state()
        .with_settings(settings)
        .build()
        .await
        .expect("state-2");
    assert_eq!(todos::count(state.db()).await.expect("count"), 1);
    state.close().await.expect("close-2");
}

#[tokio::test]
async fn ensure_database_exists_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = sqlite_file_settings(&dir);

    ensure_database_exists(&settings).await.expect("first");
    ensure_database_exists(&settings).await.expect("second");
    assert!(dir.path().join("todos_test.sqlite3").exists());
}

#[tokio::test]
async fn profile_table_drives_connection_settings() {
    let config = DatabaseConfig::from_toml_str(
        r#"
        [test]
        url = "sqlite::memory:"

        [production]
        url = "postgresql://todos:secret@db:5432/todos"
        pool = 12
        "#,
    )
    .expect("valid config");

    let test = ConnectionSettings::resolve(Profile::Test, Some(&config), None).expect("test");
    assert_eq!(test.kind, DbKind::SqliteMemory);
    assert_eq!(test.pool_max, 1);

    let prod =
        ConnectionSettings::resolve(Profile::Production, Some(&config), None).expect("prod");
    assert_eq!(prod.kind, DbKind::Postgres);
    assert_eq!(prod.pool_max, 12);
    assert!(!prod.sql_logging);

    assert!(ConnectionSettings::resolve(Profile::Development, Some(&config), None).is_err());
}

#[tokio::test]
async fn selected_test_database_bootstraps() {
    let db_kind = resolve_test_db_kind().expect("Failed to resolve DB kind");
    let state = crate::support::build_test_state().await.expect("state");

    assert!(matches!(
        (db_kind, state.db().get_database_backend()),
        (DbKind::Postgres, sea_orm::DatabaseBackend::Postgres)
            | (DbKind::SqliteFile | DbKind::SqliteMemory, sea_orm::DatabaseBackend::Sqlite)
    ));
    state.close().await.expect("close");
}
