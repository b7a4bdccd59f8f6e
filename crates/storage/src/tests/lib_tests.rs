use super::*;

#[tokio::test]
async fn fresh_store_has_no_consent_answer() {
    let storage = Storage::new("sqlite::memory:").await.expect("open");
    storage.health_check().await.expect("healthy");
    assert_eq!(storage.consent_granted().await.expect("read"), None);
}

#[tokio::test]
async fn recorded_consent_reads_back_true() {
    let storage = Storage::new("sqlite::memory:").await.expect("open");
    storage.record_consent().await.expect("persist");
    assert_eq!(storage.consent_granted().await.expect("read"), Some(true));
}

#[tokio::test]
async fn settings_upsert_overwrites() {
    let storage = Storage::new("sqlite::memory:").await.expect("open");
    storage.set_setting("theme", "amber").await.expect("write");
    storage.set_setting("theme", "obsidian").await.expect("write");
    assert_eq!(
        storage.get_setting("theme").await.expect("read").as_deref(),
        Some("obsidian")
    );
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite:relative/flag.db"),
        "sqlite://relative/flag.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn memory_url_has_no_filesystem_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/flag.db"),
        Some(std::path::PathBuf::from("./data/flag.db"))
    );
}
