use linky_replacer::domain::entities::NewLinkRecord;
use linky_replacer::domain::repositories::LinkRecordRepository;
use linky_replacer::error::AppError;
use linky_replacer::infrastructure::persistence::PgLinkRecordRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_record(uri: &str, title: &str) -> NewLinkRecord {
    NewLinkRecord {
        uri: uri.to_string(),
        title: title.to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_load(pool: PgPool) {
    let repo = PgLinkRecordRepository::new(Arc::new(pool));

    let created = repo
        .create(new_record("http://google.com/", "Hello world"))
        .await
        .unwrap();
    let loaded = repo.load(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.uri, "http://google.com/");
    assert_eq!(loaded.title, "Hello world");
    assert_eq!(loaded.id, created.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_load_missing(pool: PgPool) {
    let repo = PgLinkRecordRepository::new(Arc::new(pool));

    assert!(repo.load(12345).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_uri_is_exact(pool: PgPool) {
    let repo = PgLinkRecordRepository::new(Arc::new(pool));
    repo.create(new_record("http://example.com/", "Example"))
        .await
        .unwrap();

    assert!(repo.find_by_uri("http://example.com/").await.unwrap().is_some());
    assert!(repo.find_by_uri("http://example.com").await.unwrap().is_none());
    assert!(repo.find_by_uri("HTTP://example.com/").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_uri_is_conflict(pool: PgPool) {
    let repo = PgLinkRecordRepository::new(Arc::new(pool));
    repo.create(new_record("http://example.com/", "First"))
        .await
        .unwrap();

    let result = repo.create(new_record("http://example.com/", "Second")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgLinkRecordRepository::new(Arc::new(pool));
    for i in 1..=3 {
        repo.create(new_record(&format!("http://example.com/{i}"), "Link"))
            .await
            .unwrap();
    }

    let first_page = repo.list(0, 2).await.unwrap();
    let second_page = repo.list(2, 2).await.unwrap();

    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].uri, "http://example.com/3");
    assert_eq!(first_page[1].uri, "http://example.com/2");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].uri, "http://example.com/1");
    assert_eq!(repo.count().await.unwrap(), 3);
}
