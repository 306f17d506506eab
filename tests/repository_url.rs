mod common;

use std::sync::Arc;
use urlchemy::domain::entities::NewUrlRecord;
use urlchemy::domain::repositories::UrlRepository;
use urlchemy::error::AppError;
use urlchemy::infrastructure::persistence::SqliteUrlRepository;

fn new_record(key: &str, secret_key: &str, target_url: &str) -> NewUrlRecord {
    NewUrlRecord {
        key: key.to_string(),
        secret_key: secret_key.to_string(),
        target_url: target_url.to_string(),
        title: Some("Example".to_string()),
        description: None,
    }
}

#[tokio::test]
async fn test_insert_url() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let record = repo
        .insert(new_record("ABCDE", "SECRT", "https://example.com"))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.key, "ABCDE");
    assert_eq!(record.secret_key, "SECRT");
    assert_eq!(record.target_url, "https://example.com");
    assert_eq!(record.title.as_deref(), Some("Example"));
    assert!(record.description.is_none());
    assert!(record.is_active);
    assert_eq!(record.clicks, 0);
}

#[tokio::test]
async fn test_insert_duplicate_key_conflict() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    repo.insert(new_record("ABCDE", "SECR1", "https://a.com"))
        .await
        .unwrap();

    let result = repo
        .insert(new_record("ABCDE", "SECR2", "https://b.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_insert_duplicate_secret_conflict() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    repo.insert(new_record("KEY01", "SECRT", "https://a.com"))
        .await
        .unwrap();

    let result = repo
        .insert(new_record("KEY02", "SECRT", "https://b.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_same_target_stored_twice() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let first = repo
        .insert(new_record("KEY01", "SEC01", "https://example.com"))
        .await
        .unwrap();
    let second = repo
        .insert(new_record("KEY02", "SEC02", "https://example.com"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_find_by_key_and_secret() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let by_key = repo.find_by_key("ABCDE").await.unwrap();
    assert_eq!(by_key.unwrap().secret_key, "SECRT");

    let by_secret = repo.find_by_secret("SECRT").await.unwrap();
    assert_eq!(by_secret.unwrap().key, "ABCDE");

    assert!(repo.find_by_key("SECRT").await.unwrap().is_none());
    assert!(repo.find_by_secret("ABCDE").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_ignores_inactive() {
    let db = common::test_db().await;
    common::create_inactive_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    assert!(repo.find_by_key("ABCDE").await.unwrap().is_none());
    assert!(repo.find_by_secret("SECRT").await.unwrap().is_none());
}

#[tokio::test]
async fn test_key_exists_checks_both_columns() {
    let db = common::test_db().await;
    common::create_inactive_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    assert!(repo.key_exists("ABCDE").await.unwrap());
    assert!(repo.key_exists("SECRT").await.unwrap());
    assert!(!repo.key_exists("FREE1").await.unwrap());
}

#[tokio::test]
async fn test_increment_clicks() {
    let db = common::test_db().await;
    let id = common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let record = repo.increment_clicks(id).await.unwrap();
    assert_eq!(record.clicks, 1);

    let record = repo.increment_clicks(id).await.unwrap();
    assert_eq!(record.clicks, 2);
}

#[tokio::test]
async fn test_increment_clicks_unknown_id() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let result = repo.increment_clicks(999).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_increment_clicks_after_deactivate() {
    let db = common::test_db().await;
    let id = common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let found = repo.find_by_key("ABCDE").await.unwrap();
    assert!(found.is_some());

    assert!(repo.deactivate("SECRT").await.unwrap().is_some());

    let result = repo.increment_clicks(id).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert_eq!(common::clicks_of(&db.pool, "ABCDE").await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_not_lost() {
    let db = common::test_db().await;
    let id = common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = Arc::new(SqliteUrlRepository::new(Arc::new(db.pool.clone())));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks(id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::clicks_of(&db.pool, "ABCDE").await, 50);
}

#[tokio::test]
async fn test_deactivate_once() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let first = repo.deactivate("SECRT").await.unwrap();
    assert!(!first.unwrap().is_active);

    let second = repo.deactivate("SECRT").await.unwrap();
    assert!(second.is_none());

    assert!(!common::is_active(&db.pool, "ABCDE").await);
}

#[tokio::test]
async fn test_deactivate_unknown_secret() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    assert!(repo.deactivate("NOPE1").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deactivate_single_winner() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "ABCDE", "SECRT", "https://example.com").await;
    let repo = Arc::new(SqliteUrlRepository::new(Arc::new(db.pool.clone())));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.deactivate("SECRT").await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_distinct_active_targets_first_per_host() {
    let db = common::test_db().await;
    common::create_test_url(&db.pool, "KEY01", "SEC01", "https://example.com/a").await;
    common::create_test_url(&db.pool, "KEY02", "SEC02", "https://EXAMPLE.com/b").await;
    common::create_test_url(&db.pool, "KEY03", "SEC03", "https://rust-lang.org").await;
    common::create_inactive_url(&db.pool, "KEY04", "SEC04", "https://docs.rs").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let records = repo.distinct_active_targets().await.unwrap();

    let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["KEY01", "KEY03"]);
}

#[tokio::test]
async fn test_distinct_active_targets_missing_table() {
    let db = common::test_db().await;
    sqlx::query("DROP TABLE urls")
        .execute(&db.pool)
        .await
        .unwrap();
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let result = repo.distinct_active_targets().await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_summary() {
    let db = common::test_db().await;
    let id = common::create_test_url(&db.pool, "KEY01", "SEC01", "https://a.com").await;
    common::create_test_url(&db.pool, "KEY02", "SEC02", "https://b.com").await;
    common::create_inactive_url(&db.pool, "KEY03", "SEC03", "https://c.com").await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    repo.increment_clicks(id).await.unwrap();
    repo.increment_clicks(id).await.unwrap();

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.active, 2);
    assert_eq!(summary.clicks, 2);
}

#[tokio::test]
async fn test_summary_empty() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.clicks, 0);
}

#[tokio::test]
async fn test_health_check() {
    let db = common::test_db().await;
    let repo = SqliteUrlRepository::new(Arc::new(db.pool.clone()));

    assert!(repo.health_check().await.is_ok());
}
