use bitlie::domain::repositories::TokenRepository;
use bitlie::error::AppError;
use bitlie::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create("secret", Some("CI".to_string()))
        .await
        .unwrap();

    assert_eq!(token.token, "secret");
    assert_eq!(token.note.as_deref(), Some("CI"));
    assert!(!token.id.is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_exists(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create("secret", None).await.unwrap();

    assert!(repo.exists("secret").await.unwrap());
    assert!(!repo.exists("Secret").await.unwrap());
    assert!(!repo.exists("").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_token_conflicts(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create("secret", None).await.unwrap();

    let result = repo.create("secret", None).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_and_delete(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let first = repo.create("one", None).await.unwrap();
    repo.create("two", None).await.unwrap();

    assert_eq!(repo.list().await.unwrap().len(), 2);

    assert!(repo.delete(&first.id).await.unwrap());
    assert!(!repo.delete(&first.id).await.unwrap());

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, "two");
}
