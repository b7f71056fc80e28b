mod common;

use sqlx::PgPool;
use std::sync::Arc;
use users_service::AppError;
use users_service::domain::entities::NewUser;
use users_service::domain::repositories::UserRepository;
use users_service::infrastructure::persistence::PgUserRepository;

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[sqlx::test]
async fn test_create_assigns_id(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let first = repo.create(new_user("Ann", "ann@x.com")).await.unwrap();
    let second = repo.create(new_user("Bob", "bob@x.com")).await.unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert_eq!(first.name, "Ann");
    assert_eq!(first.email, "ann@x.com");
}

#[sqlx::test]
async fn test_create_duplicate_email(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    repo.create(new_user("Ann", "ann@x.com")).await.unwrap();

    let result = repo.create(new_user("Ann Again", "ann@x.com")).await;

    assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    assert_eq!(common::count_users(&pool).await, 1);
}

#[sqlx::test]
async fn test_find_by_id(pool: PgPool) {
    let id = common::insert_user(&pool, "Ann", "ann@x.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let found = repo.find_by_id(id).await.unwrap();
    assert_eq!(found.unwrap().email, "ann@x.com");

    let missing = repo.find_by_id(id + 1).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_list_and_count(pool: PgPool) {
    common::insert_user(&pool, "Ann", "ann@x.com").await;
    common::insert_user(&pool, "Bob", "bob@x.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let users = repo.list().await.unwrap();
    let mut emails: Vec<String> = users.into_iter().map(|u| u.email).collect();
    emails.sort();

    assert_eq!(emails, vec!["ann@x.com", "bob@x.com"]);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
async fn test_connections_released_after_errors(pool: PgPool) {
    common::insert_user(&pool, "Ann", "ann@x.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    for _ in 0..20 {
        let _ = repo.create(new_user("Ann", "ann@x.com")).await;
        let _ = repo.find_by_id(9_999).await;
    }

    // The pool would be exhausted if failed calls leaked connections.
    assert!(repo.ping().await.is_ok());
}
