use crate::users::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, full_name, enabled, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn exists_by_username(db: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(db)
        .await
    }

    pub async fn exists_by_email(db: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
            .bind(email)
            .fetch_one(db)
            .await
    }

    /// Insert a new user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
        full_name: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, full_name, enabled)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, username, password_hash, email, full_name, enabled, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(full_name)
        .fetch_one(db)
        .await
    }
}
