//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    preferences::Preferences, provider_link::ProviderLink, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    id,
    name,
    email,
    password_hash,
    avatar,
    preferences,
    google_id,
    google_access_token,
    google_refresh_token,
    created_at,
    updated_at
"#;

/// Named in the initial migration
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Duplicate email; other unique violations stay database errors
fn map_unique_email(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
        {
            AuthError::EmailTaken
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (google_id, google_access_token, google_refresh_token) = provider_columns(user);

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                name,
                email,
                password_hash,
                avatar,
                preferences,
                google_id,
                google_access_token,
                google_refresh_token,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(&user.avatar)
        .bind(user.preferences.as_ref().map(Json))
        .bind(google_id)
        .bind(google_access_token)
        .bind(google_refresh_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let (google_id, google_access_token, google_refresh_token) = provider_columns(user);

        let updated = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                avatar = $5,
                preferences = $6,
                google_id = $7,
                google_access_token = $8,
                google_refresh_token = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(&user.avatar)
        .bind(user.preferences.as_ref().map(Json))
        .bind(google_id)
        .bind(google_access_token)
        .bind(google_refresh_token)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_email)?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

fn provider_columns(user: &User) -> (Option<&str>, Option<&str>, Option<&str>) {
    match &user.google {
        Some(link) => (
            Some(link.subject.as_str()),
            Some(link.access_token.as_str()),
            link.refresh_token.as_deref(),
        ),
        None => (None, None, None),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: Option<String>,
    avatar: Option<String>,
    preferences: Option<Json<Preferences>>,
    google_id: Option<String>,
    google_access_token: Option<String>,
    google_refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()?;

        let google = match (self.google_id, self.google_access_token) {
            (Some(subject), Some(access_token)) => Some(ProviderLink {
                subject,
                access_token,
                refresh_token: self.google_refresh_token,
            }),
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            name: self.name,
            email: self.email,
            password,
            avatar: self.avatar,
            preferences: self.preferences.map(|Json(p)| p),
            google,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct UniqueViolation(&'static str);

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"{}\"", self.0)
        }
    }

    impl StdError for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    fn violation(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(UniqueViolation(constraint)))
    }

    #[test]
    fn test_duplicate_email_is_email_taken() {
        assert!(matches!(
            map_unique_email(violation("users_email_key")),
            AuthError::EmailTaken
        ));
    }

    #[test]
    fn test_other_unique_violations_stay_database_errors() {
        assert!(matches!(
            map_unique_email(violation("idx_users_google_id")),
            AuthError::Database(_)
        ));
        assert!(matches!(
            map_unique_email(sqlx::Error::RowNotFound),
            AuthError::Database(_)
        ));
    }
}
