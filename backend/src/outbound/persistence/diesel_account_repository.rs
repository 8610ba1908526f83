//! PostgreSQL-backed account repository.
//!
//! Signup writes the `users` row and its `user_profile` row in one
//! transaction. Duplicate usernames and emails are caught by the unique
//! constraints rather than a prior lookup, so two concurrent signups for the
//! same name cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{NewAccount, PasswordDigest, StoredCredentials, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{CredentialsRow, NewUserProfileRow, NewUserRow};
use super::pool::DbPool;
use super::schema::{user_profile, users};

/// Diesel-backed implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_account_error(error: DieselError) -> AccountPersistenceError {
    if let Some(constraint) = unique_violation(&error) {
        debug!(%constraint, "signup rejected by unique constraint");
        return AccountPersistenceError::duplicate_user(constraint);
    }
    map_diesel_error(
        error,
        AccountPersistenceError::query,
        AccountPersistenceError::connection,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<UserId, AccountPersistenceError> {
        let user_row = NewUserRow {
            username: account.username.as_ref(),
            email: account.email.as_ref(),
            password: account.password_digest.as_str(),
        };
        let profile = &account.profile;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountPersistenceError::connection))?;

        let user_id = conn
            .transaction(|conn| {
                async move {
                    let user_id: i32 = diesel::insert_into(users::table)
                        .values(&user_row)
                        .returning(users::user_id)
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(user_profile::table)
                        .values(&NewUserProfileRow {
                            user_id,
                            firstname: profile.firstname(),
                            lastname: profile.lastname(),
                            age: profile.age(),
                            gender: profile.gender(),
                            mobile_number: profile.mobile_number(),
                        })
                        .execute(conn)
                        .await?;

                    Ok(user_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_account_error)?;

        Ok(UserId::new(user_id))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountPersistenceError::connection))?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_account_error)?;

        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::new(row.user_id),
            username: Username::from_stored(row.username),
            password_digest: PasswordDigest::new(row.password),
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for account error mapping.
    use super::*;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate_user() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert!(matches!(
            map_account_error(error),
            AccountPersistenceError::DuplicateUser { .. }
        ));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection lost".to_owned()),
        );
        assert_eq!(
            map_account_error(error),
            AccountPersistenceError::connection("connection lost")
        );
    }

    #[rstest]
    fn rollback_errors_map_to_query() {
        assert!(matches!(
            map_account_error(DieselError::RollbackTransaction),
            AccountPersistenceError::Query { .. }
        ));
    }
}
