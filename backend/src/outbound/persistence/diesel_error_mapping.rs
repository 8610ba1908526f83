//! Shared Diesel error mapping for the repositories.
//!
//! Connection-level failures become the port's `Connection` variant (and
//! ultimately a 503); everything else is a `Query` failure. Database messages
//! are logged at debug level and passed through for server-side logging only;
//! the HTTP layer redacts them.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

/// Name of the violated unique constraint, when `error` is a unique
/// violation.
pub(crate) fn unique_violation(error: &DieselError) -> Option<String> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Some(
            info.constraint_name()
                .unwrap_or("unique constraint")
                .to_owned(),
        ),
        _ => None,
    }
}
