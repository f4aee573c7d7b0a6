use domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when reading or writing aggregates.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No stored row matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The store rejected a write, e.g. a duplicate key or a reference to a
    /// missing customer or product.
    #[error("Write rejected{}: {message}", by_constraint(.constraint))]
    Persistence {
        constraint: Option<String>,
        message: String,
    },

    /// Stored rows rebuilt into an entity that breaks its invariants.
    #[error("Invalid stored entity: {0}")]
    Validation(#[from] ValidationError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn rejected(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            constraint: Some(constraint.into()),
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint failures are rejections of the write, not transport errors.
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    return Self::Persistence {
                        constraint: db_err.constraint().map(str::to_owned),
                        message: db_err.message().to_owned(),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

fn by_constraint(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" by {c}"))
        .unwrap_or_default()
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = RepositoryError::not_found("Order", "123");
        assert_eq!(err.to_string(), "Order not found: 123");
    }

    #[test]
    fn persistence_display_names_constraint() {
        let err = RepositoryError::rejected("order_items_pkey", "duplicate key");
        assert_eq!(
            err.to_string(),
            "Write rejected by order_items_pkey: duplicate key"
        );

        let err = RepositoryError::Persistence {
            constraint: None,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "Write rejected: duplicate key");
    }

    #[test]
    fn validation_errors_convert() {
        let err: RepositoryError = ValidationError::NoItems.into();
        assert!(matches!(
            err,
            RepositoryError::Validation(ValidationError::NoItems)
        ));
    }

    #[test]
    fn non_database_sqlx_errors_stay_database_errors() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
