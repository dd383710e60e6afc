//! Classification of database errors.

/// Unique constraint on `links.alias`.
pub const LINKS_ALIAS_KEY: &str = "links_alias_key";

/// Unique constraint on `tokens.token`.
pub const TOKENS_TOKEN_KEY: &str = "tokens_token_key";

/// Returns `true` if `e` is a unique violation of the given constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_a_violation() {
        assert!(!is_unique_violation_on(&sqlx::Error::RowNotFound, LINKS_ALIAS_KEY));
        assert!(!is_unique_violation_on(&sqlx::Error::PoolTimedOut, TOKENS_TOKEN_KEY));
    }
}
