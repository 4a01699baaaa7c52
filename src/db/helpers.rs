//! Small helpers shared by the query modules and handlers.
//!
//! ```ignore
//! let club = require_found(get_club(pool, id).await?, "Club", id)?;
//! ```

use uuid::Uuid;

use crate::league::error::LeagueError;

/// Unwrap an optional record, returning `NotFound` if it is missing.
pub fn require_found<T>(record: Option<T>, entity: &'static str, id: Uuid) -> Result<T, LeagueError> {
    record.ok_or_else(|| LeagueError::not_found(entity, id))
}

/// Build a case-insensitive `ILIKE` pattern matching `query` anywhere.
/// `%`, `_` and `\` in the query are matched literally.
pub fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Normalize an optional search string: blank means no filter.
pub fn search_term(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(like_pattern)
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("  Real "), "%Real%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(search_term(None), None);
        assert_eq!(search_term(Some("   ")), None);
        assert_eq!(search_term(Some("ars")), Some("%ars%".to_string()));
    }

    #[test]
    fn test_require_found() {
        let id = Uuid::new_v4();
        assert_eq!(require_found(Some(3), "Club", id).unwrap(), 3);
        assert!(matches!(
            require_found::<i32>(None, "Club", id),
            Err(LeagueError::NotFound { entity: "Club", .. })
        ));
    }
}
