use std::fmt;
use std::ops::Bound;

use thiserror::Error;

use crate::models::{NewPost, NewUser, WeightRange};

pub const NAME_MAX_CHARS: usize = 50;
pub const CREDENTIAL_MAX_CHARS: usize = 150;
pub const CONTENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    TooLong { max: usize, actual: usize },
    InvertedRange { lower: i32, upper: i32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooLong { max, actual } => {
                write!(f, "value has {actual} characters, limit is {max}")
            }
            Violation::InvertedRange { lower, upper } => {
                write!(f, "range lower bound {lower} exceeds upper bound {upper}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{table}.{column}: {violation}")]
pub struct ValidationError {
    pub table: &'static str,
    pub column: &'static str,
    pub violation: Violation,
}

pub type ValidationResult = Result<(), ValidationError>;

// VARCHAR(n) limits characters, not bytes.
fn check_len(
    table: &'static str,
    column: &'static str,
    value: &str,
    max: usize,
) -> ValidationResult {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError {
            table,
            column,
            violation: Violation::TooLong { max, actual },
        });
    }
    Ok(())
}

fn check_optional_len(
    table: &'static str,
    column: &'static str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult {
    match value {
        Some(value) => check_len(table, column, value, max),
        None => Ok(()),
    }
}

fn bound_value(bound: &Bound<i32>) -> Option<i32> {
    match bound {
        Bound::Included(v) | Bound::Excluded(v) => Some(*v),
        Bound::Unbounded => None,
    }
}

fn check_range(
    table: &'static str,
    column: &'static str,
    range: &WeightRange,
) -> ValidationResult {
    if let (Some(lower), Some(upper)) = (bound_value(&range.0), bound_value(&range.1)) {
        if lower > upper {
            return Err(ValidationError {
                table,
                column,
                violation: Violation::InvertedRange { lower, upper },
            });
        }
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> ValidationResult {
    check_len("users", "first_name", &user.first_name, NAME_MAX_CHARS)?;
    check_len("users", "last_name", &user.last_name, NAME_MAX_CHARS)?;
    check_optional_len(
        "users",
        "hashed_password",
        user.hashed_password.as_deref(),
        CREDENTIAL_MAX_CHARS,
    )?;
    check_optional_len(
        "users",
        "access_token",
        user.access_token.as_deref(),
        CREDENTIAL_MAX_CHARS,
    )?;
    check_optional_len(
        "users",
        "refresh_token",
        user.refresh_token.as_deref(),
        CREDENTIAL_MAX_CHARS,
    )?;
    if let Some(weight) = &user.weight {
        check_range("users", "weight", weight)?;
    }
    Ok(())
}

pub fn validate_new_post(post: &NewPost) -> ValidationResult {
    check_len("posts", "content", &post.content, CONTENT_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weight_range;
    use chrono::Utc;

    fn user(first: &str, last: &str) -> NewUser {
        NewUser::required(1, first, last, 1, Utc::now())
    }

    #[test]
    fn accepts_names_at_the_limit() {
        let name = "a".repeat(50);
        assert_eq!(validate_new_user(&user(&name, &name)), Ok(()));
    }

    #[test]
    fn rejects_first_name_over_limit() {
        let err = validate_new_user(&user(&"a".repeat(51), "Doe")).unwrap_err();
        assert_eq!(err.column, "first_name");
        assert_eq!(
            err.violation,
            Violation::TooLong {
                max: 50,
                actual: 51
            }
        );
        assert_eq!(
            err.to_string(),
            "users.first_name: value has 51 characters, limit is 50"
        );
    }

    #[test]
    fn rejects_last_name_over_limit() {
        let err = validate_new_user(&user("Jane", &"b".repeat(51))).unwrap_err();
        assert_eq!(err.column, "last_name");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let name = "é".repeat(50);
        assert!(name.len() > 50);
        assert_eq!(validate_new_user(&user(&name, "Doe")), Ok(()));
    }

    #[test]
    fn checks_optional_credentials_only_when_present() {
        let mut row = user("Jane", "Doe");
        row.access_token = Some("t".repeat(150));
        assert_eq!(validate_new_user(&row), Ok(()));

        row.refresh_token = Some("t".repeat(151));
        let err = validate_new_user(&row).unwrap_err();
        assert_eq!(err.column, "refresh_token");
    }

    #[test]
    fn rejects_inverted_weight() {
        let row = user("Jane", "Doe").with_weight(weight_range(10, 2));
        let err = validate_new_user(&row).unwrap_err();
        assert_eq!(
            err.violation,
            Violation::InvertedRange {
                lower: 10,
                upper: 2
            }
        );

        let open = user("Jane", "Doe").with_weight((Bound::Included(10), Bound::Unbounded));
        assert_eq!(validate_new_user(&open), Ok(()));
    }

    #[test]
    fn post_content_limit() {
        let mut post = NewPost {
            user_id: 1,
            content: "x".repeat(500),
            created_time: Utc::now(),
        };
        assert_eq!(validate_new_post(&post), Ok(()));

        post.content.push('x');
        let err = validate_new_post(&post).unwrap_err();
        assert_eq!(err.table, "posts");
        assert_eq!(err.column, "content");
    }
}
