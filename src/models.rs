use std::ops::Bound;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::codes::{ActionType, UserSource};
use crate::schema::*;

/// Rust side of an `INT4RANGE` column.
pub type WeightRange = (Bound<i32>, Bound<i32>);

/// Builds `[lower, upper)`, the canonical form PostgreSQL stores integer
/// ranges in. Non-empty ranges read back identical; `lower == upper` is the
/// empty range and reads back as an equivalent empty value, not these bounds.
pub fn weight_range(lower: i32, upper: i32) -> WeightRange {
    (Bound::Included(lower), Bound::Excluded(upper))
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
#[diesel(table_name = users)]
pub struct User {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub source: Option<i16>,
    pub status: i32,
    pub weight: Option<WeightRange>,
    pub created_time: DateTime<Utc>,
}

impl User {
    /// `None` when the column is null or holds a code outside 1..=3.
    pub fn user_source(&self) -> Option<UserSource> {
        self.source.and_then(|code| UserSource::try_from(code).ok())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub source: Option<i16>,
    pub status: i32,
    pub weight: Option<WeightRange>,
    pub created_time: DateTime<Utc>,
}

impl NewUser {
    /// A row carrying only the non-null columns.
    pub fn required(
        user_id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        status: i32,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            hashed_password: None,
            access_token: None,
            refresh_token: None,
            source: None,
            status,
            weight: None,
            created_time,
        }
    }

    pub fn with_source(mut self, source: UserSource) -> Self {
        self.source = Some(source.code());
        self
    }

    pub fn with_weight(mut self, weight: WeightRange) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
#[diesel(table_name = activities)]
pub struct Activity {
    pub user_id: i32,
    pub action_type: Option<i16>,
    pub created_time: DateTime<Utc>,
}

impl Activity {
    pub fn action(&self) -> Option<ActionType> {
        self.action_type
            .and_then(|code| ActionType::try_from(code).ok())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activities)]
pub struct NewActivity {
    pub user_id: i32,
    pub action_type: Option<i16>,
    pub created_time: DateTime<Utc>,
}

impl NewActivity {
    pub fn new(user_id: i32, action: Option<ActionType>, created_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            action_type: action.map(ActionType::code),
            created_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
#[diesel(table_name = posts)]
pub struct Post {
    pub user_id: i32,
    pub content: String,
    pub created_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub user_id: i32,
    pub content: String,
    pub created_time: DateTime<Utc>,
}
