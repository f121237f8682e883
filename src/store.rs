use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::error::StoreResult;
use crate::models::{Activity, NewActivity, NewPost, NewUser, Post, User};
use crate::schema::{activities, posts, users};
use crate::validation::{validate_new_post, validate_new_user};

pub fn insert_user(conn: &mut PgConnection, new_user: &NewUser) -> StoreResult<User> {
    validate_new_user(new_user)?;

    let user = diesel::insert_into(users::table)
        .values(new_user)
        .get_result::<User>(conn)?;

    tracing::debug!(user_id = user.user_id, "inserted user");
    Ok(user)
}

pub fn insert_activity(
    conn: &mut PgConnection,
    new_activity: &NewActivity,
) -> StoreResult<Activity> {
    let activity = diesel::insert_into(activities::table)
        .values(new_activity)
        .get_result::<Activity>(conn)?;

    tracing::debug!(
        user_id = activity.user_id,
        action_type = ?activity.action_type,
        "recorded activity"
    );
    Ok(activity)
}

pub fn insert_post(conn: &mut PgConnection, new_post: &NewPost) -> StoreResult<Post> {
    validate_new_post(new_post)?;

    let post = diesel::insert_into(posts::table)
        .values(new_post)
        .get_result::<Post>(conn)?;

    tracing::debug!(user_id = post.user_id, "inserted post");
    Ok(post)
}

/// `user_id` is not unique, so this can return several rows.
pub fn users_by_id(conn: &mut PgConnection, user_id: i32) -> StoreResult<Vec<User>> {
    let rows = users::table
        .filter(users::user_id.eq(user_id))
        .order(users::created_time.asc())
        .load::<User>(conn)?;
    Ok(rows)
}

pub fn activities_for_user(conn: &mut PgConnection, user_id: i32) -> StoreResult<Vec<Activity>> {
    let rows = activities::table
        .filter(activities::user_id.eq(user_id))
        .order(activities::created_time.asc())
        .load::<Activity>(conn)?;
    Ok(rows)
}

pub fn posts_for_user(conn: &mut PgConnection, user_id: i32) -> StoreResult<Vec<Post>> {
    let rows = posts::table
        .filter(posts::user_id.eq(user_id))
        .order(posts::created_time.asc())
        .load::<Post>(conn)?;
    Ok(rows)
}
