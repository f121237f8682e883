// Mirrors migrations/2018-08-01-000000_create_schema/up.sql.
//
// None of these tables declares a primary key. diesel requires one in
// `table!`, so the keys below only exist on the Rust side and are never
// emitted into the DDL.

diesel::table! {
    users (user_id) {
        user_id -> Int4,
        #[max_length = 50]
        first_name -> Varchar,
        #[max_length = 50]
        last_name -> Varchar,
        #[max_length = 150]
        hashed_password -> Nullable<Varchar>,
        #[max_length = 150]
        access_token -> Nullable<Varchar>,
        #[max_length = 150]
        refresh_token -> Nullable<Varchar>,
        source -> Nullable<Int2>,
        status -> Int4,
        weight -> Nullable<Range<Int4>>,
        created_time -> Timestamptz,
    }
}

diesel::table! {
    activities (user_id, created_time) {
        user_id -> Int4,
        action_type -> Nullable<Int2>,
        created_time -> Timestamptz,
    }
}

diesel::table! {
    posts (user_id, created_time) {
        user_id -> Int4,
        #[max_length = 500]
        content -> Varchar,
        created_time -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(activities, posts, users,);
