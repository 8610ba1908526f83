//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `password` holds a bcrypt digest.
    users (user_id) {
        user_id -> Int4,
        username -> Varchar,
        email -> Varchar,
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Personal details; exactly one row per user.
    user_profile (id) {
        id -> Int4,
        user_id -> Int4,
        firstname -> Varchar,
        lastname -> Varchar,
        age -> Nullable<Int4>,
        gender -> Varchar,
        mobile_number -> Varchar,
    }
}

diesel::table! {
    /// Stored prediction results. `user_profile_id` is not a foreign key.
    rice_leaf_scan (id) {
        id -> Int4,
        user_profile_id -> Int4,
        disease_prediction -> Varchar,
        disease_prediction_score -> Float8,
    }
}

diesel::table! {
    /// When each scan was recorded.
    scan_history (id) {
        id -> Int4,
        rice_leaf_scan_id -> Int4,
        scanned_at -> Timestamptz,
    }
}

diesel::joinable!(user_profile -> users (user_id));
diesel::joinable!(scan_history -> rice_leaf_scan (rice_leaf_scan_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_profile, rice_leaf_scan, scan_history);
