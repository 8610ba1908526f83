//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::{rice_leaf_scan, scan_history, user_profile, users};

/// Insertable row for `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Insertable row for `user_profile`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profile)]
pub(crate) struct NewUserProfileRow<'a> {
    pub user_id: i32,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub age: Option<i32>,
    pub gender: &'a str,
    pub mobile_number: &'a str,
}

/// Credentials selected for a login attempt.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    pub user_id: i32,
    pub username: String,
    pub password: String,
}

/// Insertable row for `rice_leaf_scan`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rice_leaf_scan)]
pub(crate) struct NewRiceLeafScanRow<'a> {
    pub user_profile_id: i32,
    pub disease_prediction: &'a str,
    pub disease_prediction_score: f64,
}

/// Insertable row for `scan_history`; `scanned_at` takes its default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scan_history)]
pub(crate) struct NewScanHistoryRow {
    pub rice_leaf_scan_id: i32,
}
