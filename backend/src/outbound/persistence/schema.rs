//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Registered users; username and email are globally unique.
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        password_digest -> Text,
        role -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Job postings, each owned by one recruiter.
    jobs (id) {
        id -> Integer,
        title -> Text,
        company -> Text,
        description -> Text,
        location -> Text,
        salary -> Nullable<Text>,
        recruiter_id -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Candidate submissions against jobs; duplicates are permitted.
    applications (id) {
        id -> Integer,
        candidate_id -> Integer,
        job_id -> Integer,
        name -> Text,
        email -> Text,
        cover_letter -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(jobs -> users (recruiter_id));
diesel::joinable!(applications -> jobs (job_id));
diesel::joinable!(applications -> users (candidate_id));

diesel::allow_tables_to_appear_in_same_query!(users, jobs, applications);
