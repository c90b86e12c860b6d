// Mirrors the Supabase tables. They are managed outside this crate.

diesel::table! {
    subscribers (user_id) {
        user_id -> Text,
        is_active -> Bool,
        last_push_date -> Nullable<Date>,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Text,
        city -> Nullable<Text>,
    }
}
