// Diesel schema for the games table - internal use only.

diesel::table! {
    games (id) {
        id -> Integer,
        board -> Text,
        whose_turn -> Text,
        status -> Text,
        outcome -> Text,
        winner -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}
