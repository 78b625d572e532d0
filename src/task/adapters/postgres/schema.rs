//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Trimmed task title.
        #[max_length = 200]
        title -> Varchar,
        /// Task description, empty when none was given.
        description -> Text,
        /// Task priority choice.
        #[max_length = 20]
        priority -> Varchar,
        /// Task status choice.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last write timestamp.
        updated_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
    }
}
