//! Diesel schema for the entity store.

diesel::table! {
    /// Registered chat users.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// External chat identity.
        chat_id -> Int8,
        /// Chat handle.
        #[max_length = 255]
        username -> Nullable<Varchar>,
        /// Given name.
        #[max_length = 255]
        first_name -> Nullable<Varchar>,
        /// Family name.
        #[max_length = 255]
        last_name -> Nullable<Varchar>,
        /// Premium chat account flag.
        is_premium -> Bool,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-defined task categories.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// `#RRGGBB` color.
        #[max_length = 7]
        color -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Optional category; set to null when the category is deleted.
        category_id -> Nullable<Uuid>,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority tier.
        #[max_length = 10]
        priority -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Estimated duration in minutes.
        estimated_minutes -> Nullable<Int4>,
        /// Accumulated actual duration in minutes.
        actual_minutes -> Int4,
        /// Deadline reminder delivered flag.
        reminder_sent -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// First completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Checklist items belonging to tasks.
    subtasks (id) {
        /// Subtask identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Checked-off flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(categories -> users (user_id));
diesel::joinable!(tasks -> users (user_id));
diesel::joinable!(tasks -> categories (category_id));
diesel::joinable!(subtasks -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(users, categories, tasks, subtasks);
