//! Diesel schema for delivery persistence.

diesel::table! {
    /// Submitted messages and their final status.
    messages (message_id) {
        /// Externally visible message identifier.
        #[max_length = 50]
        message_id -> Varchar,
        /// Provider code the message was submitted for.
        #[max_length = 100]
        provider -> Varchar,
        /// Recipient as submitted.
        #[max_length = 255]
        recipient -> Varchar,
        /// Message body.
        message_text -> Text,
        /// Caller metadata.
        metadata -> Jsonb,
        /// Delivery status.
        #[max_length = 20]
        status -> Varchar,
        /// Attempts made.
        attempts -> Int4,
        /// Error of the last failed attempt.
        last_error -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Timestamp of the final status update.
        last_attempt_at -> Nullable<Timestamptz>,
        /// Delivery timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only attempt log.
    delivery_attempts (id) {
        /// Surrogate key.
        id -> Int8,
        /// Message the attempt belongs to.
        #[max_length = 50]
        message_id -> Varchar,
        /// One-based attempt number.
        attempt_number -> Int4,
        /// Provider code.
        #[max_length = 100]
        provider -> Varchar,
        /// Attempt outcome.
        #[max_length = 20]
        status -> Varchar,
        /// Channel status code.
        response_code -> Nullable<Int4>,
        /// Raw channel response body.
        response_body -> Nullable<Text>,
        /// Error text.
        error_message -> Nullable<Text>,
        /// Dispatch duration in milliseconds.
        duration_ms -> Int8,
        /// Record timestamp.
        attempted_at -> Timestamptz,
    }
}
