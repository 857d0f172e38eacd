//! Diesel schema for provider configuration.

diesel::table! {
    /// Configured delivery providers.
    providers (provider_code) {
        /// Unique provider code.
        #[max_length = 100]
        provider_code -> Varchar,
        /// Human-readable provider name.
        #[max_length = 255]
        provider_name -> Varchar,
        /// Channel type, unset for providers without an integration.
        #[max_length = 100]
        provider_type -> Nullable<Varchar>,
        /// Whether the provider accepts deliveries.
        is_active -> Bool,
        /// Type-specific credential bundle.
        config -> Nullable<Jsonb>,
    }
}
