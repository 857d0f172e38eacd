//! Unit tests for provider configuration lookup.
