pub mod api;
pub mod domain;
pub mod services;

// Exposed for integration tests.
pub mod test_helpers;
