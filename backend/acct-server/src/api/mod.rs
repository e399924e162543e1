pub mod accounts;
pub mod envelope;
pub mod error;
pub mod error_policy;
pub mod extractors;
