pub mod access_token_cache;
pub mod firebase_client;
pub mod firebase_endpoints;
pub mod public_key_cache;
pub mod service_account;
