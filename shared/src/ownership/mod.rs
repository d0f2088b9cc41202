pub mod ownership_status;
pub mod ownership_token;
