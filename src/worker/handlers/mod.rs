pub mod create_account;
pub mod transaction;
