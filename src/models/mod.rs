pub mod account;
pub mod claims;
pub mod response;
pub mod user;
