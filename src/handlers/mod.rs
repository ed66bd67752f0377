pub mod account;
pub mod fallback;
pub mod health;
pub mod index;
pub mod login;
pub mod signup;
pub mod users;
