pub mod gate;
pub mod issuer;
pub mod keys;
pub mod verifier;
