// RSA key pair used to sign and verify account tokens

use crate::core::config::KeysConfig;
use crate::models::claims::TokenClaims;
use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::path::Path;

/// Signing and verification keys, loaded once at startup and read-only afterwards
pub struct KeyPair {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl KeyPair {
    /// Load `<dir>/<private_key>` and `<dir>/<public_key>`
    ///
    /// Any failure here is fatal for the process.
    pub fn load(config: &KeysConfig) -> Result<Self> {
        let private_path = config.dir.join(&config.private_key);
        let public_path = config.dir.join(&config.public_key);

        let private_pem = read_pem(&private_path)?;
        let public_pem = read_pem(&public_path)?;

        Self::from_pem(&private_pem, &public_pem).context(format!(
            "Invalid key pair in {}",
            config.dir.display()
        ))
    }

    /// Parse a PEM encoded RSA key pair and check that the halves belong together
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self> {
        let encoding =
            EncodingKey::from_rsa_pem(private_pem).context("Failed to parse RSA private key")?;
        let decoding =
            DecodingKey::from_rsa_pem(public_pem).context("Failed to parse RSA public key")?;

        let keys = Self { encoding, decoding };
        keys.check_pair().context("Private and public keys do not match")?;

        Ok(keys)
    }

    fn check_pair(&self) -> jsonwebtoken::errors::Result<()> {
        let claims = TokenClaims::new("key_check", i64::MAX);
        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<TokenClaims>(&token, &self.decoding, &validation)?;

        Ok(())
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).context(format!("Failed to read key file: {}", path.display()))
}
