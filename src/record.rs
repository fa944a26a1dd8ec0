use std::borrow::Cow;

use argon2::password_hash::PasswordHash;
use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::password;

/// Argon2 version 1.3, the only one this crate derives with.
const ARGON2_VERSION: u32 = 0x13;

/// PHC identifiers derived with Argon2id. `argon2` is the label of the older record layout.
const PHC_ALGORITHMS: &[&str] = &["argon2id", "argon2"];

/// PHC salts are at most 64 base64 characters.
pub const PHC_MAX_SALT_LENGTH: u32 = 48;

/// PHC outputs are between 10 and 64 bytes.
pub const PHC_MIN_KEY_LENGTH: u32 = 10;
pub const PHC_MAX_KEY_LENGTH: u32 = 64;

/// The stored result of one hash event. Callers own persistence; every field,
/// `params` included, must be kept for the record to stay verifiable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    pub salt: String,
    pub hash: String,
    pub params: ParameterSet,
}

impl HashRecord {
    pub fn verify(&self, password: impl AsRef<[u8]>) -> Result<bool> {
        password::verify(password, Some(self))
    }

    /// Render as a PHC string, e.g. `$argon2id$v=19$m=65536,t=2,p=8$<salt>$<hash>`.
    ///
    /// Fails with `InvalidParameters` when the record cannot be read back by
    /// `from_phc_str`: unknown label, salt over 48 bytes, key outside 10..=64 bytes.
    pub fn to_phc_string(&self) -> Result<String> {
        let params = &self.params;
        if !PHC_ALGORITHMS.iter().any(|name| params.algorithm == *name) {
            return Err(Error::invalid_params(format!(
                "algorithm `{}` has no PHC form",
                params.algorithm
            )));
        }
        if params.salt_length > PHC_MAX_SALT_LENGTH {
            return Err(Error::invalid_params(format!(
                "PHC salts are at most {PHC_MAX_SALT_LENGTH} bytes, got {}",
                params.salt_length
            )));
        }
        if !(PHC_MIN_KEY_LENGTH..=PHC_MAX_KEY_LENGTH).contains(&params.key_length) {
            return Err(Error::invalid_params(format!(
                "PHC keys are {PHC_MIN_KEY_LENGTH} to {PHC_MAX_KEY_LENGTH} bytes, got {}",
                params.key_length
            )));
        }

        Ok(format!(
            "${}$v={}$m={},t={},p={}${}${}",
            self.params.algorithm,
            ARGON2_VERSION,
            self.params.memory_cost,
            self.params.time_cost,
            self.params.parallelism,
            self.salt,
            self.hash,
        ))
    }

    /// Parse a PHC string produced by `to_phc_string` or another Argon2 implementation.
    pub fn from_phc_str(phc: &str) -> Result<Self> {
        let parsed = PasswordHash::new(phc).map_err(|e| Error::malformed("phc", e.to_string()))?;

        // The identifier names the variant that produced the hash; only Argon2id re-derives.
        let algorithm = parsed.algorithm.as_str();
        if !PHC_ALGORITHMS.contains(&algorithm) {
            return Err(Error::malformed(
                "phc",
                format!("unsupported algorithm `{algorithm}`"),
            ));
        }

        if let Some(version) = parsed.version {
            if version != ARGON2_VERSION {
                return Err(Error::malformed(
                    "phc",
                    format!("unsupported argon2 version {version}"),
                ));
            }
        }

        let memory_cost = phc_param(&parsed, "m")?;
        let time_cost = phc_param(&parsed, "t")?;
        let parallelism = u8::try_from(phc_param(&parsed, "p")?)
            .map_err(|_| Error::malformed("phc", "parallelism exceeds 255 lanes"))?;

        let salt = parsed
            .salt
            .ok_or_else(|| Error::malformed("phc", "missing salt"))?;
        let salt = encoding::decode("salt", salt.as_str())?;
        let hash = parsed
            .hash
            .ok_or_else(|| Error::malformed("phc", "missing hash"))?;

        Ok(HashRecord {
            salt: encoding::encode(&salt),
            hash: encoding::encode(hash.as_bytes()),
            params: ParameterSet {
                algorithm: Cow::Owned(algorithm.to_owned()),
                memory_cost,
                time_cost,
                parallelism,
                salt_length: salt.len() as u32,
                key_length: hash.len() as u32,
            },
        })
    }
}

fn phc_param(parsed: &PasswordHash<'_>, name: &'static str) -> Result<u32> {
    parsed
        .params
        .get_decimal(name)
        .ok_or_else(|| Error::malformed("phc", format!("missing or non-numeric parameter `{name}`")))
}
