use argon2::{Algorithm, Argon2, Version};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::encoding;
use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::record::HashRecord;
use crate::salt;

/// Hash a password with a fresh salt from the operating system RNG.
///
/// The password is taken as raw bytes; no Unicode normalization is applied.
pub fn hash(password: impl AsRef<[u8]>, params: &ParameterSet) -> Result<HashRecord> {
    hash_with_rng(password, params, &mut OsRng)
}

/// Hash a password, drawing the salt from `rng`.
pub fn hash_with_rng<R>(
    password: impl AsRef<[u8]>,
    params: &ParameterSet,
    rng: &mut R,
) -> Result<HashRecord>
where
    R: TryCryptoRng + ?Sized,
{
    params.validate()?;

    let salt = salt::generate(rng, params.salt_length)?;
    let key = derive(password.as_ref(), &salt, params)?;

    Ok(HashRecord {
        salt: encoding::encode(&salt),
        hash: encoding::encode(&key),
        params: params.clone(),
    })
}

/// Verify a password against a stored record, using the record's own parameters.
///
/// `Ok(false)` means the password is wrong. Every `Err` means the check could
/// not run at all and must not be read as a rejection of the password.
pub fn verify(password: impl AsRef<[u8]>, record: Option<&HashRecord>) -> Result<bool> {
    let record = record.ok_or(Error::MissingRecord)?;

    let salt = encoding::decode("salt", &record.salt)?;
    if salt.len() != record.params.salt_length as usize {
        return Err(Error::malformed(
            "salt",
            format!(
                "expected {} bytes, got {}",
                record.params.salt_length,
                salt.len()
            ),
        ));
    }
    let expected = Zeroizing::new(encoding::decode("hash", &record.hash)?);

    let derived = derive(password.as_ref(), &salt, &record.params)?;

    // Slice ct_eq reports unequal lengths as a mismatch without inspecting content.
    Ok(derived.as_slice().ct_eq(expected.as_slice()).into())
}

fn derive(password: &[u8], salt: &[u8], params: &ParameterSet) -> Result<Zeroizing<Vec<u8>>> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.argon2_params()?);

    let mut key = Zeroizing::new(vec![0u8; params.key_length as usize]);
    argon2
        .hash_password_into(password, salt, key.as_mut_slice())
        .map_err(|e| Error::invalid_params(e.to_string()))?;

    Ok(key)
}
