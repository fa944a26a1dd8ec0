use rand::TryCryptoRng;

use crate::error::{Error, Result};

/// Fill `len` fresh bytes from `rng`. A failing source is terminal for the call.
pub fn generate<R>(rng: &mut R, len: u32) -> Result<Vec<u8>>
where
    R: TryCryptoRng + ?Sized,
{
    let mut salt = vec![0u8; len as usize];
    rng.try_fill_bytes(&mut salt)
        .map_err(|e| Error::EntropyUnavailable(e.to_string()))?;
    Ok(salt)
}
