#![allow(dead_code)]

use std::collections::HashMap;

use rand::{TryCryptoRng, TryRngCore};

use passwords::ParameterSet;

/// Passwords hashed by every round-trip test.
pub const PASSWORDS: &[&str] = &["", "admin", "password", "1234567890", "hello, world"];

/// (hashed, attempted) pairs that must never verify.
pub const MISMATCHED: &[(&str, &str)] = &[
    ("", "hello, world"),
    ("admin", "1234567890"),
    ("password", "drowssap"),
    ("1234567890", "admin"),
    ("hello, world", ""),
];

/// Cheap Argon2id parameters so the suite runs in seconds.
pub fn fast_params() -> ParameterSet {
    ParameterSet::DEFAULT
        .with_memory_cost(1024)
        .with_time_cost(1)
        .with_parallelism(1)
}

/// The smallest parameter set Argon2 accepts, for tests that hash many times.
pub fn tiny_params() -> ParameterSet {
    fast_params().with_memory_cost(8)
}

/// Config lookup backed by a fixed map instead of the process environment.
pub fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

/// A secure RNG whose source has gone away.
pub struct FailingRng;

impl TryRngCore for FailingRng {
    type Error = std::io::Error;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(std::io::Error::other("entropy source offline"))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(std::io::Error::other("entropy source offline"))
    }

    fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
        Err(std::io::Error::other("entropy source offline"))
    }
}

impl TryCryptoRng for FailingRng {}
