use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shortest salt Argon2 accepts, in bytes.
pub const MIN_SALT_LENGTH: u32 = 8;

/// Shortest output Argon2 accepts, in bytes.
pub const MIN_KEY_LENGTH: u32 = 4;

/// Largest working set derived from any parameter set, stored ones included: 4 GiB.
pub const MAX_MEMORY_COST: u32 = 4 * 1024 * 1024;

/// Largest output derived, in bytes.
pub const MAX_KEY_LENGTH: u32 = 1024;

/// Shape of one Argon2 derivation. Every `HashRecord` carries its own copy, so
/// changing `DEFAULT` only affects hashes created afterwards.
///
/// The serialized field names match records written by earlier releases; the
/// aliases accept the second historical layout (`iterations` / `paralleslism`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Informational label, carried through encoding but never dispatched on.
    #[serde(rename = "hash_function")]
    pub algorithm: Cow<'static, str>,
    /// Working-set size in KiB.
    #[serde(rename = "memory")]
    pub memory_cost: u32,
    /// Number of passes over memory.
    #[serde(rename = "time", alias = "iterations")]
    pub time_cost: u32,
    /// Number of lanes.
    #[serde(rename = "threads", alias = "parallelism", alias = "paralleslism")]
    pub parallelism: u8,
    pub salt_length: u32,
    pub key_length: u32,
}

impl ParameterSet {
    /// Parameters used for new hashes: Argon2id, 64 MiB, 2 passes, 8 lanes.
    pub const DEFAULT: ParameterSet = ParameterSet {
        algorithm: Cow::Borrowed("argon2id"),
        memory_cost: 64 * 1024,
        time_cost: 2,
        parallelism: 8,
        salt_length: 16,
        key_length: 32,
    };

    /// Defaults of the older record layout: 32 MiB, 3 passes, 4 lanes, 32 byte salt.
    pub const LEGACY: ParameterSet = ParameterSet {
        algorithm: Cow::Borrowed("argon2"),
        memory_cost: 32 * 1024,
        time_cost: 3,
        parallelism: 4,
        salt_length: 32,
        key_length: 32,
    };

    pub fn with_algorithm(mut self, algorithm: impl Into<Cow<'static, str>>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    pub fn with_parallelism(mut self, parallelism: u8) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_salt_length(mut self, salt_length: u32) -> Self {
        self.salt_length = salt_length;
        self
    }

    pub fn with_key_length(mut self, key_length: u32) -> Self {
        self.key_length = key_length;
        self
    }

    /// Check that every field is usable before any entropy is spent on it.
    pub fn validate(&self) -> Result<()> {
        if self.memory_cost == 0 {
            return Err(Error::invalid_params("memory cost must be greater than zero"));
        }
        if self.time_cost == 0 {
            return Err(Error::invalid_params("time cost must be greater than zero"));
        }
        if self.parallelism == 0 {
            return Err(Error::invalid_params("parallelism must be greater than zero"));
        }
        if self.salt_length < MIN_SALT_LENGTH {
            return Err(Error::invalid_params(format!(
                "salt length must be at least {MIN_SALT_LENGTH} bytes, got {}",
                self.salt_length
            )));
        }
        if self.key_length < MIN_KEY_LENGTH {
            return Err(Error::invalid_params(format!(
                "key length must be at least {MIN_KEY_LENGTH} bytes, got {}",
                self.key_length
            )));
        }

        self.argon2_params().map(|_| ())
    }

    /// Also guards `verify`, whose parameters come from storage and may be corrupt.
    pub(crate) fn argon2_params(&self) -> Result<argon2::Params> {
        if self.memory_cost > MAX_MEMORY_COST {
            return Err(Error::invalid_params(format!(
                "memory cost must be at most {MAX_MEMORY_COST} KiB, got {}",
                self.memory_cost
            )));
        }
        if self.key_length > MAX_KEY_LENGTH {
            return Err(Error::invalid_params(format!(
                "key length must be at most {MAX_KEY_LENGTH} bytes, got {}",
                self.key_length
            )));
        }

        argon2::Params::new(
            self.memory_cost,
            self.time_cost,
            u32::from(self.parallelism),
            Some(self.key_length as usize),
        )
        .map_err(|e| Error::invalid_params(e.to_string()))
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}
