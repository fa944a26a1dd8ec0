pub mod config;
pub mod encoding;
pub mod error;
pub mod params;
pub mod password;
pub mod pool;
pub mod record;
pub mod salt;

pub use error::{Error, Result};
pub use params::ParameterSet;
pub use password::{hash, hash_with_rng, verify};
pub use pool::HashPool;
pub use record::HashRecord;
