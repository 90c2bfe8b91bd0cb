//! Configuration loader for the `krishi-sahayi` backend service.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). Consolidating configuration logic here
//! avoids scattering `env::var` calls throughout the codebase.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional environment variable. The three-argument form falls
/// back to a default; the two-argument form yields an `Option`.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// TCP port the HTTP listener binds on.
    pub port: u16,

    /// bcrypt cost factor used when hashing passwords.
    pub bcrypt_cost: u32,

    /// Fixed seed for the synthesis RNG; unset means seed from entropy.
    pub rng_seed: Option<u64>,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `PORT` – HTTP listen port (default: 8080)
/// - `BCRYPT_COST` – bcrypt cost factor (default: 10)
/// - `RNG_SEED` – fixed RNG seed for reproducible synthesis (default: unset)
///
/// Returns an error if any variable is present but unparsable.
pub fn load_from_env() -> Result<Config> {
    // ---
    let port = parse_env!("PORT", u16, 8080);
    let bcrypt_cost = parse_env!("BCRYPT_COST", u32, 10);
    let rng_seed = parse_env!("RNG_SEED", u64);

    Ok(Config {
        port,
        bcrypt_cost,
        rng_seed,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  PORT        : {}", self.port);
        tracing::info!("  BCRYPT_COST : {}", self.bcrypt_cost);
        match self.rng_seed {
            Some(seed) => tracing::info!("  RNG_SEED    : {}", seed),
            None => tracing::info!("  RNG_SEED    : (entropy)"),
        }
    }
}
