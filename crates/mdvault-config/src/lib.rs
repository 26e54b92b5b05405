//! # mdvault configuration
//!
//! Resolves where the vault lives, where daily notes go and which external
//! notes CLI to call.
//!
//! ```rust,no_run
//! use mdvault_config::ConfigLoader;
//!
//! let config = ConfigLoader::new().with_vault_path("/home/me/vault").resolve()?;
//! println!("{}", config.daily_format);
//! # Ok::<(), mdvault_config::ConfigError>(())
//! ```

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::*;
pub use loader::*;
