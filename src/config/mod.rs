//! Configuration subsystem.
//!
//! Configuration is read once at startup from a TOML file, validated as a
//! whole, and immutable for the process lifetime. Handlers receive it only
//! through the components constructed from it.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FeeConfig, LedgerConfig, ListenerConfig, ObservabilityConfig, RelayConfig, TimeoutConfig,
    WhitelistConfig,
};
