mod relay;
mod relay_config;

pub use relay::Relay;
pub use relay_config::{OwnershipPolicy, RelayConfig};
