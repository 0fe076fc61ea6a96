pub mod config;
pub mod connection;
pub mod decode;

pub use config::{Network, ServiceConfig};
pub use connection::{connect, ConnectError, IcPollService};

/// The adapter every component talks to.
pub type PollClient = poll_core::PollAdapter<IcPollService>;

pub fn client(config: &ServiceConfig) -> Result<PollClient, ConnectError> {
    connect(config).map(poll_core::PollAdapter::new)
}
