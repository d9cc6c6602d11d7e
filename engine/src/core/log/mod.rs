//! Log collection for hosts and tests.
mod channel;

pub use channel::{ChannelLogger, LogMessage};
