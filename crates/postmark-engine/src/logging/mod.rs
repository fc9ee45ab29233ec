//! Logger initialization over the `log` facade (env_logger backend).

mod init;

pub use init::{init_logging, LoggingConfig};
