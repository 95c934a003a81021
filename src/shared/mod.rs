pub mod logging;

pub use logging::{EventLog, LogLevel};
