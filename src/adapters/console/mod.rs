//! Line-oriented console front-end.

mod command;
mod driver;

pub use command::{CommandError, ConsoleCommand, HELP};
pub use driver::{ConsoleDriver, ConsoleError, ConsoleReply};
