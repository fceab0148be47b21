//! EV3 remote command bridge
//!
//! A single-client TCP server for a battery-powered brick: framed text
//! commands arrive on the command channel, get validated and dispatched
//! to motors, touch sensors and brick buttons, and each produces exactly
//! one framed reply. A second channel carries the one-shot cancellation
//! signal, fired by a physical button gesture, that can interrupt
//! blocking wait commands while the command channel is busy.

pub mod codec;
pub mod command;
pub mod config;
pub mod device;
pub mod monitor;
pub mod protocol;
pub mod session;

pub use command::{CommandError, CommandRegistry, Reply};
pub use config::ServerConfig;
pub use session::{RunState, SessionSupervisor};
