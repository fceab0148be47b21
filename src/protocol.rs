//! Wire-level constants shared by both channels
//!
//! Every string here is part of the protocol contract with existing
//! clients and must not change.

/// Default port for the command channel (request/response).
pub const COMMAND_PORT: u16 = 8070;

/// Default port for the exit channel. Commands on the command channel can
/// block, so cancellation is signalled on this dedicated port.
pub const EXIT_PORT: u16 = 8071;

/// Reply sent when a command completed normally.
pub const SUCCESS: &str = "success";

/// Sent on the exit channel when the cancellation gesture fires, and as
/// the reply of a blocking command interrupted by it. Also the literal
/// client request that ends the session.
pub const EXIT: &str = "exit";
