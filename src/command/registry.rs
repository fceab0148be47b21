//! Command table: name → arity rule + handler
//!
//! Dispatch is a flat lookup on the first token. The arity rule is
//! checked here before the handler runs, so handlers can index their
//! argument slice directly.

use super::handlers::{self, HandlerContext};
use super::{CommandError, Reply};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

type HandlerResult = Result<Reply, CommandError>;
type HandlerFn = for<'a> fn(
    &'a HandlerContext,
    &'a [&'a str],
) -> Pin<Box<dyn Future<Output = HandlerResult> + Send + 'a>>;

/// Argument-count rule for one command (counted without the command
/// name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// At least this many arguments.
    AtLeast(usize),
    /// `required` arguments plus an optional trailing pair that must be
    /// supplied together: `required` and `required + 2` (or more, extras
    /// ignored) are accepted, `required + 1` is rejected. Existing
    /// clients rely on the rejected middle count.
    PairedTail { required: usize },
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::PairedTail { required } => count >= required && count != required + 1,
        }
    }
}

struct CommandSpec {
    arity: Arity,
    run: HandlerFn,
}

/// The fixed command table, built once at startup.
pub struct CommandRegistry {
    table: HashMap<&'static str, CommandSpec>,
}

macro_rules! spec {
    ($arity:expr, $handler:path) => {{
        fn run<'a>(
            ctx: &'a HandlerContext,
            args: &'a [&'a str],
        ) -> Pin<Box<dyn Future<Output = HandlerResult> + Send + 'a>> {
            Box::pin($handler(ctx, args))
        }
        CommandSpec { arity: $arity, run }
    }};
}

impl CommandRegistry {
    pub fn new() -> Self {
        use Arity::{AtLeast, Exact, PairedTail};

        let mut table = HashMap::new();
        table.insert(
            "motor_run_angle",
            spec!(PairedTail { required: 3 }, handlers::motor_run_angle),
        );
        table.insert(
            "motor_run_time",
            spec!(PairedTail { required: 3 }, handlers::motor_run_time),
        );
        table.insert("motor_run", spec!(Exact(2), handlers::motor_run));
        table.insert("motor_stop", spec!(Exact(1), handlers::motor_stop));
        table.insert("motor_brake", spec!(Exact(1), handlers::motor_brake));
        table.insert("motor_hold", spec!(Exact(1), handlers::motor_hold));
        table.insert("sensor_touch", spec!(Exact(1), handlers::sensor_touch));
        table.insert(
            "sensor_touch_wait_until_pressed",
            spec!(Exact(1), handlers::sensor_touch_wait_until_pressed),
        );
        table.insert(
            "sensor_touch_wait_until_clicked",
            spec!(Exact(1), handlers::sensor_touch_wait_until_clicked),
        );
        table.insert(
            "buttons_pressed",
            spec!(AtLeast(1), handlers::buttons_pressed),
        );
        table.insert(
            "buttons_clicked",
            spec!(AtLeast(1), handlers::buttons_clicked),
        );
        table.insert("button_status", spec!(Exact(1), handlers::button_status));

        Self { table }
    }

    /// Parse one received payload and run the matching handler,
    /// producing the wire reply.
    pub async fn dispatch(&self, ctx: &HandlerContext, line: &str) -> String {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some((name, args)) = tokens.split_first() else {
            return CommandError::UnrecognizedCommand.to_string();
        };
        let Some(spec) = self.table.get(name) else {
            return CommandError::UnrecognizedCommand.to_string();
        };
        if !spec.arity.accepts(args.len()) {
            return CommandError::WrongArgumentCount.to_string();
        }

        match (spec.run)(ctx, args).await {
            Ok(reply) => reply.as_wire().to_string(),
            Err(err) => err.to_string(),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
