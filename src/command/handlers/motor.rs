//! Motor command handlers
//!
//! Validation order is part of the wire contract: port lookup, device
//! presence, numeric arguments in positional order, then the optional
//! stop/wait pair. The first failing check decides the reply.

use super::HandlerContext;
use crate::command::{parse_bool, parse_int, CommandError, Reply};
use crate::device::StopAction;

/// `motor_run_angle <port> <speed> <angle> [<stop> <wait>]`
///
/// The trailing pair must be supplied together or not at all; the
/// default is stop=HOLD, wait=true.
pub async fn motor_run_angle(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    let speed = parse_int(args[1])?;
    let angle = parse_int(args[2])?;

    let (stop, wait) = if args.len() > 3 {
        let stop = StopAction::from_name(args[3]).ok_or(CommandError::InvalidStop)?;
        (stop, parse_bool(args[4])?)
    } else {
        (StopAction::Hold, true)
    };

    motor.run_angle(speed, angle, stop, wait).await;
    Ok(Reply::Success)
}

/// `motor_run_time <port> <speed> <duration_ms> [<stop> <wait>]`
///
/// Same shape as `motor_run_angle` but the default is wait=false.
pub async fn motor_run_time(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    let speed = parse_int(args[1])?;
    let duration_ms = parse_int(args[2])?;

    let (stop, wait) = if args.len() > 3 {
        let stop = StopAction::from_name(args[3]).ok_or(CommandError::InvalidStop)?;
        (stop, parse_bool(args[4])?)
    } else {
        (StopAction::Hold, false)
    };

    motor.run_time(speed, duration_ms, stop, wait).await;
    Ok(Reply::Success)
}

/// `motor_run <port> <speed>` — run indefinitely.
pub async fn motor_run(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    let speed = parse_int(args[1])?;

    motor.run(speed).await;
    Ok(Reply::Success)
}

/// `motor_stop <port>` — coast to a stop.
pub async fn motor_stop(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    motor.stop().await;
    Ok(Reply::Success)
}

/// `motor_brake <port>` — passive brake.
pub async fn motor_brake(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    motor.brake().await;
    Ok(Reply::Success)
}

/// `motor_hold <port>` — actively hold the current angle.
pub async fn motor_hold(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let motor = ctx.motor(args[0])?;
    motor.hold().await;
    Ok(Reply::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::sim::{MotorAction, SimMotor};
    use crate::device::DeviceBindings;
    use crate::session::RunState;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_ctx() -> (HandlerContext, SimMotor) {
        let motor = SimMotor::new("A");
        let mut motors: HashMap<String, Option<Arc<dyn crate::device::Motor>>> = HashMap::new();
        motors.insert("A".into(), Some(Arc::new(motor.clone())));
        motors.insert("C".into(), None);

        let bindings = DeviceBindings::new(
            motors,
            HashMap::new(),
            Arc::new(crate::device::sim::SimButtonPad::new()),
        );

        let ctx = HandlerContext {
            bindings: Arc::new(bindings),
            run_state: RunState::new(),
            poll_interval: Duration::from_millis(1),
        };
        (ctx, motor)
    }

    #[tokio::test]
    async fn test_motor_run() {
        let (ctx, motor) = test_ctx();
        let reply = motor_run(&ctx, &["A", "200"]).await.unwrap();
        assert_eq!(reply, Reply::Success);
        assert_eq!(motor.last_action(), Some(MotorAction::Run { speed: 200 }));
    }

    #[tokio::test]
    async fn test_motor_run_unknown_port() {
        let (ctx, _) = test_ctx();
        let err = motor_run(&ctx, &["Z", "200"]).await.unwrap_err();
        assert_eq!(err, CommandError::InvalidPort);
    }

    #[tokio::test]
    async fn test_motor_run_empty_port() {
        let (ctx, _) = test_ctx();
        let err = motor_run(&ctx, &["C", "200"]).await.unwrap_err();
        assert_eq!(err, CommandError::NoMotor);
    }

    #[tokio::test]
    async fn test_port_checked_before_number() {
        let (ctx, _) = test_ctx();
        let err = motor_run(&ctx, &["Z", "abc"]).await.unwrap_err();
        assert_eq!(err, CommandError::InvalidPort);
    }

    #[tokio::test]
    async fn test_motor_run_not_a_number() {
        let (ctx, _) = test_ctx();
        let err = motor_run(&ctx, &["A", "abc"]).await.unwrap_err();
        assert_eq!(err, CommandError::NotANumber);
    }

    #[tokio::test]
    async fn test_run_angle_defaults() {
        let (ctx, motor) = test_ctx();
        let reply = motor_run_angle(&ctx, &["A", "100", "90"]).await.unwrap();
        assert_eq!(reply, Reply::Success);
        assert_eq!(
            motor.last_action(),
            Some(MotorAction::RunAngle {
                speed: 100,
                angle: 90,
                stop: StopAction::Hold,
                wait: true,
            })
        );
    }

    #[tokio::test]
    async fn test_run_time_defaults() {
        let (ctx, motor) = test_ctx();
        let reply = motor_run_time(&ctx, &["A", "100", "0"]).await.unwrap();
        assert_eq!(reply, Reply::Success);
        assert_eq!(
            motor.last_action(),
            Some(MotorAction::RunTime {
                speed: 100,
                duration_ms: 0,
                stop: StopAction::Hold,
                wait: false,
            })
        );
    }

    #[tokio::test]
    async fn test_run_angle_explicit_pair() {
        let (ctx, motor) = test_ctx();
        let reply = motor_run_angle(&ctx, &["A", "100", "90", "COAST", "false"])
            .await
            .unwrap();
        assert_eq!(reply, Reply::Success);
        assert_eq!(
            motor.last_action(),
            Some(MotorAction::RunAngle {
                speed: 100,
                angle: 90,
                stop: StopAction::Coast,
                wait: false,
            })
        );
    }

    #[tokio::test]
    async fn test_run_angle_invalid_stop() {
        let (ctx, _) = test_ctx();
        let err = motor_run_angle(&ctx, &["A", "100", "90", "SLIDE", "true"])
            .await
            .unwrap_err();
        assert_eq!(err, CommandError::InvalidStop);
    }

    #[tokio::test]
    async fn test_run_angle_invalid_bool() {
        let (ctx, _) = test_ctx();
        let err = motor_run_angle(&ctx, &["A", "100", "90", "HOLD", "treu"])
            .await
            .unwrap_err();
        assert_eq!(err, CommandError::NotBoolean);
    }

    #[tokio::test]
    async fn test_float_speed_truncated() {
        let (ctx, motor) = test_ctx();
        motor_run(&ctx, &["A", "200.7"]).await.unwrap();
        assert_eq!(motor.last_action(), Some(MotorAction::Run { speed: 200 }));
    }

    #[tokio::test]
    async fn test_stop_brake_hold() {
        let (ctx, motor) = test_ctx();

        motor_stop(&ctx, &["A"]).await.unwrap();
        assert_eq!(motor.last_action(), Some(MotorAction::Stop));

        motor_brake(&ctx, &["A"]).await.unwrap();
        assert_eq!(motor.last_action(), Some(MotorAction::Brake));

        motor_hold(&ctx, &["A"]).await.unwrap();
        assert_eq!(motor.last_action(), Some(MotorAction::Hold));
    }
}
