//! Touch sensor command handlers
//!
//! The wait-style handlers poll the sensor together with the session run
//! state. Run state is checked first on every iteration, so once
//! cancellation fires they return `exit` without touching the device.

use super::HandlerContext;
use crate::command::{CommandError, Reply};

/// `sensor_touch <port>` — report the current state as a boolean string.
pub async fn sensor_touch(ctx: &HandlerContext, args: &[&str]) -> Result<Reply, CommandError> {
    let sensor = ctx.touch_sensor(args[0])?;
    Ok(Reply::Bool(sensor.pressed().await))
}

/// `sensor_touch_wait_until_pressed <port>` — block until the sensor is
/// pressed, or until cancellation.
pub async fn sensor_touch_wait_until_pressed(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let sensor = ctx.touch_sensor(args[0])?;

    loop {
        if !ctx.run_state.is_running() {
            return Ok(Reply::Exit);
        }
        if sensor.pressed().await {
            return Ok(Reply::Success);
        }
        ctx.poll_pause().await;
    }
}

/// `sensor_touch_wait_until_clicked <port>` — block until a full
/// off→on→off cycle is observed, or until cancellation. An initial press
/// already in progress is drained first.
pub async fn sensor_touch_wait_until_clicked(
    ctx: &HandlerContext,
    args: &[&str],
) -> Result<Reply, CommandError> {
    let sensor = ctx.touch_sensor(args[0])?;

    while ctx.run_state.is_running() && sensor.pressed().await {
        ctx.poll_pause().await;
    }
    while ctx.run_state.is_running() && !sensor.pressed().await {
        ctx.poll_pause().await;
    }
    while ctx.run_state.is_running() && sensor.pressed().await {
        ctx.poll_pause().await;
    }

    if ctx.run_state.is_running() {
        Ok(Reply::Success)
    } else {
        Ok(Reply::Exit)
    }
}
