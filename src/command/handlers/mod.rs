//! Command handlers, grouped by the device family they act on

mod buttons;
mod motor;
mod sensor;

pub use buttons::{button_status, buttons_clicked, buttons_pressed};
pub use motor::{motor_brake, motor_hold, motor_run, motor_run_angle, motor_run_time, motor_stop};
pub use sensor::{sensor_touch, sensor_touch_wait_until_clicked, sensor_touch_wait_until_pressed};

use crate::command::CommandError;
use crate::device::{DeviceBindings, Motor, TouchSensor};
use crate::session::RunState;
use std::sync::Arc;
use std::time::Duration;

/// Context passed to every handler.
#[derive(Clone)]
pub struct HandlerContext {
    pub bindings: Arc<DeviceBindings>,
    pub run_state: RunState,
    /// Sleep applied per iteration of every blocking wait loop.
    /// Cancellation latency is bounded by one interval.
    pub poll_interval: Duration,
}

impl HandlerContext {
    /// Resolve a motor port argument, distinguishing an unknown port
    /// from a known port with no motor attached.
    pub(super) fn motor(&self, port: &str) -> Result<&Arc<dyn Motor>, CommandError> {
        self.bindings
            .motor(port)
            .ok_or(CommandError::InvalidPort)?
            .ok_or(CommandError::NoMotor)
    }

    /// Resolve a touch sensor port argument.
    pub(super) fn touch_sensor(&self, port: &str) -> Result<&Arc<dyn TouchSensor>, CommandError> {
        self.bindings
            .touch_sensor(port)
            .ok_or(CommandError::InvalidPort)?
            .ok_or(CommandError::NoTouchSensor)
    }

    pub(super) async fn poll_pause(&self) {
        tokio::time::sleep(self.poll_interval).await;
    }
}
