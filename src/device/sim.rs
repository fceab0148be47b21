//! Simulated devices
//!
//! Stand-ins for the vendor hardware stack. The binary wires these into
//! the port layout at startup so the bridge can run off-brick, and the
//! tests drive them to exercise handlers and the cancellation monitor.

use super::{BrickButton, ButtonPad, Motor, StopAction, TouchSensor};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// An action observed by a [`SimMotor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotorAction {
    Run { speed: i32 },
    RunAngle { speed: i32, angle: i32, stop: StopAction, wait: bool },
    RunTime { speed: i32, duration_ms: i32, stop: StopAction, wait: bool },
    Stop,
    Brake,
    Hold,
}

/// Simulated motor that logs and records every action.
#[derive(Clone)]
pub struct SimMotor {
    port: String,
    actions: Arc<Mutex<Vec<MotorAction>>>,
}

impl SimMotor {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            actions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The most recent action, if any.
    pub fn last_action(&self) -> Option<MotorAction> {
        self.actions.lock().unwrap().last().cloned()
    }

    fn record(&self, action: MotorAction) {
        info!(port = %self.port, ?action, "motor action");
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Motor for SimMotor {
    async fn run(&self, speed: i32) {
        self.record(MotorAction::Run { speed });
    }

    async fn run_angle(&self, speed: i32, angle: i32, stop: StopAction, wait: bool) {
        self.record(MotorAction::RunAngle { speed, angle, stop, wait });
    }

    async fn run_time(&self, speed: i32, duration_ms: i32, stop: StopAction, wait: bool) {
        self.record(MotorAction::RunTime { speed, duration_ms, stop, wait });
        if wait && duration_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(duration_ms as u64)).await;
        }
    }

    async fn stop(&self) {
        self.record(MotorAction::Stop);
    }

    async fn brake(&self) {
        self.record(MotorAction::Brake);
    }

    async fn hold(&self) {
        self.record(MotorAction::Hold);
    }
}

/// Simulated touch sensor with externally settable state.
#[derive(Clone, Default)]
pub struct SimTouchSensor {
    state: Arc<AtomicBool>,
}

impl SimTouchSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.state.store(pressed, Ordering::Release);
    }
}

#[async_trait]
impl TouchSensor for SimTouchSensor {
    async fn pressed(&self) -> bool {
        self.state.load(Ordering::Acquire)
    }
}

/// Simulated button pad with an externally settable pressed set.
#[derive(Clone, Default)]
pub struct SimButtonPad {
    down: Arc<Mutex<HashSet<BrickButton>>>,
}

impl SimButtonPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of currently held buttons.
    pub fn set_pressed(&self, buttons: &[BrickButton]) {
        let mut down = self.down.lock().unwrap();
        down.clear();
        down.extend(buttons.iter().copied());
    }
}

#[async_trait]
impl ButtonPad for SimButtonPad {
    async fn pressed(&self) -> Vec<BrickButton> {
        self.down.lock().unwrap().iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sim_motor_records_actions() {
        let motor = SimMotor::new("A");
        motor.run(200).await;
        assert_eq!(motor.last_action(), Some(MotorAction::Run { speed: 200 }));

        motor.hold().await;
        assert_eq!(motor.last_action(), Some(MotorAction::Hold));
    }

    #[tokio::test]
    async fn test_sim_touch_sensor_state() {
        let sensor = SimTouchSensor::new();
        assert!(!sensor.pressed().await);
        sensor.set_pressed(true);
        assert!(sensor.pressed().await);
    }

    #[tokio::test]
    async fn test_sim_button_pad_state() {
        let pad = SimButtonPad::new();
        assert!(pad.pressed().await.is_empty());

        pad.set_pressed(&[BrickButton::Up, BrickButton::Center]);
        let down = pad.pressed().await;
        assert_eq!(down.len(), 2);
        assert!(down.contains(&BrickButton::Up));
        assert!(down.contains(&BrickButton::Center));
    }
}
