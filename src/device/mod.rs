//! Device capability traits for pluggable hardware backends
//!
//! The bridge core never talks to vendor hardware directly. Motors, touch
//! sensors and the brick button pad are reached through these traits, and
//! the port layout is fixed at startup in a [`DeviceBindings`] table.

pub mod sim;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// How a motor ceases motion once a timed or angle run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAction {
    /// Let the motor spin freely; friction brings it to rest.
    Coast,
    /// Passive braking through the generated voltage.
    Brake,
    /// Actively hold the motor at its current angle.
    Hold,
}

impl StopAction {
    /// Parse a wire-level stop mode name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "COAST" => Some(Self::Coast),
            "BRAKE" => Some(Self::Brake),
            "HOLD" => Some(Self::Hold),
            _ => None,
        }
    }
}

/// A physical button on the brick face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickButton {
    Up,
    Down,
    Left,
    Right,
    Center,
}

impl BrickButton {
    /// Parse a wire-level button name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UP" => Some(Self::Up),
            "DOWN" => Some(Self::Down),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "CENTER" => Some(Self::Center),
            _ => None,
        }
    }
}

/// A motor attached to an output port.
#[async_trait]
pub trait Motor: Send + Sync {
    /// Run at a constant speed indefinitely.
    async fn run(&self, speed: i32);

    /// Run at a constant speed by a given angle, then apply `stop`.
    /// `wait` runs the rotation to completion before returning.
    async fn run_angle(&self, speed: i32, angle: i32, stop: StopAction, wait: bool);

    /// Run at a constant speed for a given time in milliseconds, then
    /// apply `stop`. `wait` runs the motion to completion before returning.
    async fn run_time(&self, speed: i32, duration_ms: i32, stop: StopAction, wait: bool);

    /// Stop and let the motor coast freely.
    async fn stop(&self);

    /// Passively brake the motor.
    async fn brake(&self);

    /// Stop and actively hold the current angle.
    async fn hold(&self);
}

/// A touch sensor attached to an input port.
#[async_trait]
pub trait TouchSensor: Send + Sync {
    /// Whether the sensor is currently pressed.
    async fn pressed(&self) -> bool;
}

/// The brick's face buttons, read as a set.
#[async_trait]
pub trait ButtonPad: Send + Sync {
    /// The set of buttons currently held down.
    async fn pressed(&self) -> Vec<BrickButton>;
}

/// Port layout fixed at startup. A key that maps to `None` is a known
/// port with nothing attached; a missing key is not a valid port at all.
/// Read-only after construction, so it is shared without locking.
pub struct DeviceBindings {
    motors: HashMap<String, Option<Arc<dyn Motor>>>,
    sensors: HashMap<String, Option<Arc<dyn TouchSensor>>>,
    buttons: Arc<dyn ButtonPad>,
}

impl DeviceBindings {
    pub fn new(
        motors: HashMap<String, Option<Arc<dyn Motor>>>,
        sensors: HashMap<String, Option<Arc<dyn TouchSensor>>>,
        buttons: Arc<dyn ButtonPad>,
    ) -> Self {
        Self {
            motors,
            sensors,
            buttons,
        }
    }

    /// Look up a motor port. `None` means the port name is unknown;
    /// `Some(None)` means the port exists but no motor is attached.
    pub fn motor(&self, port: &str) -> Option<Option<&Arc<dyn Motor>>> {
        self.motors.get(port).map(|slot| slot.as_ref())
    }

    /// Look up a sensor port, with the same two-level semantics as
    /// [`DeviceBindings::motor`].
    pub fn touch_sensor(&self, port: &str) -> Option<Option<&Arc<dyn TouchSensor>>> {
        self.sensors.get(port).map(|slot| slot.as_ref())
    }

    pub fn buttons(&self) -> &Arc<dyn ButtonPad> {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_action_names() {
        assert_eq!(StopAction::from_name("HOLD"), Some(StopAction::Hold));
        assert_eq!(StopAction::from_name("COAST"), Some(StopAction::Coast));
        assert_eq!(StopAction::from_name("BRAKE"), Some(StopAction::Brake));
        assert_eq!(StopAction::from_name("hold"), None);
        assert_eq!(StopAction::from_name("STOP"), None);
    }

    #[test]
    fn test_brick_button_names() {
        assert_eq!(BrickButton::from_name("CENTER"), Some(BrickButton::Center));
        assert_eq!(BrickButton::from_name("UP"), Some(BrickButton::Up));
        assert_eq!(BrickButton::from_name("up"), None);
        assert_eq!(BrickButton::from_name("ENTER"), None);
    }
}
