use ev3_bridge::device::sim::{SimButtonPad, SimMotor, SimTouchSensor};
use ev3_bridge::device::{DeviceBindings, Motor, TouchSensor};
use ev3_bridge::{ServerConfig, SessionSupervisor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "bridge starting");

    // Port layout of the brick this bridge fronts: motors on A, B and D
    // (C is wired but empty), one touch sensor on input 1.
    let mut motors: HashMap<String, Option<Arc<dyn Motor>>> = HashMap::new();
    motors.insert("A".into(), Some(Arc::new(SimMotor::new("A"))));
    motors.insert("B".into(), Some(Arc::new(SimMotor::new("B"))));
    motors.insert("C".into(), None);
    motors.insert("D".into(), Some(Arc::new(SimMotor::new("D"))));

    let mut sensors: HashMap<String, Option<Arc<dyn TouchSensor>>> = HashMap::new();
    sensors.insert("1".into(), Some(Arc::new(SimTouchSensor::new())));
    sensors.insert("2".into(), None);
    sensors.insert("3".into(), None);
    sensors.insert("4".into(), None);

    let bindings = Arc::new(DeviceBindings::new(
        motors,
        sensors,
        Arc::new(SimButtonPad::new()),
    ));

    SessionSupervisor::new(config, bindings).serve().await
}
