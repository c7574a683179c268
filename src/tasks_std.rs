//! Task wrappers for the host simulator.

use crate::display::{NullDisplay, SharedDisplay};
use crate::heartbeat::Heartbeat;
use crate::inputs_std::SimButton;
use crate::outputs_std::SimLed;
use crate::render;
use crate::sampling::Sampler;
use crate::sensor_mock::MockPressureSensor;
use crate::state::MonitorState;

// Typical readings: a pressurized line on the primary transducer, ambient
// conditions on the secondary.
const PRIMARY_BASE_PA: f32 = 250_000.0;
const PRIMARY_BASE_C: f32 = 32.0;
const SECONDARY_BASE_PA: f32 = 101_325.0;
const SECONDARY_BASE_C: f32 = 24.0;

#[embassy_executor::task]
pub async fn heartbeat_task() {
    Heartbeat::new(SimLed).run().await.unwrap();
}

#[embassy_executor::task]
pub async fn sampler_task(state: &'static MonitorState) {
    let primary = MockPressureSensor::new(PRIMARY_BASE_PA, PRIMARY_BASE_C);
    let secondary = MockPressureSensor::new(SECONDARY_BASE_PA, SECONDARY_BASE_C);
    Sampler::new(SimButton::new(), primary, secondary, state)
        .run()
        .await
}

#[embassy_executor::task]
pub async fn render_task(
    display: &'static SharedDisplay<NullDisplay>,
    state: &'static MonitorState,
) {
    render::run(display, state).await.unwrap();
}
