#![no_std]

#[cfg(feature = "rp2040")]
pub use defmt as log;

#[cfg(feature = "std")]
pub use log;

pub mod bmp280;
pub mod button;
pub mod display;
pub mod heartbeat;
pub mod render;
pub mod sampling;
pub mod sensor;
pub mod smp3011;
pub mod state;
pub mod units;

#[cfg(feature = "std")]
pub mod sensor_mock;

#[cfg(feature = "rp2040")]
pub mod inputs_rp2040;
#[cfg(feature = "rp2040")]
pub use inputs_rp2040 as inputs;

#[cfg(feature = "std")]
pub mod inputs_std;
#[cfg(feature = "std")]
pub use inputs_std as inputs;

#[cfg(feature = "std")]
pub mod outputs_std;
#[cfg(feature = "std")]
pub use outputs_std as outputs;

#[cfg(feature = "rp2040")]
pub mod resources_rp2040;
#[cfg(feature = "rp2040")]
pub use resources_rp2040 as resources;
#[cfg(feature = "rp2040")]
pub use resources_rp2040::*;

#[cfg(feature = "rp2040")]
pub mod tasks_rp2040;
#[cfg(feature = "rp2040")]
pub use tasks_rp2040 as tasks;

#[cfg(feature = "std")]
pub mod tasks_std;
#[cfg(feature = "std")]
pub use tasks_std as tasks;

pub use state::MonitorState;

pub static VERSION: &str = "v0.1";

/// Sampling cycle of the button/sensor task.
pub static SAMPLE_PERIOD_MILLIS: u64 = 10;
/// Redraw cycle of the render task.
pub static RENDER_PERIOD_MILLIS: u64 = 100;
/// Edge handling is suppressed for this long after a detected press.
pub static DEBOUNCE_MILLIS: u64 = 200;
/// Status LED half-period; one on/off pair takes twice this.
pub static HEARTBEAT_HALF_PERIOD_MILLIS: u64 = 500;

/// Cross-task monitor state, handed to each task at spawn. See
/// [`state::MonitorState`] for the consistency contract.
pub static MONITOR: MonitorState = MonitorState::new();
