//! Display rendering: screen dispatch, unit formatting, and the render loop.

use core::fmt::Write as _;

use embassy_time::{Duration, Ticker};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::display::{DisplayFault, LabelSet, SharedDisplay, LABEL_CAPACITY};
use crate::log::*;
use crate::state::{MonitorState, Screen, SensorId, SensorSnapshot, UnitMode};
use crate::units;
use crate::{RENDER_PERIOD_MILLIS, VERSION};

const DEVICE_NAME: &str = "Pressure Monitor";
const SENSOR_PAIR: &str = "SMP3011 + BMP280";

pub fn format_pressure(mode: UnitMode, pascals: f32) -> String<LABEL_CAPACITY> {
    let mut text = String::new();
    let _ = match mode {
        UnitMode::PsiCelsius => write!(text, "{:6.2} PSI", units::pascals_to_psi(pascals)),
        UnitMode::BarFahrenheit => write!(text, "{:6.2} Bar", units::pascals_to_bar(pascals)),
    };
    text
}

pub fn format_temperature(mode: UnitMode, celsius: f32) -> String<LABEL_CAPACITY> {
    let mut text = String::new();
    let _ = match mode {
        UnitMode::PsiCelsius => write!(text, "{:6.2}C", celsius),
        UnitMode::BarFahrenheit => {
            write!(text, "{:6.2}F", units::celsius_to_fahrenheit(celsius))
        }
    };
    text
}

/// Fill the labels for one screen from the latest snapshots. Measurement
/// screens show the primary sensor on the top pair and the secondary sensor
/// below it, in the same units; the About screen is static text on all four
/// rows.
pub fn compose(
    labels: &mut LabelSet,
    screen: Screen,
    primary: SensorSnapshot,
    secondary: SensorSnapshot,
) {
    match screen.unit_mode() {
        Some(mode) => {
            labels
                .pressure
                .set_text(&format_pressure(mode, primary.pressure_pa));
            labels
                .temperature
                .set_text(&format_temperature(mode, primary.temperature_c));
            labels
                .pressure_alt
                .set_text(&format_pressure(mode, secondary.pressure_pa));
            labels
                .temperature_alt
                .set_text(&format_temperature(mode, secondary.temperature_c));
        }
        None => {
            let mut firmware: String<LABEL_CAPACITY> = String::new();
            let _ = write!(firmware, "Firmware {}", VERSION);
            labels.pressure.set_text(DEVICE_NAME);
            labels.temperature.set_text(&firmware);
            labels.pressure_alt.set_text(SENSOR_PAIR);
            labels.temperature_alt.set_text("");
        }
    }
}

/// Render loop: build the labels under the display lock, then redraw every
/// cycle from the shared state. Returns only on a fatal surface fault.
pub async fn run<D>(display: &SharedDisplay<D>, state: &MonitorState) -> Result<(), DisplayFault>
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut labels = display
        .with_lock(|surface| {
            let size = surface.bounding_box().size;
            surface.clear(Rgb565::BLACK).map(|_| LabelSet::new(size))
        })
        .await
        .map_err(|_| DisplayFault)?;

    let mut shown: Option<Screen> = None;
    let mut ticker = Ticker::every(Duration::from_millis(RENDER_PERIOD_MILLIS));
    loop {
        display
            .with_lock(|surface| {
                let screen = state.screen();
                let primary = state.snapshot(SensorId::Primary);
                let secondary = state.snapshot(SensorId::Secondary);
                if shown != Some(screen) {
                    info!("showing screen {}", screen.index());
                    shown = Some(screen);
                }
                compose(&mut labels, screen, primary, secondary);
                labels.draw(surface)
            })
            .await
            .map_err(|_| DisplayFault)?;
        ticker.next().await;
    }
}
