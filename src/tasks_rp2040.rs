//! Task wrappers for the RP2040 firmware.

use display_interface_spi::SPIInterface;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use mipidsi::models::ST7789;

use crate::bmp280::{self, Bmp280};
use crate::display::SharedDisplay;
use crate::heartbeat::Heartbeat;
use crate::inputs_rp2040::PushButton;
use crate::render;
use crate::resources_rp2040::SensorBus;
use crate::sampling::Sampler;
use crate::smp3011::Smp3011;
use crate::state::MonitorState;

pub type DisplaySpi =
    SpiDevice<'static, NoopRawMutex, Spi<'static, SPI0, Blocking>, Output<'static>>;
pub type DisplayType =
    mipidsi::Display<SPIInterface<DisplaySpi, Output<'static>>, ST7789, Output<'static>>;

#[embassy_executor::task]
pub async fn heartbeat_task(led: Output<'static>) {
    Heartbeat::new(led).run().await.unwrap();
}

#[embassy_executor::task]
pub async fn sampler_task(
    bus: &'static SensorBus,
    button: PushButton,
    state: &'static MonitorState,
) {
    let mut primary = Smp3011::new(I2cDevice::new(bus));
    primary.init().await.unwrap();
    let mut secondary = Bmp280::new(I2cDevice::new(bus), bmp280::ADDR_PRIMARY);
    secondary.init().await.unwrap();
    Sampler::new(button, primary, secondary, state).run().await
}

#[embassy_executor::task]
pub async fn render_task(
    display: &'static SharedDisplay<DisplayType>,
    state: &'static MonitorState,
) {
    render::run(display, state).await.unwrap();
}
