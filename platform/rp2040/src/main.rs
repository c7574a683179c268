#![no_std]
#![no_main]

use core::cell::RefCell;

use display_interface_spi::SPIInterface;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config, I2c, InterruptHandler};
use embassy_rp::peripherals::{I2C1, SPI0};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::NoopMutex;
use embassy_sync::mutex::Mutex;
use mipidsi::options::ColorInversion;
use mipidsi::{models::ST7789, Builder};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use pressure_monitor::display::SharedDisplay;
use pressure_monitor::inputs::PushButton;
use pressure_monitor::tasks::{heartbeat_task, render_task, sampler_task, DisplayType};
use pressure_monitor::{
    split_resources, AssignedResources, DisplayResources, InputResources, OutputResources,
    SensorBus, SensorI2cResources, MONITOR,
};

bind_interrupts!(struct Irqs {
    I2C1_IRQ => InterruptHandler<I2C1>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    // Shared I2C bus for both sensors
    let i2c = I2c::new_async(
        r.sensor_i2c.i2c,
        r.sensor_i2c.scl,
        r.sensor_i2c.sda,
        Irqs,
        Config::default(),
    );
    static SENSOR_BUS: StaticCell<SensorBus> = StaticCell::new();
    let sensor_bus = SENSOR_BUS.init(Mutex::new(i2c));

    // Display over SPI
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 32_000_000;
    let spi = Spi::new_blocking_txonly(r.display.spi, r.display.clk, r.display.mosi, spi_config);
    static SPI_BUS: StaticCell<NoopMutex<RefCell<Spi<'static, SPI0, spi::Blocking>>>> =
        StaticCell::new();
    let spi_bus = SPI_BUS.init(NoopMutex::new(RefCell::new(spi)));
    let spi_device = SpiDevice::new(spi_bus, Output::new(r.display.cs, Level::High));
    let di = SPIInterface::new(spi_device, Output::new(r.display.dc, Level::Low));
    let surface = Builder::new(ST7789, di)
        .reset_pin(Output::new(r.display.rst, Level::High))
        .display_size(240, 240)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .unwrap();
    static DISPLAY: StaticCell<SharedDisplay<DisplayType>> = StaticCell::new();
    let display = DISPLAY.init(SharedDisplay::new(surface));

    let button = PushButton::new(Input::new(r.inputs.button, Pull::Up));
    let led = Output::new(r.outputs.led, Level::Low);

    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(sampler_task(sensor_bus, button, &MONITOR)).unwrap();
    spawner.spawn(render_task(display, &MONITOR)).unwrap();
}
