use assign_resources::assign_resources;
pub use embassy_rp::i2c;
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals;
use embassy_rp::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;

/// Sensor bus shared between the two transducer drivers.
pub type SensorBus = Mutex<NoopRawMutex, I2c<'static, I2C1, i2c::Async>>;

assign_resources! {
    inputs: InputResources {
        button: PIN_17,
    },
    outputs: OutputResources {
        led: PIN_16,
    },
    sensor_i2c: SensorI2cResources {
        i2c: I2C1,
        sda: PIN_14,
        scl: PIN_15,
    },
    display: DisplayResources {
        spi: SPI0,
        clk: PIN_18,
        mosi: PIN_19,
        cs: PIN_20,
        dc: PIN_21,
        rst: PIN_22,
    },
}
