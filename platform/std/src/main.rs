use embassy_executor::Spawner;
use embedded_graphics::geometry::Size;
use pressure_monitor::display::{NullDisplay, SharedDisplay};
use pressure_monitor::tasks::{heartbeat_task, render_task, sampler_task};
use pressure_monitor::MONITOR;
use static_cell::StaticCell;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp_nanos()
        .init();

    static DISPLAY: StaticCell<SharedDisplay<NullDisplay>> = StaticCell::new();
    let display = DISPLAY.init(SharedDisplay::new(NullDisplay::new(Size::new(240, 240))));

    spawner.spawn(heartbeat_task()).unwrap();
    spawner.spawn(sampler_task(&MONITOR)).unwrap();
    spawner.spawn(render_task(display, &MONITOR)).unwrap();
}
