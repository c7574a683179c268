//! Display surface: the shared lock and the four-row label layout.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X13, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

/// Fatal display fault: the surface rejected a write. The display subsystem
/// cannot be reinitialized without supervisor intervention, so this is never
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFault;

/// Height of one label row in pixels.
pub const ROW_HEIGHT: u32 = 16;

pub const LABEL_CAPACITY: usize = 32;

/// The single mutual-exclusion point for the rendering surface. Everything
/// that draws goes through [`SharedDisplay::with_lock`]; the guard is
/// released on every exit path.
pub struct SharedDisplay<D> {
    surface: Mutex<CriticalSectionRawMutex, D>,
}

impl<D> SharedDisplay<D> {
    pub const fn new(surface: D) -> Self {
        Self {
            surface: Mutex::new(surface),
        }
    }

    pub async fn with_lock<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut surface = self.surface.lock().await;
        f(&mut surface)
    }
}

/// One text label anchored to a fixed row of the display.
pub struct Label {
    row: Rectangle,
    text: String<LABEL_CAPACITY>,
}

impl Label {
    fn new(row: Rectangle) -> Self {
        Self {
            row,
            text: String::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        let _ = self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&self, target: &mut D) -> Result<(), D::Error> {
        self.row
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(target)?;
        let character_style = MonoTextStyle::new(&FONT_6X13, Rgb565::WHITE);
        let text_style = TextStyleBuilder::new()
            .baseline(Baseline::Middle)
            .alignment(Alignment::Center)
            .build();
        Text::with_text_style(&self.text, self.row.center(), character_style, text_style)
            .draw(target)?;
        Ok(())
    }
}

/// The four labels of the monitor layout: primary pressure and temperature,
/// then the secondary sensor pair below them.
pub struct LabelSet {
    pub pressure: Label,
    pub temperature: Label,
    pub pressure_alt: Label,
    pub temperature_alt: Label,
}

impl LabelSet {
    pub fn new(size: Size) -> Self {
        let row = |index: u32| {
            Rectangle::new(
                Point::new(0, (index * ROW_HEIGHT) as i32),
                Size::new(size.width, ROW_HEIGHT),
            )
        };
        Self {
            pressure: Label::new(row(0)),
            temperature: Label::new(row(1)),
            pressure_alt: Label::new(row(2)),
            temperature_alt: Label::new(row(3)),
        }
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, target: &mut D) -> Result<(), D::Error> {
        self.pressure.draw(target)?;
        self.temperature.draw(target)?;
        self.pressure_alt.draw(target)?;
        self.temperature_alt.draw(target)?;
        Ok(())
    }
}

/// Draw target that accepts and discards every pixel. Stands in for the
/// panel in the host simulator and in tests.
pub struct NullDisplay {
    size: Size,
}

impl NullDisplay {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }
}

impl OriginDimensions for NullDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for NullDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for _ in pixels {}
        Ok(())
    }
}
