//! Cross-task monitor state.
//!
//! The screen selector and the two sensor snapshots are plain atomic words
//! with relaxed ordering. The sampling task is the only writer and the
//! render task the only reader; a reader may observe a value at most one
//! sampling period old, never an uninitialized one. Each word is atomic, so
//! no garbage value is ever seen, but the pressure/temperature pair of one
//! snapshot may mix an old and a new word. The display tolerates this since
//! the fields are shown independently.
//!
//! The rendering surface itself is NOT covered here; it is guarded by
//! [`crate::display::SharedDisplay`].

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

/// One sampled reading from a sensor, in raw units (Pa, °C).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    pub pressure_pa: f32,
    pub temperature_c: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorId {
    Primary,
    Secondary,
}

/// The three user-selectable screens, cycled by the push-button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Screen {
    Psi = 0,
    Bar = 1,
    About = 2,
}

impl Screen {
    pub const COUNT: u8 = 3;

    pub fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => Screen::Psi,
            1 => Screen::Bar,
            _ => Screen::About,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Display units for this screen; `None` for the static About screen.
    pub fn unit_mode(self) -> Option<UnitMode> {
        match self {
            Screen::Psi => Some(UnitMode::PsiCelsius),
            Screen::Bar => Some(UnitMode::BarFahrenheit),
            Screen::About => None,
        }
    }
}

/// Units for a measurement screen, fixed by the screen selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMode {
    PsiCelsius,
    BarFahrenheit,
}

struct SnapshotCell {
    pressure_bits: AtomicU32,
    temperature_bits: AtomicU32,
}

impl SnapshotCell {
    const fn new() -> Self {
        // 0 is the bit pattern of 0.0 for both fields.
        Self {
            pressure_bits: AtomicU32::new(0),
            temperature_bits: AtomicU32::new(0),
        }
    }

    fn store(&self, snapshot: SensorSnapshot) {
        self.pressure_bits
            .store(snapshot.pressure_pa.to_bits(), Ordering::Relaxed);
        self.temperature_bits
            .store(snapshot.temperature_c.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> SensorSnapshot {
        SensorSnapshot {
            pressure_pa: f32::from_bits(self.pressure_bits.load(Ordering::Relaxed)),
            temperature_c: f32::from_bits(self.temperature_bits.load(Ordering::Relaxed)),
        }
    }
}

pub struct MonitorState {
    screen: AtomicU8,
    primary: SnapshotCell,
    secondary: SnapshotCell,
}

impl MonitorState {
    pub const fn new() -> Self {
        Self {
            screen: AtomicU8::new(0),
            primary: SnapshotCell::new(),
            secondary: SnapshotCell::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::from_index(self.screen.load(Ordering::Relaxed))
    }

    pub fn set_screen(&self, screen: Screen) {
        self.screen.store(screen.index(), Ordering::Relaxed);
    }

    /// Advance to the next screen and return it. Only the sampling task
    /// writes the selector, so load-then-store is race-free.
    pub fn advance_screen(&self) -> Screen {
        let next = self.screen().next();
        self.set_screen(next);
        next
    }

    pub fn set_snapshot(&self, id: SensorId, snapshot: SensorSnapshot) {
        self.cell(id).store(snapshot);
    }

    pub fn snapshot(&self, id: SensorId) -> SensorSnapshot {
        self.cell(id).load()
    }

    fn cell(&self, id: SensorId) -> &SnapshotCell {
        match id {
            SensorId::Primary => &self.primary,
            SensorId::Secondary => &self.secondary,
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
