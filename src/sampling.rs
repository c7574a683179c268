//! Button handling and sensor polling.
//!
//! One task owns the push-button and both sensors: each cycle it edge-detects
//! the button, advances the screen selector on a debounced press, and polls
//! both sensors into the shared state. The loop never terminates; a poll
//! fault is logged and the stale snapshot retained.

use embassy_time::{Duration, Instant, Ticker};

use crate::button::{ButtonInput, EdgeDetector};
use crate::log::*;
use crate::sensor::PressureSensor;
use crate::state::{MonitorState, SensorId};
use crate::{DEBOUNCE_MILLIS, SAMPLE_PERIOD_MILLIS};

pub struct Sampler<'a, B, P, S> {
    button: B,
    primary: P,
    secondary: S,
    state: &'a MonitorState,
    edge: EdgeDetector,
    holdoff_until: Option<Instant>,
}

impl<'a, B, P, S> Sampler<'a, B, P, S>
where
    B: ButtonInput,
    P: PressureSensor,
    S: PressureSensor,
{
    pub fn new(button: B, primary: P, secondary: S, state: &'a MonitorState) -> Self {
        Self {
            button,
            primary,
            secondary,
            state,
            edge: EdgeDetector::new(),
            holdoff_until: None,
        }
    }

    pub async fn run(mut self) -> ! {
        let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MILLIS));
        loop {
            self.cycle(Instant::now()).await;
            ticker.next().await;
        }
    }

    /// One sampling cycle: edge-detect the button, then poll both sensors.
    pub async fn cycle(&mut self, now: Instant) {
        let edge = self.edge.update(self.button.is_pressed());
        let held_off = self.holdoff_until.is_some_and(|until| now < until);
        if edge && !held_off {
            let screen = self.state.advance_screen();
            info!("switching to screen {}", screen.index());
            self.holdoff_until = Some(now + Duration::from_millis(DEBOUNCE_MILLIS));
        }

        // The debounce hold gates only edge handling; polling never pauses.
        match self.primary.poll().await {
            Ok(snapshot) => self.state.set_snapshot(SensorId::Primary, snapshot),
            Err(e) => warn!("primary sensor poll failed: {}", e.describe()),
        }
        match self.secondary.poll().await {
            Ok(snapshot) => self.state.set_snapshot(SensorId::Secondary, snapshot),
            Err(e) => warn!("secondary sensor poll failed: {}", e.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_time::Instant;

    use super::*;
    use crate::sensor::PollError;
    use crate::state::{Screen, SensorSnapshot};

    struct Script {
        levels: &'static [bool],
        at: usize,
    }

    impl ButtonInput for Script {
        fn is_pressed(&mut self) -> bool {
            let level = *self.levels.get(self.at).unwrap_or(&false);
            self.at += 1;
            level
        }
    }

    /// Pressed on every other sample, starting pressed.
    #[derive(Default)]
    struct BouncyButton {
        calls: usize,
    }

    impl ButtonInput for BouncyButton {
        fn is_pressed(&mut self) -> bool {
            self.calls += 1;
            self.calls % 2 == 1
        }
    }

    struct HeldButton;

    impl ButtonInput for HeldButton {
        fn is_pressed(&mut self) -> bool {
            true
        }
    }

    struct FixedSensor {
        reading: SensorSnapshot,
        polls: usize,
    }

    impl FixedSensor {
        fn new(pressure_pa: f32, temperature_c: f32) -> Self {
            Self {
                reading: SensorSnapshot {
                    pressure_pa,
                    temperature_c,
                },
                polls: 0,
            }
        }
    }

    impl PressureSensor for &mut FixedSensor {
        async fn poll(&mut self) -> Result<SensorSnapshot, PollError> {
            self.polls += 1;
            Ok(self.reading)
        }
    }

    /// Answers once, then fails every poll after that.
    struct FlakySensor {
        first: SensorSnapshot,
        polls: usize,
    }

    impl PressureSensor for &mut FlakySensor {
        async fn poll(&mut self) -> Result<SensorSnapshot, PollError> {
            self.polls += 1;
            if self.polls == 1 {
                Ok(self.first)
            } else {
                Err(PollError::Bus)
            }
        }
    }

    fn cycle_at<B, P, S>(sampler: &mut Sampler<'_, B, P, S>, millis: u64)
    where
        B: ButtonInput,
        P: PressureSensor,
        S: PressureSensor,
    {
        block_on(sampler.cycle(Instant::from_millis(millis)));
    }

    #[test]
    fn press_edge_advances_screen_once() {
        let state = MonitorState::new();
        let mut primary = FixedSensor::new(250_000.0, 30.0);
        let mut secondary = FixedSensor::new(101_325.0, 24.0);
        let button = Script {
            levels: &[false, true, true, false, false],
            at: 0,
        };
        let mut sampler = Sampler::new(button, &mut primary, &mut secondary, &state);
        for i in 0..5 {
            cycle_at(&mut sampler, i * 10);
        }
        drop(sampler);

        assert_eq!(state.screen(), Screen::Bar);
        assert_eq!(primary.polls, 5);
        assert_eq!(state.snapshot(SensorId::Primary).pressure_pa, 250_000.0);
        assert_eq!(state.snapshot(SensorId::Secondary).temperature_c, 24.0);
    }

    #[test]
    fn rapid_presses_advance_once_per_debounce_window() {
        let state = MonitorState::new();
        let mut primary = FixedSensor::new(250_000.0, 30.0);
        let mut secondary = FixedSensor::new(101_325.0, 24.0);
        let mut sampler = Sampler::new(
            BouncyButton::default(),
            &mut primary,
            &mut secondary,
            &state,
        );
        // 20 press edges within 400 ms.
        for i in 0..40 {
            cycle_at(&mut sampler, i * 10);
        }
        drop(sampler);

        // Only the edges at 0 ms and 200 ms get through the hold.
        assert_eq!(state.screen().index(), 2);
        // Polling never paused during the holds.
        assert_eq!(primary.polls, 40);
        assert_eq!(secondary.polls, 40);
    }

    #[test]
    fn held_button_is_a_single_press() {
        let state = MonitorState::new();
        let mut primary = FixedSensor::new(250_000.0, 30.0);
        let mut secondary = FixedSensor::new(101_325.0, 24.0);
        let mut sampler = Sampler::new(HeldButton, &mut primary, &mut secondary, &state);
        // Held well past the debounce hold.
        for i in 0..30 {
            cycle_at(&mut sampler, i * 10);
        }
        drop(sampler);

        assert_eq!(state.screen(), Screen::Bar);
    }

    #[test]
    fn poll_failure_retains_stale_snapshot() {
        let state = MonitorState::new();
        let first = SensorSnapshot {
            pressure_pa: 320_000.0,
            temperature_c: 41.0,
        };
        let mut primary = FlakySensor { first, polls: 0 };
        let mut secondary = FixedSensor::new(101_325.0, 24.0);
        let button = Script { levels: &[], at: 0 };
        let mut sampler = Sampler::new(button, &mut primary, &mut secondary, &state);
        for i in 0..4 {
            cycle_at(&mut sampler, i * 10);
        }
        drop(sampler);

        // The failed polls left the last good reading in place and the task
        // kept polling.
        assert_eq!(state.snapshot(SensorId::Primary), first);
        assert_eq!(primary.polls, 4);
    }
}
