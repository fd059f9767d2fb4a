//! Decoding of verified frames into physical measurements.
//!
//! The frame layout is fixed by the instrument firmware. All multi-byte
//! fields are big-endian:
//!
//! | field       | bytes    | scale        |
//! |-------------|----------|--------------|
//! | voltage     | 5..7     | raw x 0.1 V  |
//! | current     | 8..10    | raw x 1 mA   |
//! | temperature | 25       | raw units    |
//! | hours       | 26..28   | -            |
//! | minutes     | 28       | -            |
//! | seconds     | 29       | -            |
//!
//! `decode` is a pure function with no failure path: the synchronizer only
//! hands it frames whose length and start marker are already verified.

use crate::instrument::framing::RawFrame;
use std::time::Duration;

const VOLTAGE_OFFSET: usize = 5;
const CURRENT_OFFSET: usize = 8;
const TEMPERATURE_OFFSET: usize = 25;
const HOURS_OFFSET: usize = 26;
const MINUTES_OFFSET: usize = 28;
const SECONDS_OFFSET: usize = 29;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One decoded observation.
///
/// `elapsed` is the instrument's own run counter (hours/minutes/seconds
/// since its epoch), not wall-clock time. The chart and the stored `time`
/// series use [`Sample::day_fraction`], the fractional-days form of the same
/// value, so a date axis can render it directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed: Duration,
    /// Volts, 0.1 V resolution.
    pub voltage: f64,
    /// Amps, 1 mA resolution.
    pub current: f64,
    /// Watts, derived as voltage x current at decode time. The instrument
    /// does not transmit power directly.
    pub power: f64,
    /// Raw instrument units, unscaled.
    pub temperature: u8,
}

impl Sample {
    /// Elapsed time as fractional days since the instrument epoch.
    pub fn day_fraction(&self) -> f64 {
        self.elapsed.as_secs_f64() / SECONDS_PER_DAY
    }
}

/// Decode a verified 32-byte frame. Deterministic and pure.
pub fn decode(frame: &RawFrame) -> Sample {
    let raw = frame.as_bytes();

    let voltage = f64::from(u16::from_be_bytes([
        raw[VOLTAGE_OFFSET],
        raw[VOLTAGE_OFFSET + 1],
    ])) * 1e-1;
    let current = f64::from(u16::from_be_bytes([
        raw[CURRENT_OFFSET],
        raw[CURRENT_OFFSET + 1],
    ])) * 1e-3;

    let hours = u64::from(u16::from_be_bytes([
        raw[HOURS_OFFSET],
        raw[HOURS_OFFSET + 1],
    ]));
    let minutes = u64::from(raw[MINUTES_OFFSET]);
    let seconds = u64::from(raw[SECONDS_OFFSET]);

    Sample {
        elapsed: Duration::from_secs(hours * 3600 + minutes * 60 + seconds),
        voltage,
        current,
        power: voltage * current,
        temperature: raw[TEMPERATURE_OFFSET],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::framing::{FrameSynchronizer, FRAME_LEN, START_MARKER};

    /// Build a frame directly from field values.
    fn build_frame(voltage_raw: u16, current_raw: u16, temp: u8, h: u16, m: u8, s: u8) -> RawFrame {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = START_MARKER;
        bytes[VOLTAGE_OFFSET..VOLTAGE_OFFSET + 2].copy_from_slice(&voltage_raw.to_be_bytes());
        bytes[CURRENT_OFFSET..CURRENT_OFFSET + 2].copy_from_slice(&current_raw.to_be_bytes());
        bytes[TEMPERATURE_OFFSET] = temp;
        bytes[HOURS_OFFSET..HOURS_OFFSET + 2].copy_from_slice(&h.to_be_bytes());
        bytes[MINUTES_OFFSET] = m;
        bytes[SECONDS_OFFSET] = s;

        let mut sync = FrameSynchronizer::new();
        sync.extend(&bytes);
        sync.next_frame().unwrap()
    }

    #[test]
    fn decodes_known_frame() {
        // voltage 0x0064 = 100 -> 10.0 V, current 0x0001 -> 0.001 A,
        // temperature 0x19 -> 25, elapsed 5 s.
        let frame = build_frame(0x0064, 0x0001, 0x19, 0, 0, 5);
        let sample = decode(&frame);

        assert_eq!(sample.voltage, 10.0);
        assert_eq!(sample.current, 0.001);
        assert_eq!(sample.power, 0.01);
        assert_eq!(sample.temperature, 25);
        assert_eq!(sample.elapsed, Duration::from_secs(5));
        assert_eq!(sample.day_fraction(), 5.0 / 86_400.0);
    }

    #[test]
    fn decode_is_deterministic() {
        let frame = build_frame(0x04D2, 0x0F00, 42, 1, 30, 15);
        assert_eq!(decode(&frame), decode(&frame));
    }

    #[test]
    fn elapsed_combines_hours_minutes_seconds() {
        let frame = build_frame(0, 0, 0, 2, 3, 4);
        let sample = decode(&frame);
        assert_eq!(sample.elapsed, Duration::from_secs(2 * 3600 + 3 * 60 + 4));
    }

    #[test]
    fn hours_field_is_two_bytes() {
        // 0x0101 = 257 hours exercises the high byte.
        let frame = build_frame(0, 0, 0, 0x0101, 0, 0);
        let sample = decode(&frame);
        assert_eq!(sample.elapsed, Duration::from_secs(257 * 3600));
    }

    #[test]
    fn power_is_voltage_times_current() {
        let frame = build_frame(120, 2500, 0, 0, 0, 1); // 12.0 V, 2.5 A
        let sample = decode(&frame);
        assert!((sample.power - 30.0).abs() < 1e-12);
    }
}
