//! The seven-series measurement store.
//!
//! `SeriesStore` holds the full run as seven named, ordered, equal-length
//! sequences: `time`, `voltage`, `current`, `power`, `capacity`, `energy`
//! and `temperature`. A successful append extends all seven atomically; a
//! rejected duplicate extends none. The store never shrinks during a run,
//! and `append` is its only mutator, so readers between ticks always see a
//! consistent shape.

use crate::error::{AppResult, WattscopeError};
use crate::instrument::decode::Sample;

/// Names of the stored series, in storage order. These are also the literal
/// keys used by the snapshot container.
pub const SERIES_NAMES: [&str; 7] = [
    "time",
    "voltage",
    "current",
    "power",
    "capacity",
    "energy",
    "temperature",
];

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Result of offering a sample to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// All seven series were extended by one element.
    Appended,
    /// The sample's timestamp equals the last stored one; nothing changed.
    /// This is the normal outcome of polling faster than the instrument's
    /// internal clock ticks, not an error.
    Duplicate,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeriesStore {
    time: Vec<f64>,
    voltage: Vec<f64>,
    current: Vec<f64>,
    power: Vec<f64>,
    capacity: Vec<f64>,
    energy: Vec<f64>,
    temperature: Vec<f64>,
    // Running integrals carried explicitly rather than read back from the
    // series tails, so the empty-store case needs no special indexing.
    capacity_total: f64,
    energy_total: f64,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from seven raw series, e.g. out of a snapshot.
    /// Rejects unequal lengths; re-seeds the capacity and energy
    /// accumulators from the loaded tails so later appends continue the
    /// integrals.
    pub fn from_series(
        time: Vec<f64>,
        voltage: Vec<f64>,
        current: Vec<f64>,
        power: Vec<f64>,
        capacity: Vec<f64>,
        energy: Vec<f64>,
        temperature: Vec<f64>,
    ) -> AppResult<Self> {
        let len = time.len();
        let all_equal = [
            voltage.len(),
            current.len(),
            power.len(),
            capacity.len(),
            energy.len(),
            temperature.len(),
        ]
        .iter()
        .all(|&l| l == len);

        if !all_equal {
            return Err(WattscopeError::MalformedSnapshot(format!(
                "series lengths differ (time has {len} elements)"
            )));
        }

        let capacity_total = capacity.last().copied().unwrap_or(0.0);
        let energy_total = energy.last().copied().unwrap_or(0.0);

        Ok(Self {
            time,
            voltage,
            current,
            power,
            capacity,
            energy,
            temperature,
            capacity_total,
            energy_total,
        })
    }

    /// Append one decoded sample to all seven series.
    ///
    /// Integration convention: capacity integrates *current*
    /// (`capacity += current / 3600`, ampere-hours) and energy integrates
    /// power (`energy += power / 3600`, watt-hours), assuming one-second
    /// sample spacing. This is the documented approximation; the spacing is
    /// the instrument's clock tick, which the duplicate check below pins to
    /// at most one sample per tick.
    pub fn append(&mut self, sample: &Sample) -> AppendOutcome {
        let t = sample.day_fraction();
        if self.time.last().is_some_and(|&last| last == t) {
            return AppendOutcome::Duplicate;
        }

        self.capacity_total += sample.current / SECONDS_PER_HOUR;
        self.energy_total += sample.power / SECONDS_PER_HOUR;

        self.time.push(t);
        self.voltage.push(sample.voltage);
        self.current.push(sample.current);
        self.power.push(sample.power);
        self.capacity.push(self.capacity_total);
        self.energy.push(self.energy_total);
        self.temperature.push(f64::from(sample.temperature));

        AppendOutcome::Appended
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Timestamps as fractional days since the instrument epoch.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Accumulated capacity in ampere-hours.
    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }

    /// Accumulated energy in watt-hours.
    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(secs: u64, voltage: f64, current: f64) -> Sample {
        Sample {
            elapsed: Duration::from_secs(secs),
            voltage,
            current,
            power: voltage * current,
            temperature: 25,
        }
    }

    fn lengths(store: &SeriesStore) -> [usize; 7] {
        [
            store.time().len(),
            store.voltage().len(),
            store.current().len(),
            store.power().len(),
            store.capacity().len(),
            store.energy().len(),
            store.temperature().len(),
        ]
    }

    #[test]
    fn all_series_stay_equal_length() {
        let mut store = SeriesStore::new();
        for i in 1..=5u64 {
            store.append(&sample(i, 12.0, 0.5));
            assert_eq!(lengths(&store), [i as usize; 7]);
        }
    }

    #[test]
    fn duplicate_timestamp_changes_nothing() {
        let mut store = SeriesStore::new();
        assert_eq!(store.append(&sample(5, 10.0, 0.001)), AppendOutcome::Appended);
        let before = store.clone();

        assert_eq!(
            store.append(&sample(5, 11.0, 0.002)),
            AppendOutcome::Duplicate
        );
        assert_eq!(store, before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn capacity_integrates_current() {
        let mut store = SeriesStore::new();
        store.append(&sample(1, 12.0, 0.6));
        store.append(&sample(2, 12.0, 1.2));
        store.append(&sample(3, 12.0, 0.3));

        let capacity = store.capacity();
        let current = store.current();
        assert_eq!(capacity[0], current[0] / 3600.0);
        for n in 1..store.len() {
            let delta = capacity[n] - capacity[n - 1];
            assert!((delta - current[n] / 3600.0).abs() < 1e-12);
        }
    }

    #[test]
    fn energy_integrates_power() {
        let mut store = SeriesStore::new();
        store.append(&sample(1, 12.0, 0.5));
        store.append(&sample(2, 11.5, 0.5));

        let energy = store.energy();
        let power = store.power();
        assert_eq!(energy[0], power[0] / 3600.0);
        let delta = energy[1] - energy[0];
        assert!((delta - power[1] / 3600.0).abs() < 1e-12);
    }

    #[test]
    fn from_series_rejects_unequal_lengths() {
        let result = SeriesStore::from_series(
            vec![1.0, 2.0],
            vec![12.0, 12.0],
            vec![0.5],
            vec![6.0, 6.0],
            vec![0.1, 0.2],
            vec![1.0, 2.0],
            vec![25.0, 25.0],
        );
        assert!(matches!(
            result,
            Err(crate::error::WattscopeError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn accumulators_resume_from_loaded_tails() {
        let store = SeriesStore::from_series(
            vec![1.0 / 86_400.0],
            vec![12.0],
            vec![3600.0],
            vec![43_200.0],
            vec![1.0],
            vec![12.0],
            vec![25.0],
        )
        .unwrap();

        let mut store = store;
        // 3600 A for one second adds exactly 1 Ah on top of the loaded 1.0.
        store.append(&sample(2, 12.0, 3600.0));
        assert!((store.capacity()[1] - 2.0).abs() < 1e-9);
        assert!((store.energy()[1] - 24.0).abs() < 1e-9);
    }

    #[test]
    fn empty_store_starts_integrals_at_zero_prior() {
        let mut store = SeriesStore::new();
        store.append(&sample(1, 10.0, 7.2));
        assert!((store.capacity()[0] - 7.2 / 3600.0).abs() < 1e-12);
        assert!((store.energy()[0] - 72.0 / 3600.0).abs() < 1e-12);
    }
}
