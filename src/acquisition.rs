//! The per-tick acquisition pipeline.
//!
//! One cooperative loop drives everything: each tick drains whatever bytes
//! the transport has buffered, feeds them through the frame synchronizer,
//! decodes every complete frame and appends the samples to the series store.
//! Rendering is deliberately not part of this module; the GUI calls
//! [`Acquisition::tick`] and then reads the store by reference, per the
//! core's "produce updated series" contract.
//!
//! State machine per frame: awaiting sync -> awaiting full frame -> decode
//! -> accepted or duplicate-discarded -> awaiting sync. There is no terminal
//! state except external shutdown, at which point [`Acquisition::finish`]
//! writes the final snapshot.

use crate::data::series::{AppendOutcome, SeriesStore};
use crate::data::snapshot::Snapshotter;
use crate::error::AppResult;
use crate::instrument::byte_source::ByteSource;
use crate::instrument::decode;
use crate::instrument::framing::FrameSynchronizer;
use log::{debug, warn};

/// What one tick accomplished. Duplicates are counted purely for rate
/// diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub accepted: usize,
    pub duplicates: usize,
}

pub struct Acquisition {
    source: Box<dyn ByteSource>,
    synchronizer: FrameSynchronizer,
    store: SeriesStore,
    snapshotter: Snapshotter,
    snapshot_every: u64,
    accepted: u64,
    duplicates: u64,
    scratch: Vec<u8>,
}

impl Acquisition {
    /// `store` may be pre-populated from a snapshot; live decoding simply
    /// continues appending to it.
    pub fn new(
        source: Box<dyn ByteSource>,
        store: SeriesStore,
        snapshotter: Snapshotter,
        snapshot_every: u64,
    ) -> Self {
        Self {
            source,
            synchronizer: FrameSynchronizer::new(),
            store,
            snapshotter,
            snapshot_every,
            accepted: 0,
            duplicates: 0,
            scratch: Vec::new(),
        }
    }

    /// The series store, for the visualization consumer. Read-only: the
    /// consumer must not assume immutability across ticks.
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Samples accepted this run (excludes preloaded data).
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Duplicate samples discarded this run.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Run one acquisition cycle: drain, synchronize, decode, append.
    /// Never blocks waiting for bytes. Returns what changed so callers can
    /// decide whether a redraw is worthwhile.
    pub fn tick(&mut self) -> AppResult<TickReport> {
        self.scratch.clear();
        self.source.drain(&mut self.scratch)?;
        self.synchronizer.extend(&self.scratch);

        let mut report = TickReport::default();
        while let Some(frame) = self.synchronizer.next_frame() {
            let sample = decode::decode(&frame);
            match self.store.append(&sample) {
                AppendOutcome::Appended => {
                    report.accepted += 1;
                    self.accepted += 1;
                    if self.snapshot_every > 0 && self.accepted % self.snapshot_every == 0 {
                        self.write_snapshot();
                    }
                }
                AppendOutcome::Duplicate => {
                    report.duplicates += 1;
                    self.duplicates += 1;
                    debug!(
                        "Discarded duplicate sample at t={:?} ({} so far)",
                        sample.elapsed, self.duplicates
                    );
                }
            }
        }

        Ok(report)
    }

    /// Take the shutdown snapshot. Called once when the run ends.
    pub fn finish(&self) {
        self.write_snapshot();
    }

    fn write_snapshot(&self) {
        if let Err(err) = self.snapshotter.snapshot(&self.store) {
            warn!(
                "Failed to write snapshot to '{}': {} (run continues)",
                self.snapshotter.path().display(),
                err
            );
        }
    }
}
