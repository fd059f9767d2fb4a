//! Data handling: the seven-series measurement store and snapshot
//! persistence.

pub mod series;
pub mod snapshot;
