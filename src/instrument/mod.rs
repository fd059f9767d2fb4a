//! Instrument communication: the serial byte source, frame synchronizer and
//! frame decoder for the power-measurement instrument.

pub mod byte_source;
pub mod decode;
pub mod framing;
pub mod mock;
