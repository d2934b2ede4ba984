//! Host-side tools for the quadrant sensor boards.
//!
//! A quadrant board measures distance on four LIDAR channels and derives
//! elevation, pitch, roll and arc from them, along with discrete hit and swipe
//! events. It streams all of that over serial as one JSON [report] per line.
//!
//! This crate reads those streams and either shows them live (the `monitor`
//! binary, with a dashboard, a sample-rate jitter scope and a plain distance
//! plot) or, with two boards side by side, reduces them into a textual
//! [event stream] for a sound engine (the `triangulate` binary).
//!
//! [report]: telemetry::Report
//! [event stream]: engine_event::EngineEvent

#![warn(missing_docs)]
pub mod args;
pub mod channel_readout;
pub mod config;
pub mod dual_stream;
pub mod dummy_quadrant;
pub mod engine_event;
pub mod event_reducer;
pub mod gauge;
pub mod gui;
pub mod line_framer;
pub mod quadrant;
pub mod report_source;
pub mod sample_rate;
pub mod strip_chart;
pub mod telemetry;
pub mod triangulate;
pub mod views;
