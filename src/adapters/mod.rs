//! Adapters implementing the port traits.
//!
//! - `live`: real network, disk and clock.
//! - `recording`: wraps another adapter and captures every call to a cassette.
//! - `replaying`: serves recorded results back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
