//! Worker primitives shared by the scratchpad panel engine.
//!
//! Transform evaluations are spawned through [`spawn`] so they inherit the
//! active Tokio runtime (or a lazily built fallback), tagged with a
//! [`TaskClass`] for tracing. Each evaluation draws a sequence number from a
//! [`GenerationClock`]; completions older than the last applied sequence are
//! discarded by the caller. [`InFlightGate`] tracks outstanding evaluations so
//! hosts and tests can wait for a panel to settle.

mod class;
mod gate;
mod panic;
mod spawn;
mod token;

pub use class::TaskClass;
pub use gate::{InFlightGate, InFlightGuard};
pub use panic::join_error_panic_message;
pub use spawn::spawn;
pub use token::{GenerationClock, RetireToken};
