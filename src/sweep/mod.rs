//! The sweep-line implementation.
//!
//! The main entry point is [`Sweeper`], which takes disk centers in order of
//! increasing `x` and reports the pieces of the union's boundary as soon as
//! they are final. [`sweep`] runs a whole sweep in one call.

mod circles;
mod crossings;
mod observer;
mod output_event;
mod sweep_line;

pub use observer::{Observer, Tally};
pub use output_event::BoundaryEvent;
pub use sweep_line::{sweep, LifecycleViolation, Policy, Sweeper};
