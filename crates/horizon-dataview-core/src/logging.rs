//! Logging facilities for Horizon DataView.
//!
//! Horizon DataView uses the `tracing` crate for instrumentation. To see
//! logs, install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Each subsystem logs under its own target so directives like
//! `horizon_dataview::communicator=trace` can narrow the output to one
//! layer.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_dataview_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_dataview_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_dataview_core::property";
}
