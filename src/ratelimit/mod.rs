//! Per-client admission control in front of the scoring routes.
//!
//! A counting sliding window: each client may make `limit` requests within any trailing
//! `window`. Rejected attempts are not recorded, so a client that keeps retrying is
//! admitted again as soon as its oldest admission ages out.

pub mod clock;
pub mod error;
pub mod identity;
pub mod limiter;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RateLimitError;
pub use identity::{UNKNOWN_CLIENT, client_identity};
pub use limiter::{Admission, SlidingWindowLimiter};
