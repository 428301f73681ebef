// src/common/timing.rs

use core::time::Duration;

// All delays are issued through `DelayNs::delay_ms`, so they are kept at
// millisecond resolution.

// === Poll cadence ===

/// Pause at the end of every poll cycle, whether or not data was printed.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

// === Mode negotiation ===

/// Pause between two unacknowledged mode-change requests.
pub const MODE_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Pause after a confirmed mode change before the first poll.
pub const MODE_SETTLE_DELAY: Duration = Duration::from_secs(1);
/// Ceiling for the doubling pause of a bounded retry policy.
pub const MODE_RETRY_DELAY_MAX: Duration = Duration::from_secs(8);

// === UART binding ===

/// The module's fixed UART rate.
pub const UART_BAUD: u32 = 9600;

/// Converts a delay to the millisecond count `DelayNs::delay_ms` expects,
/// saturating instead of wrapping.
pub(crate) fn as_millis_u32(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}
