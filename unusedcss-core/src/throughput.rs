//! Network throughput acquisition.
//!
//! The audit awaits a throughput estimate exactly once before running its
//! synchronous pipeline. Sources implement [`ThroughputSource`].

use async_trait::async_trait;

use crate::artifacts::NetworkTransferRecord;
use crate::error::{UnusedCssError, UnusedCssResult};

/// Estimated network throughput in bytes per second.
///
/// Always positive. Infinity means no transfer time was observed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Throughput(f64);

impl Throughput {
    pub fn new(bytes_per_second: f64) -> UnusedCssResult<Self> {
        if bytes_per_second.is_nan() || bytes_per_second <= 0.0 {
            return Err(UnusedCssError::throughput(format!(
                "throughput must be positive, got {}",
                bytes_per_second
            )));
        }
        Ok(Self(bytes_per_second))
    }

    pub const fn unbounded() -> Self {
        Self(f64::INFINITY)
    }

    pub fn bytes_per_second(self) -> f64 {
        self.0
    }

    /// Time to transfer `bytes`, coarsened to the nearest 10ms.
    pub fn transfer_ms(self, bytes: u64) -> u64 {
        ((bytes as f64 / self.0 * 100.0).round() as u64) * 10
    }
}

/// Supplies the throughput estimate for one audit.
#[async_trait]
pub trait ThroughputSource: Send + Sync {
    async fn network_throughput(&self) -> UnusedCssResult<Throughput>;
}

/// A preconfigured throughput.
#[derive(Debug, Clone, Copy)]
pub struct FixedThroughput(pub Throughput);

#[async_trait]
impl ThroughputSource for FixedThroughput {
    async fn network_throughput(&self) -> UnusedCssResult<Throughput> {
        Ok(self.0)
    }
}

/// Estimates throughput from the page's own network records.
#[derive(Debug, Clone, Copy)]
pub struct NetworkRecordsThroughput<'a>(pub &'a [NetworkTransferRecord]);

#[async_trait]
impl ThroughputSource for NetworkRecordsThroughput<'_> {
    async fn network_throughput(&self) -> UnusedCssResult<Throughput> {
        Ok(estimate_throughput(self.0))
    }
}

/// Whether a record's transfer says anything about network speed.
fn counts_toward_throughput(record: &NetworkTransferRecord) -> bool {
    !record.url.starts_with("data:")
        && !record.failed
        && record.finished
        && record.status_code.map_or(true, |code| code <= 300)
        && record.transfer_size > 0
}

/// Total bytes divided by the time at least one transfer was in flight.
pub fn estimate_throughput(records: &[NetworkTransferRecord]) -> Throughput {
    let mut total_bytes = 0u64;
    // (time, is_start)
    let mut boundaries: Vec<(f64, bool)> = Vec::new();

    for record in records.iter().filter(|r| counts_toward_throughput(r)) {
        let (Some(start), Some(end)) = (record.response_received_time, record.end_time) else {
            continue;
        };
        if !start.is_finite() || !end.is_finite() || end < start {
            continue;
        }
        total_bytes = total_bytes.saturating_add(record.transfer_size);
        boundaries.push((start, true));
        boundaries.push((end, false));
    }

    // Starts sort before ends at the same instant so touching intervals merge.
    boundaries.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| b.1.cmp(&a.1)));

    let mut inflight = 0usize;
    let mut current_start = 0.0;
    let mut busy_seconds = 0.0;
    for (time, is_start) in boundaries {
        if is_start {
            if inflight == 0 {
                current_start = time;
            }
            inflight += 1;
        } else {
            inflight -= 1;
            if inflight == 0 {
                busy_seconds += time - current_start;
            }
        }
    }

    tracing::debug!(total_bytes, busy_seconds, "estimated network throughput");

    if total_bytes == 0 || busy_seconds <= 0.0 {
        return Throughput::unbounded();
    }
    Throughput(total_bytes as f64 / busy_seconds)
}
