//! Runtime and aggregate statistics service.

use std::sync::Arc;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Point-in-time view of the process and the stored data.
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub app_version: &'static str,
    pub platform: &'static str,
    pub arch: &'static str,
    pub pid: u32,
    pub uptime: Duration,
    /// Resident set size in bytes.
    pub rss_bytes: u64,
    pub virtual_bytes: u64,
    pub total_links: i64,
    pub total_clicks: i64,
}

/// Service for the read-only stats endpoint.
pub struct StatsService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    C: ClickRepository + ?Sized = dyn ClickRepository,
> {
    links: Arc<L>,
    clicks: Arc<C>,
    started_at: Instant,
}

impl<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> StatsService<L, C> {
    /// Creates a new stats service. Uptime is measured from this call.
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self {
            links,
            clicks,
            started_at: Instant::now(),
        }
    }

    /// Collects a stats snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn snapshot(&self) -> Result<RuntimeStats, AppError> {
        let total_links = self.links.count().await?;
        let total_clicks = self.clicks.count().await?;
        let (rss_bytes, virtual_bytes) = process_memory();

        Ok(RuntimeStats {
            app_version: env!("CARGO_PKG_VERSION"),
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            pid: std::process::id(),
            uptime: self.started_at.elapsed(),
            rss_bytes,
            virtual_bytes,
            total_links,
            total_clicks,
        })
    }
}

/// Reads resident and virtual memory of the current process.
///
/// Returns zeros if the platform does not expose process information.
fn process_memory() -> (u64, u64) {
    let pid = Pid::from_u32(std::process::id());
    let mut sys = System::new();

    // Refresh only the current process
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid)
        .map(|p| (p.memory(), p.virtual_memory()))
        .unwrap_or_default()
}
