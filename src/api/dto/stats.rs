//! DTO for the stats endpoint.

use serde::Serialize;

use crate::application::services::RuntimeStats;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub app_version: &'static str,
    pub platform: &'static str,
    pub arch: &'static str,
    pub pid: u32,
    /// Seconds since start.
    pub uptime: f64,
    #[serde(rename = "memoryUsageMB")]
    pub memory_usage: MemoryUsage,
    pub links: LinkTotals,
}

/// Process memory in megabytes, formatted with two decimals.
#[derive(Debug, Serialize)]
pub struct MemoryUsage {
    pub rss: String,
    #[serde(rename = "virtual")]
    pub virtual_memory: String,
}

#[derive(Debug, Serialize)]
pub struct LinkTotals {
    pub total: i64,
    pub clicks: i64,
}

fn megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MB)
}

impl From<RuntimeStats> for StatsResponse {
    fn from(stats: RuntimeStats) -> Self {
        Self {
            app_version: stats.app_version,
            platform: stats.platform,
            arch: stats.arch,
            pid: stats.pid,
            uptime: stats.uptime.as_secs_f64(),
            memory_usage: MemoryUsage {
                rss: megabytes(stats.rss_bytes),
                virtual_memory: megabytes(stats.virtual_bytes),
            },
            links: LinkTotals {
                total: stats.total_links,
                clicks: stats.total_clicks,
            },
        }
    }
}
