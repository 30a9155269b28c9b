// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::settings::DemoSettings;
use crate::domain::repositories::storage_repository::DemoStorageRepository;
use crate::utils::errors::WorkerError;

/// 演示站点清理工作器
///
/// 定期删除超过保留天数的演示目录（包括遗留的暂存目录）
pub struct DemoCleanupWorker {
    storage: Arc<dyn DemoStorageRepository>,
    retention: chrono::Duration,
    interval: Duration,
}

impl DemoCleanupWorker {
    pub fn new(
        storage: Arc<dyn DemoStorageRepository>,
        retention: chrono::Duration,
        interval: Duration,
    ) -> Self {
        Self {
            storage,
            retention,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    pub fn from_settings(storage: Arc<dyn DemoStorageRepository>, settings: &DemoSettings) -> Self {
        Self::new(
            storage,
            chrono::Duration::days(settings.retention_days as i64),
            Duration::from_secs(settings.cleanup_interval_secs),
        )
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Demo cleanup worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.cleanup_expired_demos().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Cleaned up {} expired demos", count);
                    }
                }
                Err(e) => {
                    error!("Failed to cleanup expired demos: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 删除一轮过期演示，返回删除数量
    pub async fn cleanup_expired_demos(&self) -> Result<u64, WorkerError> {
        let cutoff = Utc::now() - self.retention;
        let expired = self
            .storage
            .list_older_than(cutoff)
            .await
            .map_err(|e| WorkerError::StorageError(e.to_string()))?;

        let mut removed = 0;
        for demo_id in expired {
            match self.storage.remove(&demo_id).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove demo {}: {}", demo_id, e),
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
#[path = "demo_cleanup_worker_test.rs"]
mod tests;
