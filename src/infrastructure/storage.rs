// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::config::settings::DemoSettings;
use crate::domain::models::demo::{DemoArtifact, INDEX_FILE};
use crate::domain::repositories::storage_repository::{
    is_valid_demo_id, DemoStorageRepository, StorageError,
};

/// 暂存目录前缀，发布完成前演示文件只存在于暂存目录中
const STAGING_PREFIX: &str = ".staging-";
const DEMO_PREFIX: &str = "demo_";
const WRITE_PROBE: &str = ".write-probe";

fn public_url_for(base_url: &str, demo_id: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), demo_id, INDEX_FILE)
}

/// 本地文件系统演示存储
///
/// 每个演示一个目录：先写入暂存目录，再整体重命名到位
pub struct LocalDemoStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalDemoStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn from_settings(settings: &DemoSettings) -> Self {
        Self::new(&settings.output_dir, &settings.public_base_url)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn write_files(dir: &Path, artifact: &DemoArtifact) -> Result<(), StorageError> {
        fs::create_dir(dir).await?;

        for (name, content) in artifact.files() {
            let mut file = fs::File::create(dir.join(name)).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
        }

        Ok(())
    }
}

#[async_trait]
impl DemoStorageRepository for LocalDemoStorage {
    async fn publish(&self, demo_id: &str, artifact: &DemoArtifact) -> Result<(), StorageError> {
        if !is_valid_demo_id(demo_id) {
            return Err(StorageError::InvalidId(demo_id.to_string()));
        }

        let target = self.base_path.join(demo_id);
        if fs::try_exists(&target).await? {
            return Err(StorageError::AlreadyExists(demo_id.to_string()));
        }

        fs::create_dir_all(&self.base_path).await?;
        let staging = self.base_path.join(format!("{}{}", STAGING_PREFIX, demo_id));

        let result = match Self::write_files(&staging, artifact).await {
            Ok(()) => fs::rename(&staging, &target).await.map_err(StorageError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove staging dir {:?}: {}", staging, cleanup);
                }
            }
            return Err(e);
        }

        debug!("Published demo files to {:?}", target);
        Ok(())
    }

    async fn remove(&self, demo_id: &str) -> Result<(), StorageError> {
        let bare_id = demo_id.strip_prefix(STAGING_PREFIX).unwrap_or(demo_id);
        if !is_valid_demo_id(bare_id) {
            return Err(StorageError::InvalidId(demo_id.to_string()));
        }

        match fs::remove_dir_all(self.base_path.join(demo_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        let mut expired = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(DEMO_PREFIX) && !name.starts_with(STAGING_PREFIX) {
                continue;
            }

            let metadata = entry.metadata().await?;
            if !metadata.is_dir() {
                continue;
            }

            let modified: DateTime<Utc> = metadata.modified()?.into();
            if modified < cutoff {
                expired.push(name);
            }
        }

        expired.sort();
        Ok(expired)
    }

    async fn is_writable(&self) -> bool {
        if fs::create_dir_all(&self.base_path).await.is_err() {
            return false;
        }

        let probe = self.base_path.join(WRITE_PROBE);
        let writable = fs::write(&probe, b"ok").await.is_ok();
        let _ = fs::remove_file(&probe).await;
        writable
    }

    fn public_url(&self, demo_id: &str) -> String {
        public_url_for(&self.public_base_url, demo_id)
    }
}

/// 内存演示存储（用于测试）
pub struct InMemoryDemoStorage {
    demos: DashMap<String, (DemoArtifact, DateTime<Utc>)>,
    public_base_url: String,
}

impl InMemoryDemoStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            demos: DashMap::new(),
            public_base_url: public_base_url.into(),
        }
    }

    /// 读取已发布的演示内容
    pub fn get(&self, demo_id: &str) -> Option<DemoArtifact> {
        self.demos.get(demo_id).map(|entry| entry.0.clone())
    }

    /// 以指定创建时间插入演示
    pub fn insert_at(&self, demo_id: &str, artifact: DemoArtifact, created_at: DateTime<Utc>) {
        self.demos.insert(demo_id.to_string(), (artifact, created_at));
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }
}

impl Default for InMemoryDemoStorage {
    fn default() -> Self {
        Self::new("http://localhost:3000/demos")
    }
}

#[async_trait]
impl DemoStorageRepository for InMemoryDemoStorage {
    async fn publish(&self, demo_id: &str, artifact: &DemoArtifact) -> Result<(), StorageError> {
        if !is_valid_demo_id(demo_id) {
            return Err(StorageError::InvalidId(demo_id.to_string()));
        }
        if self.demos.contains_key(demo_id) {
            return Err(StorageError::AlreadyExists(demo_id.to_string()));
        }

        self.insert_at(demo_id, artifact.clone(), Utc::now());
        Ok(())
    }

    async fn remove(&self, demo_id: &str) -> Result<(), StorageError> {
        self.demos.remove(demo_id);
        Ok(())
    }

    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>, StorageError> {
        let mut expired: Vec<String> = self
            .demos
            .iter()
            .filter(|entry| entry.value().1 < cutoff)
            .map(|entry| entry.key().clone())
            .collect();
        expired.sort();
        Ok(expired)
    }

    async fn is_writable(&self) -> bool {
        true
    }

    fn public_url(&self, demo_id: &str) -> String {
        public_url_for(&self.public_base_url, demo_id)
    }
}
