// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::models::demo::DemoArtifact;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 非法的演示ID
    #[error("invalid demo id: {0}")]
    InvalidId(String),
    /// 目标已存在
    #[error("demo already exists: {0}")]
    AlreadyExists(String),
}

/// 演示站点存储特质
#[async_trait]
pub trait DemoStorageRepository: Send + Sync {
    /// 原子发布演示站点：三个文件要么全部可见，要么全部不可见
    async fn publish(&self, demo_id: &str, artifact: &DemoArtifact) -> Result<(), StorageError>;

    /// 删除演示站点
    async fn remove(&self, demo_id: &str) -> Result<(), StorageError>;

    /// 列出早于指定时间创建的演示站点ID
    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>, StorageError>;

    /// 存储是否可写
    async fn is_writable(&self) -> bool;

    /// 演示站点的公开URL
    fn public_url(&self, demo_id: &str) -> String;
}

/// 演示ID只允许字母、数字、下划线和连字符
pub fn is_valid_demo_id(demo_id: &str) -> bool {
    !demo_id.is_empty()
        && demo_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
