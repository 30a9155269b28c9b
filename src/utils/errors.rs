// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 表单缺少必填字段
pub const VALIDATION_FAILED: &str = "Business name and industry are required";
/// 对外统一的生成失败提示
pub const GENERATION_FAILED: &str = "Failed to generate concept with available AI models";
/// 演示站点生成失败提示
pub const DEMO_FAILED: &str = "Failed to generate demo";

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("未找到数据")]
    NotFound,

    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// 概念与演示生成的错误类型
#[derive(Error, Debug)]
pub enum ConceptError {
    /// 表单缺少必填字段，原样返回给调用方
    #[error("{0}")]
    Validation(String),

    /// 所有提供商均失败
    #[error("AI provider error: {0}")]
    AiProvider(String),

    /// 模型输出无法解析
    #[error("parse error: {0}")]
    Parse(String),

    /// 演示内容生成失败（提供商或输出解析）
    #[error("demo generation error: {0}")]
    DemoGeneration(String),

    /// 演示文件写入失败
    #[error("storage error: {0}")]
    Storage(String),

    /// 记录持久化失败，仅记录日志
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ConceptError {
    /// 可以暴露给调用方的消息
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::AiProvider(_) | Self::Parse(_) => GENERATION_FAILED.to_string(),
            Self::DemoGeneration(_) | Self::Storage(_) | Self::Persistence(_) => {
                DEMO_FAILED.to_string()
            }
        }
    }
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("存储错误: {0}")]
    StorageError(String),
}
