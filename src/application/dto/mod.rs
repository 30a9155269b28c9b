// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义HTTP请求与响应的数据结构
pub mod concept_response;
pub mod demo_request;
pub mod demo_response;
pub mod status_response;
