// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 请求令牌校验与按客户端的速率限制
pub mod auth_middleware;
pub mod rate_limit_middleware;
