// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_tests;
pub mod concept_repository_test;
pub mod concept_service_test;
pub mod demo_service_test;
pub mod helpers;
pub mod llm_service_test;
