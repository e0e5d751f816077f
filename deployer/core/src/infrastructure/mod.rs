// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Adapters from the orchestrator port to AWS ECS

pub mod ecs;

pub use ecs::EcsOrchestrator;
