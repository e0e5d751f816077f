// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Deployer Core
//!
//! Branch deployments onto an ECS cluster: task definition registration and
//! service reconciliation, driven by a single function invocation.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain types, deployment use cases, and the ECS adapter

pub mod domain;
pub mod application;
pub mod infrastructure;
