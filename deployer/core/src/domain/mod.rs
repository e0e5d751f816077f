// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Deployment configuration, task definition and service models, the
//! invocation event contract, and the orchestrator port.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer

pub mod config;
pub mod event;
pub mod orchestrator;
pub mod service;
pub mod task_definition;
