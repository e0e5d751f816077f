// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application
//!
//! Deployment use cases: registration, reconciliation, and the handler that
//! sequences them.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer

pub mod deployment;
pub mod reconciler;
pub mod registrar;

pub use deployment::{DeploymentError, DeploymentHandler};
pub use reconciler::ServiceReconciler;
pub use registrar::TaskDefinitionRegistrar;
