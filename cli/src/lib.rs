// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Build trigger library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** HTTP client behind the `kick` binary

pub mod trigger;

pub use trigger::{BuildTrigger, TriggerError, TriggerResponse, DEFAULT_API_URL};
