// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Ringer crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`store`] - In-memory key-value store fake for testing without filesystem
//! - [`platform`] - Scripted contact directory, audio picker and device port
//! - [`fixtures`] - Sample contacts and settings documents

pub mod fixtures;
pub mod platform;
pub mod store;

pub use fixtures::{sample_contacts, sample_settings};
pub use platform::{FakeContactDirectory, RecordingDevice, ScriptedPicker};
pub use store::InMemoryKeyValueStore;
