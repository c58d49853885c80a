//! Test Module
//!
//! Test suite for the Pino core.
//!
//! ## Test Categories
//! - `brain_tests`: Key info extraction, intent, context tags, synthesis, pipeline laws
//! - `host_tests`: Panel lifecycle, boundary validation, failure handling
//! - `integration_tests`: JSON-lines sessions and configuration loading

pub mod host_tests;
