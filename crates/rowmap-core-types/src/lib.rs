//! Core types shared across rowmap facilities
//!
//! This crate provides the canonical field keys and event names used by both
//! the error and logging facilities, so every crate in the workspace emits
//! the same structured-log schema.

pub mod schema;
