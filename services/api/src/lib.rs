//! services/api/src/lib.rs
//!
//! HTTP surface and persistence adapters for the symptom journal.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
