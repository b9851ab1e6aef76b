//! Live Interview - Staged interview sessions with graceful offline fallback
//!
//! This crate drives a live, turn-based interview about a problem statement
//! and a set of key concepts. Interviewer turns come from a remote service;
//! when it cannot answer, a local template keeps the conversation going.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
