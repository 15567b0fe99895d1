//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `session` - Session summary and teardown
//! - `credentials` - Service account upload, status and removal
//! - `voices` - Language and voice listing
//! - `speak` - Text-to-speech REST API
//! - `history` - Per-session synthesis history

pub mod api;
pub mod credentials;
pub mod history;
pub mod session;
pub mod speak;
pub mod voices;
