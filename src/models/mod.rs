//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod booking;

// Re-export commonly used models
pub use booking::{BookingRecord, ConversantId, InboundEvent, OutboundMessage};
