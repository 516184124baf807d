//! Per-conversant booking draft
//!
//! A session only ever holds one of the three non-terminal states. Reaching
//! `Completed` or `Cancelled` removes the session from the store, so the
//! terminal states live on [`ConversationState`] only.

use std::fmt;
use chrono::{DateTime, Duration, Utc};

/// Position of a live session in the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    AwaitingService,
    AwaitingVehicle,
    AwaitingTime,
}

/// Every state the conversation can be observed in, including terminal ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationState {
    AwaitingService,
    AwaitingVehicle,
    AwaitingTime,
    Completed,
    Cancelled,
}

impl ConversationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConversationState::Completed | ConversationState::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::AwaitingService => "awaiting_service",
            ConversationState::AwaitingVehicle => "awaiting_vehicle",
            ConversationState::AwaitingTime => "awaiting_time",
            ConversationState::Completed => "completed",
            ConversationState::Cancelled => "cancelled",
        }
    }
}

impl From<SessionState> for ConversationState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::AwaitingService => ConversationState::AwaitingService,
            SessionState::AwaitingVehicle => ConversationState::AwaitingVehicle,
            SessionState::AwaitingTime => ConversationState::AwaitingTime,
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress booking draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
    pub service: Option<String>,
    pub vehicle: Option<String>,
    pub time_slot: Option<String>,
    /// When this session was last written
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Fresh session at the start of the flow
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingService,
            service: None,
            vehicle: None,
            time_slot: None,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check whether the session has been idle for longer than `max_idle`
    pub fn is_idle(&self, max_idle: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > max_idle
    }

    /// Fields are filled strictly in order: no vehicle without a service,
    /// no time slot without a vehicle.
    pub fn fields_in_order(&self) -> bool {
        (self.vehicle.is_none() || self.service.is_some())
            && (self.time_slot.is_none() || self.vehicle.is_some())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
