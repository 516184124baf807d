//! Booking conversation engine
//!
//! Drives the per-conversant state machine:
//!
//! ```text
//! AwaitingService -> AwaitingVehicle -> AwaitingTime -> Completed
//!        \________________\__________________\______-> Cancelled (/cancel)
//! ```
//!
//! `/start` always resets to a fresh `AwaitingService` session. Message text
//! is stored verbatim and never rejected. A plain message from a conversant
//! without a session is not treated as booking input; the engine answers with
//! a hint to send `/start` and creates nothing. `/cancel` without a session
//! does nothing at all.

use tracing::debug;
use crate::config::MessagesConfig;
use crate::models::{BookingRecord, ConversantId, InboundEvent, OutboundMessage};
use crate::utils::logging;
use super::session::{ConversationState, Session, SessionState};
use super::storage::SessionStore;

/// What a single event did to the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub conversant_id: ConversantId,
    /// State before the event, `None` if there was no session
    pub from: Option<SessionState>,
    /// State after the event, `None` if no session exists afterwards
    /// because nothing was started
    pub to: Option<ConversationState>,
    pub reply: Option<OutboundMessage>,
    pub record: Option<BookingRecord>,
}

/// Per-conversant booking state machine
#[derive(Debug, Clone)]
pub struct BookingEngine {
    store: SessionStore,
    messages: MessagesConfig,
    service_options: Vec<String>,
}

impl BookingEngine {
    pub fn new(store: SessionStore, messages: MessagesConfig, service_options: Vec<String>) -> Self {
        Self {
            store,
            messages,
            service_options,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Advance the conversant's conversation by one event.
    ///
    /// Never fails. The whole lookup, mutation and transition runs under the
    /// conversant's entry lock, so two events from one conversant never
    /// interleave.
    pub fn handle_event(&self, event: &InboundEvent) -> Transition {
        let id = event.conversant_id;

        let transition = if event.is_start {
            self.start(id)
        } else if event.is_cancel {
            self.cancel(id)
        } else {
            self.store.transact(id, |slot| match slot.take() {
                None => Transition {
                    conversant_id: id,
                    from: None,
                    to: None,
                    reply: Some(OutboundMessage::new(id, &self.messages.start_hint)),
                    record: None,
                },
                Some(session) => self.advance(event, session, slot),
            })
        };

        logging::log_transition(
            id,
            transition.from.map(|state| ConversationState::from(state).as_str()),
            transition.to.map_or("none", ConversationState::as_str),
        );
        transition
    }

    fn start(&self, id: ConversantId) -> Transition {
        let previous = self.store.reset(id);
        if let Some(discarded) = &previous {
            debug!(conversant_id = id, state = ?discarded.state, "Restart discarded partial booking");
        }

        Transition {
            conversant_id: id,
            from: previous.map(|session| session.state),
            to: Some(ConversationState::AwaitingService),
            reply: Some(
                OutboundMessage::new(id, &self.messages.service_prompt)
                    .with_suggestions(self.service_options.clone()),
            ),
            record: None,
        }
    }

    fn cancel(&self, id: ConversantId) -> Transition {
        let previous = self.store.remove(id);

        // Nothing to cancel outside a conversation.
        Transition {
            conversant_id: id,
            from: previous.as_ref().map(|session| session.state),
            to: previous.as_ref().map(|_| ConversationState::Cancelled),
            reply: previous.map(|_| OutboundMessage::new(id, &self.messages.cancelled)),
            record: None,
        }
    }

    /// Store the event text in the field the session is waiting for and move
    /// one state forward. Leaves the slot empty once the booking completes.
    fn advance(&self, event: &InboundEvent, mut session: Session, slot: &mut Option<Session>) -> Transition {
        let id = event.conversant_id;
        let from = session.state;
        let text = event.text.clone();

        let (to, reply, record) = match session.state {
            SessionState::AwaitingService => {
                session.service = Some(text);
                session.state = SessionState::AwaitingVehicle;
                (
                    ConversationState::AwaitingVehicle,
                    OutboundMessage::new(id, &self.messages.vehicle_prompt),
                    None,
                )
            }
            SessionState::AwaitingVehicle => {
                session.vehicle = Some(text);
                session.state = SessionState::AwaitingTime;
                (
                    ConversationState::AwaitingTime,
                    OutboundMessage::new(id, &self.messages.time_prompt),
                    None,
                )
            }
            SessionState::AwaitingTime => {
                session.time_slot = Some(text);
                let record = BookingRecord {
                    conversant_id: id,
                    display_name: event.display_name.clone(),
                    service: session.service.take().unwrap_or_default(),
                    vehicle: session.vehicle.take().unwrap_or_default(),
                    time_slot: session.time_slot.take().unwrap_or_default(),
                };
                logging::log_booking_completed(id, &record.service, &record.vehicle, &record.time_slot);
                (
                    ConversationState::Completed,
                    OutboundMessage::new(id, &self.messages.confirmation),
                    Some(record),
                )
            }
        };

        if !to.is_terminal() {
            session.touch();
            *slot = Some(session);
        }

        Transition {
            conversant_id: id,
            from: Some(from),
            to: Some(to),
            reply: Some(reply),
            record,
        }
    }
}
