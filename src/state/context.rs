//! Application context
//!
//! Wires the booking engine to its collaborators and runs one inbound event
//! through the whole pipeline: transition, reply, record delivery.

use std::sync::Arc;
use crate::Settings;
use crate::models::InboundEvent;
use crate::services::{OutboundSink, RecordSink, ServiceFactory};
use crate::utils::logging;
use super::engine::{BookingEngine, Transition};
use super::storage::SessionStore;

/// Application-wide context shared by all handlers
#[derive(Clone)]
pub struct AppContext {
    pub engine: Arc<BookingEngine>,
    pub messenger: Arc<dyn OutboundSink>,
    pub booking_sink: Arc<dyn RecordSink>,
}

impl AppContext {
    pub fn new(engine: BookingEngine, messenger: Arc<dyn OutboundSink>, booking_sink: Arc<dyn RecordSink>) -> Self {
        Self {
            engine: Arc::new(engine),
            messenger,
            booking_sink,
        }
    }

    /// Build the context from settings and the service factory
    pub fn from_factory(factory: ServiceFactory, store: SessionStore, settings: &Settings) -> Self {
        let engine = BookingEngine::new(
            store,
            settings.messages.clone(),
            settings.booking.service_options.clone(),
        );

        Self::new(engine, factory.messenger, factory.booking_sink)
    }

    /// Process one inbound event.
    ///
    /// The transition is final once the engine returns: a failed reply or a
    /// failed sink never undoes it. The reply goes out before the record is
    /// handed to the sink.
    pub async fn process(&self, event: InboundEvent) -> Transition {
        let transition = self.engine.handle_event(&event);

        if let Some(reply) = &transition.reply {
            if let Err(e) = self.messenger.send(reply).await {
                logging::log_delivery_failure(reply.conversant_id, &e);
            }
        }

        if let Some(record) = transition.record.clone() {
            self.booking_sink.deliver(record).await;
        }

        transition
    }
}
