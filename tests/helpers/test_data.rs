//! Test data helpers
//!
//! Ready-made event sequences for the booking conversation.

use autoservice_bot::models::{ConversantId, InboundEvent};

/// Full booking: `/start`, then service, vehicle and time answers
pub fn booking_script(
    conversant_id: ConversantId,
    display_name: &str,
    service: &str,
    vehicle: &str,
    time_slot: &str,
) -> Vec<InboundEvent> {
    vec![
        InboundEvent::start(conversant_id, display_name),
        InboundEvent::text(conversant_id, display_name, service),
        InboundEvent::text(conversant_id, display_name, vehicle),
        InboundEvent::text(conversant_id, display_name, time_slot),
    ]
}

/// The reference scenario for conversant 42
pub fn example_booking() -> Vec<InboundEvent> {
    booking_script(42, "@camry_owner", "Ceramic coating", "Toyota Camry", "tomorrow 3pm")
}
