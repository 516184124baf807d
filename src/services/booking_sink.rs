//! Notification & logging sink for completed bookings
//!
//! Appending to the request log and notifying the operator are independent
//! best-effort effects. They run concurrently, a failure in one never stops
//! the other, and no failure reaches the conversation engine: errors are
//! logged here and the booking counts as delivered.

use async_trait::async_trait;
use crate::models::BookingRecord;
use crate::utils::logging;
use super::notification::NotificationService;
use super::request_log::RequestLog;

/// Outcome of delivering one record, for observability only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub logged: bool,
    /// `None` when no admin chat is configured
    pub admin_notified: Option<bool>,
}

/// Receives each completed booking exactly once
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn deliver(&self, record: BookingRecord) -> DeliveryReport;
}

/// Request log plus admin notification
#[derive(Clone)]
pub struct BookingSink {
    request_log: RequestLog,
    notifications: NotificationService,
}

impl BookingSink {
    pub fn new(request_log: RequestLog, notifications: NotificationService) -> Self {
        Self {
            request_log,
            notifications,
        }
    }
}

#[async_trait]
impl RecordSink for BookingSink {
    async fn deliver(&self, record: BookingRecord) -> DeliveryReport {
        let (logged, notified) = tokio::join!(
            self.request_log.append(&record),
            self.notifications.notify_admin(&record),
        );

        let logged = match logged {
            Ok(()) => true,
            Err(e) => {
                logging::log_sink_failure("request_log", record.conversant_id, &e);
                false
            }
        };

        let admin_notified = match notified {
            Ok(true) => Some(true),
            Ok(false) => None,
            Err(e) => {
                logging::log_sink_failure("admin_notification", record.conversant_id, &e);
                Some(false)
            }
        };

        DeliveryReport {
            logged,
            admin_notified,
        }
    }
}
