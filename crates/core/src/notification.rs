//! Due reminder notifications.
//!
//! SMS delivery is stubbed: messages are formatted and logged, never sent.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use tracing::info;

/// Notification service for resident reminders.
///
/// Provider configuration will be added when an SMS gateway is integrated.
#[derive(Debug, Clone, Default)]
pub struct NotificationService;

impl NotificationService {
    /// Creates a new notification service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Formats a standardized due reminder message.
    #[must_use]
    pub fn format_due_reminder(
        resident_name: &str,
        unit_number: &str,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> String {
        format!(
            "Dear {resident_name}, the due of {amount} for unit {unit_number} dated {due_date} is still unpaid. Please pay at your earliest convenience."
        )
    }

    /// Builds a `wa.me` link that opens a chat with the reminder pre-filled.
    ///
    /// Local numbers with a leading `0` are rewritten to the `90` country
    /// prefix; anything else is passed through as given.
    #[must_use]
    pub fn generate_whatsapp_link(phone: &str, message: &str) -> String {
        let phone = phone
            .strip_prefix('0')
            .map_or_else(|| phone.to_owned(), |rest| format!("90{rest}"));
        format!(
            "https://wa.me/{phone}?text={}",
            utf8_percent_encode(message, NON_ALPHANUMERIC)
        )
    }

    /// Sends an SMS via the configured provider.
    ///
    /// Stub: logs the message and reports success without delivering.
    pub fn send_sms(&self, phone: &str, message: &str) {
        info!(phone = %phone, message = %message, "sms stub, not delivered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reminder_mentions_unit_and_amount() {
        let msg = NotificationService::format_due_reminder(
            "Jane Doe",
            "A-12",
            dec!(150.50),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert!(msg.contains("A-12"));
        assert!(msg.contains("150.50"));
        assert!(msg.contains("2024-03-01"));
    }

    #[test]
    fn test_whatsapp_link_rewrites_leading_zero() {
        let link = NotificationService::generate_whatsapp_link("05551234567", "hello");
        assert!(link.starts_with("https://wa.me/905551234567?text="));
    }

    #[test]
    fn test_whatsapp_link_keeps_international_numbers() {
        let link = NotificationService::generate_whatsapp_link("905551234567", "hello");
        assert!(link.starts_with("https://wa.me/905551234567?text="));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = NotificationService::generate_whatsapp_link("905551234567", "pay your due!");
        assert_eq!(
            link,
            "https://wa.me/905551234567?text=pay%20your%20due%21"
        );
    }

    #[test]
    fn test_whatsapp_link_with_empty_phone() {
        let link = NotificationService::generate_whatsapp_link("", "hello");
        assert!(link.starts_with("https://wa.me/?text="));
    }
}
