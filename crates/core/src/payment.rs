//! Payment provider integration.
//!
//! Stub: no processing happens until a provider is wired in.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Payment service for collecting dues online.
#[derive(Debug, Clone, Default)]
pub struct PaymentService;

impl PaymentService {
    /// Creates a new payment service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a payment link for a due.
    ///
    /// Stub: logs the request and returns `None` until a provider exists.
    #[must_use]
    pub fn create_payment_link(&self, due_id: Uuid, amount: Decimal) -> Option<String> {
        info!(due_id = %due_id, amount = %amount, "payment stub, no link generated");
        None
    }
}
