use chrono::Utc;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::error::{CheckoutError, CheckoutResult};
use crate::models::{AuthUser, NewOrder, OrderConfirmation, ShippingForm};
use crate::orders::{OrderGateway, build_order};
use crate::validation::validate_shipping;

/// Where a checkout attempt currently stands. Rejections that never reach
/// the order store (empty cart, missing user, bad fields) do not leave
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    Submitting,
    Confirmed,
}

/// An unconfirmed submission: the idempotency key together with the exact
/// payload it was minted for. A retry presents the same key only while it
/// resubmits that payload; any other order gets a fresh key.
#[derive(Debug)]
struct PendingSubmission {
    key: Uuid,
    order: NewOrder,
}

/// Drives a cart through validation and order submission.
///
/// The cart is borrowed mutably for the whole attempt, so no other cart
/// mutation can interleave with an in-flight submission. The cart is
/// cleared only after the gateway confirms success; every failure path
/// leaves it untouched.
pub struct Checkout {
    phase: CheckoutPhase,
    pending: Option<PendingSubmission>,
}

impl Checkout {
    pub fn new() -> Self {
        Self {
            phase: CheckoutPhase::Idle,
            pending: None,
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Back to a fresh form, keeping any unconfirmed submission so an
    /// unchanged retry still deduplicates.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Idle;
    }

    /// Validates the attempt and submits the order.
    ///
    /// Checks run in a fixed order: an in-flight submission wins, then an
    /// empty cart, then authentication, then the shipping fields. Only a
    /// fully valid attempt reaches the gateway, and exactly one call is
    /// issued per attempt.
    ///
    /// One idempotency key covers an attempt and the retries that resubmit
    /// the same payload. Editing the cart or the address in between mints
    /// a fresh key, and a confirmed order discards the key entirely.
    pub async fn place_order<G: OrderGateway>(
        &mut self,
        cart: &mut CartStore,
        user: Option<&AuthUser>,
        gateway: &G,
        form: &ShippingForm,
    ) -> CheckoutResult<OrderConfirmation> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let user = user.ok_or(CheckoutError::AuthRequired)?;
        let address = validate_shipping(form).map_err(CheckoutError::Validation)?;

        let order = build_order(user, cart.items(), address);
        let key = match &self.pending {
            Some(pending) if pending.order == order => pending.key,
            _ => {
                let key = Uuid::new_v4();
                self.pending = Some(PendingSubmission {
                    key,
                    order: order.clone(),
                });
                key
            }
        };

        self.phase = CheckoutPhase::Submitting;
        tracing::info!(user_id = %user.id, total = order.total, key = %key, "submitting order");

        match gateway.submit_order(key, &order).await {
            Ok(()) => {
                cart.clear();
                self.pending = None;
                self.phase = CheckoutPhase::Confirmed;
                tracing::info!(total = order.total, "order confirmed");
                Ok(OrderConfirmation {
                    total: order.total,
                    placed_at: Utc::now(),
                })
            }
            Err(err) => {
                self.phase = CheckoutPhase::Idle;
                tracing::warn!(error = %err, "order submission failed, cart kept");
                Err(CheckoutError::Submission(err))
            }
        }
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}
