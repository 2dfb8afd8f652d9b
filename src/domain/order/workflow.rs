use std::sync::Arc;

use chrono::Utc;

use crate::db::CheckoutStore;
use crate::domain::customer::CustomerDetails;
use crate::domain::validation::validate_checkout;
use crate::mailer::{templates, Mailer};
use crate::metrics::Metrics;
use crate::models::{Customer, NewOrder, Order, OrderReceipt, OrderView, Product, SubmitOrderRequest};

use super::errors::CheckoutError;
use super::value_objects::{new_order_number, OrderStatus};

// ============================================================================
// Order Workflow
// ============================================================================
//
// Orchestrates a submission: validate → look up product → check stock →
// derive simulated status → persist customer → secure stock → persist order
// → notify → respond. Plus the independent lookup read path.
//
// Failure semantics: everything before the customer insert fails fast with
// no persisted state. The customer insert is not rolled back by later
// failures; that at-least-once behavior is deliberate and documented.
//
// ============================================================================

#[derive(Clone)]
pub struct OrderWorkflow {
    store: Arc<dyn CheckoutStore>,
    mailer: Arc<dyn Mailer>,
    metrics: Arc<Metrics>,
}

impl OrderWorkflow {
    pub fn new(store: Arc<dyn CheckoutStore>, mailer: Arc<dyn Mailer>, metrics: Arc<Metrics>) -> Self {
        Self {
            store,
            mailer,
            metrics,
        }
    }

    /// Submit an order. Returns the generated order number and the derived
    /// status; every expected failure is a distinct `CheckoutError`.
    pub async fn submit_order(
        &self,
        request: SubmitOrderRequest,
    ) -> Result<OrderReceipt, CheckoutError> {
        let timer = self.metrics.submission_duration.start_timer();
        let result = self.submit_order_inner(request).await;
        timer.observe_duration();

        match &result {
            Ok(receipt) => self.metrics.record_submission(receipt.status.as_str()),
            Err(error) => self.metrics.record_rejection(error.reason()),
        }
        result
    }

    async fn submit_order_inner(
        &self,
        request: SubmitOrderRequest,
    ) -> Result<OrderReceipt, CheckoutError> {
        let mut errors = validate_checkout(
            &request.customer_data,
            request.payment_data.as_ref(),
            Utc::now(),
        );
        if request.quantity < 1 {
            errors.push("Valid quantity is required".to_string());
        }
        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        let product = self
            .store
            .product_by_id(request.product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(request.product_id))?;

        if request.quantity > product.inventory {
            return Err(CheckoutError::InsufficientInventory {
                product_id: product.id,
                requested: request.quantity,
            });
        }

        let status = OrderStatus::from_transaction_type(request.transaction_type.as_deref());
        let order_number = new_order_number();

        let details = CustomerDetails::from_raw(&request.customer_data);
        let customer = self.store.insert_customer(&details).await?;

        // Approved orders must secure stock before the order row exists:
        // the conditional decrement is the serialization point, and losing
        // it to a concurrent submission is an insufficient-inventory
        // failure, not an approved order.
        if status.is_approved() {
            let secured = self
                .store
                .try_decrement_inventory(product.id, request.quantity)
                .await?;
            if !secured {
                tracing::warn!(
                    product_id = product.id,
                    quantity = request.quantity,
                    "Inventory taken by a concurrent submission"
                );
                return Err(CheckoutError::InsufficientInventory {
                    product_id: product.id,
                    requested: request.quantity,
                });
            }
        }

        let order = self
            .store
            .insert_order(NewOrder {
                order_number: order_number.clone(),
                status,
                product_id: product.id,
                variant: request.variant.clone(),
                quantity: request.quantity,
                customer_id: customer.id,
            })
            .await?;

        tracing::info!(
            order_number = %order.order_number,
            status = %status,
            product_id = product.id,
            quantity = order.quantity,
            "✅ Order persisted"
        );

        self.notify(&order, &customer, &product).await;

        let message = if status.is_approved() {
            "Order placed successfully"
        } else {
            "Transaction failed"
        };

        Ok(OrderReceipt {
            order_number,
            status,
            message: message.to_string(),
        })
    }

    /// Send the outcome email. One attempt; failure is logged and swallowed
    /// so it can never fail the submission or alter the response.
    async fn notify(&self, order: &Order, customer: &Customer, product: &Product) {
        let (template, email) = if order.status.is_approved() {
            ("confirmation", templates::confirmation_email(order, customer, product))
        } else {
            ("payment_failed", templates::payment_failed_email(order, customer, product))
        };

        match self.mailer.send(email).await {
            Ok(()) => {
                tracing::info!(
                    order_number = %order.order_number,
                    to = %customer.email,
                    template = template,
                    "📧 Outcome email sent"
                );
                self.metrics.record_email(template, true);
            }
            Err(error) => {
                tracing::warn!(
                    order_number = %order.order_number,
                    to = %customer.email,
                    error = %error,
                    "Failed to send outcome email"
                );
                self.metrics.record_email(template, false);
            }
        }
    }

    /// Look up an order by its number and compose the confirmation view.
    /// No side effects.
    pub async fn get_order(&self, order_number: &str) -> Result<OrderView, CheckoutError> {
        let Some((order, customer)) = self.store.order_with_customer(order_number).await? else {
            self.metrics.record_lookup(false);
            return Err(CheckoutError::OrderNotFound(order_number.to_string()));
        };

        let product = self
            .store
            .product_by_id(order.product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(order.product_id))?;

        self.metrics.record_lookup(true);
        Ok(OrderView {
            order,
            customer,
            product,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
