use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::customer::CustomerDetails;
use crate::models::{Customer, NewOrder, Order, Product};

use super::store::CheckoutStore;
use super::StoreError;

// ============================================================================
// In-Memory Store - test double for the workflow
// ============================================================================
//
// Same contract as PgStore, including the atomicity of the conditional
// decrement: the check and the subtraction happen under one lock.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    products: Mutex<HashMap<i32, Product>>,
    customers: Mutex<Vec<Customer>>,
    orders: Mutex<Vec<Order>>,
    fail_order_inserts: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(product: Product) -> Self {
        let store = Self::new();
        store.add_product(product);
        store
    }

    pub fn add_product(&self, product: Product) {
        self.products.lock().unwrap().insert(product.id, product);
    }

    /// Make every subsequent `insert_order` fail, for exercising the
    /// customer-persists-without-order path.
    pub fn fail_order_inserts(&self) {
        self.fail_order_inserts.store(true, Ordering::SeqCst);
    }

    pub fn product_snapshot(&self, product_id: i32) -> Option<Product> {
        self.products.lock().unwrap().get(&product_id).cloned()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.lock().unwrap().len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutStore for InMemoryStore {
    async fn product_by_id(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.products.lock().unwrap().get(&product_id).cloned())
    }

    async fn insert_customer(&self, details: &CustomerDetails) -> Result<Customer, StoreError> {
        let customer = Customer {
            id: Uuid::new_v4(),
            full_name: details.full_name.clone(),
            email: details.email.as_str().to_string(),
            phone: details.phone.as_str().to_string(),
            address: details.address.clone(),
            city: details.city.clone(),
            state: details.state.clone(),
            zip_code: details.zip_code.clone(),
            created_at: Utc::now(),
        };
        self.customers.lock().unwrap().push(customer.clone());
        Ok(customer)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        if self.fail_order_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Decode("simulated order insert failure".to_string()));
        }
        let order = Order {
            id: Uuid::new_v4(),
            order_number: order.order_number,
            status: order.status,
            product_id: order.product_id,
            variant: order.variant,
            quantity: order.quantity,
            customer_id: order.customer_id,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn try_decrement_inventory(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, StoreError> {
        let mut products = self.products.lock().unwrap();
        match products.get_mut(&product_id) {
            Some(product) if product.inventory >= quantity => {
                product.inventory -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn order_with_customer(
        &self,
        order_number: &str,
    ) -> Result<Option<(Order, Customer)>, StoreError> {
        let orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter().find(|o| o.order_number == order_number) else {
            return Ok(None);
        };
        let customers = self.customers.lock().unwrap();
        let customer = customers
            .iter()
            .find(|c| c.id == order.customer_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Decode(format!(
                    "order {} references missing customer {}",
                    order.order_number, order.customer_id
                ))
            })?;
        Ok(Some((order.clone(), customer)))
    }
}
