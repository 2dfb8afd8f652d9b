use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::customer::CustomerDetails;
use crate::domain::order::value_objects::OrderStatus;
use crate::models::{Customer, NewOrder, Order, Product};

use super::StoreError;

// ============================================================================
// Checkout Store - CRUD plus the conditional inventory decrement
// ============================================================================

/// Persistence operations the checkout workflow depends on.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    /// Fetch a product by id.
    async fn product_by_id(&self, product_id: i32) -> Result<Option<Product>, StoreError>;

    /// Persist a normalized customer snapshot. Always inserts a new row.
    async fn insert_customer(&self, details: &CustomerDetails) -> Result<Customer, StoreError>;

    /// Persist a new order.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Atomically decrement inventory if at least `quantity` is available.
    ///
    /// Returns `false` when the guard fails, i.e. a concurrent submission
    /// already took the stock. Inventory never goes below zero.
    async fn try_decrement_inventory(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, StoreError>;

    /// Fetch an order together with its owned customer by order number.
    async fn order_with_customer(
        &self,
        order_number: &str,
    ) -> Result<Option<(Order, Customer)>, StoreError>;
}

// ============================================================================
// PostgreSQL Implementation
// ============================================================================

/// Checkout store backed by a sqlx Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    title: String,
    description: String,
    price: f64,
    image_url: String,
    inventory: i32,
    variants: Vec<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            inventory: row.inventory,
            variants: row.variants,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    status: String,
    product_id: i32,
    variant: String,
    quantity: i32,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, StoreError> {
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            StoreError::Decode(format!(
                "order {} has unknown status {:?}",
                self.order_number, self.status
            ))
        })?;
        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            status,
            product_id: self.product_id,
            variant: self.variant,
            quantity: self.quantity,
            customer_id: self.customer_id,
            created_at: self.created_at,
        })
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bootstrap the schema. Idempotent, run once at startup.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id          SERIAL PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL,
                price       DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                image_url   TEXT NOT NULL,
                inventory   INT NOT NULL CHECK (inventory >= 0),
                variants    TEXT[] NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS customers (
                id         UUID PRIMARY KEY,
                full_name  TEXT NOT NULL,
                email      TEXT NOT NULL,
                phone      TEXT NOT NULL,
                address    TEXT NOT NULL,
                city       TEXT NOT NULL,
                state      TEXT NOT NULL,
                zip_code   TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS orders (
                id           UUID PRIMARY KEY,
                order_number TEXT NOT NULL UNIQUE,
                status       TEXT NOT NULL,
                product_id   INT NOT NULL REFERENCES products (id),
                variant      TEXT NOT NULL,
                quantity     INT NOT NULL CHECK (quantity > 0),
                customer_id  UUID NOT NULL REFERENCES customers (id),
                created_at   TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("✅ Checkout schema ready");
        Ok(())
    }
}

#[async_trait]
impl CheckoutStore for PgStore {
    async fn product_by_id(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, title, description, price, image_url, inventory, variants
             FROM products
             WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
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

        sqlx::query(
            "INSERT INTO customers
                (id, full_name, email, phone, address, city, state, zip_code, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(customer.id)
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.zip_code)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
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

        sqlx::query(
            "INSERT INTO orders
                (id, order_number, status, product_id, variant, quantity, customer_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(order.status.as_str())
        .bind(order.product_id)
        .bind(&order.variant)
        .bind(order.quantity)
        .bind(order.customer_id)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    async fn try_decrement_inventory(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, StoreError> {
        // Single conditional UPDATE: the check and the decrement serialize
        // inside the database, so concurrent submissions cannot oversell.
        let result = sqlx::query(
            "UPDATE products
             SET inventory = inventory - $2
             WHERE id = $1 AND inventory >= $2",
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn order_with_customer(
        &self,
        order_number: &str,
    ) -> Result<Option<(Order, Customer)>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, order_number, status, product_id, variant, quantity, customer_id, created_at
             FROM orders
             WHERE order_number = $1",
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order = row.into_order()?;

        let customer = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, full_name, email, phone, address, city, state, zip_code, created_at
             FROM customers
             WHERE id = $1",
        )
        .bind(order.customer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            StoreError::Decode(format!(
                "order {} references missing customer {}",
                order.order_number, order.customer_id
            ))
        })?;

        Ok(Some((order, customer.into())))
    }
}
