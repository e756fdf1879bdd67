//! Cart and order records.
//!
//! A cart line freezes its unit price when it is added; an [`Order`] is
//! constructed exactly once per flow, at checkout, and is immutable from
//! then on.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{CartLineId, WindowConfig};

/// One configured window in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub config: WindowConfig,
    /// VAT-inclusive price frozen at the moment the line was added. Never
    /// recomputed, even if pricing tables change afterwards.
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

/// The session's cart. Mutable only while the flow is configuring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Append a line.
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Remove the line with the given id. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: CartLineId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of the frozen, VAT-inclusive line prices.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(|line| line.unit_price).sum()
    }
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "deliveryAddress")]
    pub delivery_address: String,
}

impl ContactInfo {
    /// Name of the first blank (empty or whitespace-only) field, if any.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        if self.customer_name.trim().is_empty() {
            return Some("customerName");
        }
        if self.email.trim().is_empty() {
            return Some("email");
        }
        if self.phone.trim().is_empty() {
            return Some("phone");
        }
        if self.delivery_address.trim().is_empty() {
            return Some("deliveryAddress");
        }
        None
    }
}

/// The proof-of-payment file a customer submits after the bank transfer.
///
/// Only the name and size are retained; storage is simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentProof {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "sizeBytes")]
    pub size_bytes: u64,
}

impl PaymentProof {
    /// Whether a file was actually submitted.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.file_name.trim().is_empty() && self.size_bytes > 0
    }
}

/// A placed order, frozen at the checkout transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    /// Order date formatted `dd/mm/yyyy`.
    #[serde(rename = "orderDate")]
    pub order_date: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "deliveryAddress")]
    pub delivery_address: String,
    pub lines: Vec<CartLine>,
    /// Pre-VAT total, derived from `total_cost / (1 + vat_rate)`.
    pub subtotal: f64,
    #[serde(rename = "vatAmount")]
    pub vat_amount: f64,
    /// Sum of the cart's frozen line prices. Never a fresh recomputation, so
    /// the invoice total always equals what the customer saw while
    /// configuring.
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}

impl Order {
    /// Build an order from the cart's current contents.
    ///
    /// The VAT decomposition divides the already-VAT-inclusive total back
    /// out, so `subtotal + vat_amount == total_cost` holds exactly.
    #[must_use]
    pub fn place(cart: &Cart, contact: ContactInfo, vat_rate: f64) -> Self {
        let total_cost = cart.total_cost();
        let subtotal = total_cost / (1.0 + vat_rate);
        let vat_amount = total_cost - subtotal;

        Self {
            order_number: generate_order_number(),
            order_date: chrono::Local::now().format("%d/%m/%Y").to_string(),
            customer_name: contact.customer_name,
            email: contact.email,
            phone: contact.phone,
            delivery_address: contact.delivery_address,
            lines: cart.lines().to_vec(),
            subtotal,
            vat_amount,
            total_cost,
        }
    }
}

/// Generate a fresh order number, `VP-` plus a random 4-digit suffix.
///
/// Collisions across concurrent sessions are possible at this entropy;
/// callers needing guarantees should layer a sequential scheme on top.
fn generate_order_number() -> String {
    let suffix = rand::rng().random_range(1000..10000);
    format!("VP-{suffix}")
}
