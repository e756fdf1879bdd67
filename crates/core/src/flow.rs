//! The order lifecycle state machine.
//!
//! One [`OrderFlow`] exists per customer session and owns the cart, the
//! placed order and a snapshot of the pricing tables. Every mutation goes
//! through a transition method; the rendering layer never touches cart or
//! order fields directly. All transitions are applied serially by a single
//! logical actor, so the flow itself needs no locking.

use serde::Serialize;
use thiserror::Error;

use crate::order::{Cart, CartLine, ContactInfo, Order, PaymentProof};
use crate::pricing::{self, PricingTables};
use crate::types::{CartLineId, WindowConfig};

/// Where the session currently is in the ordering process.
///
/// Wire names follow the storefront's step labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Step {
    #[default]
    #[serde(rename = "configure")]
    Configuring,
    #[serde(rename = "checkout")]
    CheckingOut,
    #[serde(rename = "invoice")]
    AwaitingPayment,
    #[serde(rename = "confirmation")]
    Confirmed,
}

impl Step {
    /// Customer-facing label of this step.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Configuring => "Configuración",
            Self::CheckingOut => "Datos y Envío",
            Self::AwaitingPayment => "Factura y Pago",
            Self::Confirmed => "Confirmación",
        }
    }
}

/// A rejected transition. The flow's state is unchanged; the message is
/// shown inline to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// `proceed_to_checkout` on an empty cart.
    #[error("Añade al menos una ventana a tu pedido para continuar.")]
    EmptyCart,

    /// `place_order` with at least one blank contact field.
    #[error("Por favor, rellena todos los campos.")]
    BlankContactField(&'static str),

    /// `confirm_payment` without an actual file.
    #[error("Selecciona el comprobante de la transferencia para continuar.")]
    MissingProof,

    /// An action invoked in a step that does not allow it.
    #[error("Esta acción no está disponible en el paso actual del pedido.")]
    WrongStep {
        action: &'static str,
        step: Step,
    },
}

/// The per-session order lifecycle.
#[derive(Debug, Clone)]
pub struct OrderFlow {
    step: Step,
    cart: Cart,
    order: Option<Order>,
    tables: PricingTables,
    vat_rate: f64,
    next_line_id: i32,
}

impl OrderFlow {
    /// Create a flow in the configuring step with an empty cart.
    ///
    /// The tables and VAT rate are snapshotted for the session; line prices
    /// are additionally frozen per line at add time.
    #[must_use]
    pub fn new(tables: PricingTables, vat_rate: f64) -> Self {
        Self {
            step: Step::Configuring,
            cart: Cart::default(),
            order: None,
            tables,
            vat_rate,
            next_line_id: 1,
        }
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    #[must_use]
    pub fn vat_rate(&self) -> f64 {
        self.vat_rate
    }

    /// Quote a configuration against this session's tables without touching
    /// the cart.
    #[must_use]
    pub fn quote(&self, config: &WindowConfig) -> f64 {
        pricing::quote(config, &self.tables, self.vat_rate)
    }

    /// Add a configured window to the cart, freezing its price now.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::WrongStep`] unless the flow is configuring.
    pub fn add_to_cart(&mut self, config: WindowConfig) -> Result<CartLineId, GuardError> {
        self.require_step(Step::Configuring, "add_to_cart")?;

        let unit_price = self.quote(&config);
        let id = CartLineId::new(self.next_line_id);
        self.next_line_id += 1;
        self.cart.push(CartLine {
            id,
            config,
            unit_price,
        });
        Ok(id)
    }

    /// Remove a cart line by id. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::WrongStep`] unless the flow is configuring.
    pub fn remove_from_cart(&mut self, id: CartLineId) -> Result<(), GuardError> {
        self.require_step(Step::Configuring, "remove_from_cart")?;
        self.cart.remove(id);
        Ok(())
    }

    /// Move to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::EmptyCart`] if nothing has been added, or
    /// [`GuardError::WrongStep`] outside the configuring step.
    pub fn proceed_to_checkout(&mut self) -> Result<(), GuardError> {
        self.require_step(Step::Configuring, "proceed_to_checkout")?;
        if self.cart.is_empty() {
            return Err(GuardError::EmptyCart);
        }
        self.step = Step::CheckingOut;
        Ok(())
    }

    /// Return from checkout to the configurator.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::WrongStep`] outside the checkout step.
    pub fn back(&mut self) -> Result<(), GuardError> {
        self.require_step(Step::CheckingOut, "back")?;
        self.step = Step::Configuring;
        Ok(())
    }

    /// Place the order: freeze the cart into an immutable [`Order`] and move
    /// to the invoice step.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::BlankContactField`] if any contact field is
    /// blank, or [`GuardError::WrongStep`] outside the checkout step.
    pub fn place_order(&mut self, contact: ContactInfo) -> Result<&Order, GuardError> {
        self.require_step(Step::CheckingOut, "place_order")?;
        if let Some(field) = contact.blank_field() {
            return Err(GuardError::BlankContactField(field));
        }

        let order = Order::place(&self.cart, contact, self.vat_rate);
        self.step = Step::AwaitingPayment;
        Ok(self.order.insert(order))
    }

    /// Register the proof-of-payment upload and confirm the order.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::MissingProof`] if no file was submitted, or
    /// [`GuardError::WrongStep`] outside the invoice step.
    pub fn confirm_payment(&mut self, proof: &PaymentProof) -> Result<(), GuardError> {
        self.require_step(Step::AwaitingPayment, "confirm_payment")?;
        if !proof.is_present() {
            return Err(GuardError::MissingProof);
        }
        self.step = Step::Confirmed;
        Ok(())
    }

    /// Clear the cart, discard the order and start over.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::WrongStep`] outside the confirmation step.
    pub fn start_new_order(&mut self) -> Result<(), GuardError> {
        self.require_step(Step::Confirmed, "start_new_order")?;
        self.cart.clear();
        self.order = None;
        self.step = Step::Configuring;
        Ok(())
    }

    fn require_step(&self, expected: Step, action: &'static str) -> Result<(), GuardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(GuardError::WrongStep {
                action,
                step: self.step,
            })
        }
    }
}
