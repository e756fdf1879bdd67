//! Core types for Ventanas Perfectas.
//!
//! This module provides the domain vocabulary shared by the pricing engine,
//! the order lifecycle and the storefront API.

pub mod chat;
pub mod id;
pub mod window;

pub use chat::{ChatMessage, ChatRole};
pub use id::*;
pub use window::{GlassType, Material, PartialWindowConfig, Profile, WindowConfig, WindowType};
