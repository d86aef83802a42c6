//! # Checkout Module
//!
//! Checkout is a WhatsApp deep link carrying a pre-filled order message.
//! The shop owner receives the message and takes it from there.
//!
//! ```text
//! Cart ──► order_message() ──► percent-encode ──► https://wa.me/{digits}?text=...
//! ```
//!
//! ## Message Format
//! ```text
//! Hello, I would like to order the following items:
//!
//! Electric Kettle x2 - $79.98
//! Dishwasher x1 - $549.99
//!
//! Total: $629.97
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation;

pub const DEFAULT_WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Placeholder number shipped with the storefront template.
pub const DEFAULT_PHONE_NUMBER: &str = "1234567890";

const GREETING: &str = "Hello, I would like to order the following items:\n\n";

/// Where checkout messages are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Shop's WhatsApp number. Separators are allowed and stripped.
    pub phone_number: String,
    pub base_url: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            phone_number: DEFAULT_PHONE_NUMBER.to_string(),
            base_url: DEFAULT_WHATSAPP_BASE_URL.to_string(),
        }
    }
}

impl CheckoutSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_phone_number(&self.phone_number)?;
        Url::parse(&self.base_url).map_err(|e| ValidationError::InvalidFormat {
            field: "base_url".to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// The message and the link that opens WhatsApp with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLink {
    pub message: String,
    pub url: String,
}

/// Builds the order message for a cart.
///
/// The total line is the item subtotal; shipping is settled in the chat.
pub fn order_message(cart: &Cart) -> String {
    let mut message = String::from(GREETING);

    for line in &cart.items {
        message.push_str(&format!(
            "{} x{} - {}\n",
            line.name,
            line.quantity,
            line.line_total()
        ));
    }

    message.push_str(&format!("\nTotal: {}", cart.subtotal()));
    message
}

/// Builds the `wa.me` deep link for a cart.
pub fn whatsapp_link(cart: &Cart, settings: &CheckoutSettings) -> CoreResult<String> {
    checkout(cart, settings).map(|link| link.url)
}

/// Builds both the message and the link.
///
/// ## Errors
/// - `EmptyCart` when there is nothing to order
/// - `Validation` when the phone number or base URL is unusable
pub fn checkout(cart: &Cart, settings: &CheckoutSettings) -> CoreResult<CheckoutLink> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    settings.validate()?;
    let digits = validation::validate_phone_number(&settings.phone_number)?;

    let message = order_message(cart);
    let url = format!(
        "{}/{}?text={}",
        settings.base_url.trim_end_matches('/'),
        digits,
        urlencoding::encode(&message)
    );

    Ok(CheckoutLink { message, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewProduct;
    use chrono::Utc;

    fn cart_with(lines: &[(u64, &str, i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, name, cents, qty) in lines {
            let product = NewProduct {
                name: Some(name.to_string()),
                price_cents: Some(*cents),
                ..Default::default()
            }
            .into_product(*id, Utc::now())
            .unwrap();
            cart.add_item(&product, *qty).unwrap();
        }
        cart
    }

    #[test]
    fn test_order_message_format() {
        let cart = cart_with(&[(4, "Electric Kettle", 3999, 2), (5, "Dishwasher", 54999, 1)]);
        assert_eq!(
            order_message(&cart),
            "Hello, I would like to order the following items:\n\n\
             Electric Kettle x2 - $79.98\n\
             Dishwasher x1 - $549.99\n\
             \nTotal: $629.97"
        );
    }

    #[test]
    fn test_message_total_excludes_shipping() {
        let cart = cart_with(&[(4, "Electric Kettle", 3999, 1)]);
        assert!(order_message(&cart).ends_with("Total: $39.99"));
        assert_eq!(cart.total().cents(), 4999);
    }

    #[test]
    fn test_whatsapp_link() {
        let cart = cart_with(&[(4, "Electric Kettle", 3999, 1)]);
        let settings = CheckoutSettings {
            phone_number: "+1 (234) 567-890".to_string(),
            base_url: "https://wa.me/".to_string(),
        };

        let url = whatsapp_link(&cart, &settings).unwrap();
        assert!(url.starts_with("https://wa.me/1234567890?text=Hello%2C%20I%20would"));
        assert!(url.contains("Electric%20Kettle%20x1%20-%20%2439.99%0A"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let result = checkout(&Cart::new(), &CheckoutSettings::default());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_checkout_rejects_missing_phone() {
        let cart = cart_with(&[(1, "Premium Refrigerator", 89999, 1)]);
        let settings = CheckoutSettings {
            phone_number: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(checkout(&cart, &settings), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(CheckoutSettings::default().validate().is_ok());
    }
}
