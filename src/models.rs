//! Cart Wire Models
//!
//! JSON bodies exchanged with the cart endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};

/// `GET /api/cart/count` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartCount {
    pub count: u32,
}

/// `POST /cart/add` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartRequest {
    pub book_id: String,
    pub quantity: u32,
}

impl AddToCartRequest {
    /// Add-to-cart buttons always add a single copy
    pub fn single(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            quantity: 1,
        }
    }
}

/// `POST /cart/add` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddToCartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AddToCartResponse {
    /// `success: false` becomes [`CartError::Rejected`] carrying the server message
    pub fn into_result(self) -> CartResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(CartError::Rejected(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_request_body() {
        let body = serde_json::to_value(AddToCartRequest::single("42")).unwrap();
        assert_eq!(body, json!({ "book_id": "42", "quantity": 1 }));
    }

    #[test]
    fn test_add_response_message_optional() {
        let ok: AddToCartResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.message, None);

        let rejected: AddToCartResponse =
            serde_json::from_str(r#"{"success": false, "message": "Out of stock"}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.message.as_deref(), Some("Out of stock"));
    }

    #[test]
    fn test_rejection_keeps_message() {
        let rejected = AddToCartResponse {
            success: false,
            message: Some("Out of stock".to_string()),
        };
        assert_eq!(
            rejected.into_result(),
            Err(CartError::Rejected(Some("Out of stock".to_string())))
        );
    }

    #[test]
    fn test_cart_count_rejects_negative() {
        assert_eq!(
            serde_json::from_str::<CartCount>(r#"{"count": 3}"#).unwrap(),
            CartCount { count: 3 }
        );
        assert!(serde_json::from_str::<CartCount>(r#"{"count": -1}"#).is_err());
    }
}
