//! Cart Commands

use super::{build_request, read_json, send};
use crate::error::{CartError, CartResult};
use crate::models::{AddToCartRequest, AddToCartResponse, CartCount};

/// Current number of items in the session's cart
pub async fn fetch_cart_count(url: &str) -> CartResult<u32> {
    let request = build_request("GET", url, None)?;
    let response = send(&request).await?;
    if !response.ok() {
        return Err(CartError::Status(response.status()));
    }
    let body: CartCount = read_json(&response).await?;
    Ok(body.count)
}

/// Post an item to the cart.
///
/// An error status whose body is still a well-formed `success: false`
/// answer is returned as that answer, so its message reaches the user.
pub async fn add_to_cart(url: &str, item: &AddToCartRequest) -> CartResult<AddToCartResponse> {
    let body = serde_json::to_string(item).map_err(|e| CartError::Encode(e.to_string()))?;
    let request = build_request("POST", url, Some(&body))?;
    let response = send(&request).await?;
    if response.ok() {
        return read_json(&response).await;
    }
    let body = read_json::<AddToCartResponse>(&response).await;
    settle_error_status(response.status(), body)
}

/// Keep a `success: false` answer sent with an error status; anything else
/// is reported as the status itself.
fn settle_error_status(status: u16, body: CartResult<AddToCartResponse>) -> CartResult<AddToCartResponse> {
    match body {
        Ok(answer) if !answer.success => Ok(answer),
        _ => Err(CartError::Status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_body_survives_error_status() {
        let body = Ok(AddToCartResponse {
            success: false,
            message: Some("Out of stock".to_string()),
        });
        assert_eq!(
            settle_error_status(409, body),
            Ok(AddToCartResponse {
                success: false,
                message: Some("Out of stock".to_string()),
            })
        );
    }

    #[test]
    fn test_other_error_bodies_become_status() {
        let success = Ok(AddToCartResponse {
            success: true,
            message: None,
        });
        assert_eq!(settle_error_status(500, success), Err(CartError::Status(500)));

        let garbage = Err(CartError::Decode("<html>".to_string()));
        assert_eq!(settle_error_status(502, garbage), Err(CartError::Status(502)));
    }
}
