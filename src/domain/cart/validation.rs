//! Input checks run before any store or catalog call

use super::CartError;

/// Quantities must be strictly positive; nothing is clamped
pub fn validate_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity { quantity });
    }

    Ok(())
}

/// SKUs must contain at least one non-whitespace character
pub fn validate_sku(sku: &str) -> Result<(), CartError> {
    if sku.trim().is_empty() {
        return Err(CartError::InvalidSku);
    }

    Ok(())
}
