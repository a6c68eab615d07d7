use sha2::{Digest, Sha256};
use sku_model::Inventory;

use crate::error::{Result, StoreError};

/// SHA-256 (lowercase hex) of the canonical compact JSON of a snapshot.
///
/// Two inventories with the same fingerprint produce identical SKUs and
/// matrices.
pub fn fingerprint(inventory: &Inventory) -> Result<String> {
    let bytes = serde_json::to_vec(&inventory.to_raw())
        .map_err(|source| StoreError::Serialization { source })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
