use crate::error::{DataCraftError, Result};
use hex;

pub fn parse_hex_array<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    let bytes = hex::decode(hex_str.trim())
        .map_err(|e| DataCraftError::Format(format!("invalid hex: {e}")))?;
    if bytes.len() != N {
        return Err(DataCraftError::Format(format!(
            "expected {N} bytes ({} hex chars), got {}",
            N * 2,
            bytes.len()
        )));
    }
    out.copy_from_slice(&bytes);
    Ok(out)
}
