//! Wallet key file handling
//!
//! Solana CLI wallets are a JSON array of raw key bytes; the SDK client
//! consumes the base58-encoded form.

use crate::error::{DefikitError, DefikitResult};
use solana_sdk::signature::Keypair;
use std::fs;
use std::path::Path;

/// Read a Solana CLI wallet file and return the base58-encoded keypair.
pub fn wallet_json_to_base58(path: &Path) -> DefikitResult<String> {
    let contents = fs::read_to_string(path)?;
    let bytes: Vec<u8> = serde_json::from_str(&contents)?;
    Ok(bs58::encode(bytes).into_string())
}

/// Decode a base58-encoded keypair string.
pub fn keypair_from_base58(encoded: &str) -> DefikitResult<Keypair> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| DefikitError::WalletError(format!("Invalid base58 key: {}", e)))?;

    Keypair::try_from(bytes.as_slice())
        .map_err(|e| DefikitError::WalletError(format!("Invalid keypair bytes: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;
    use std::io::Write;

    #[test]
    fn wallet_file_round_trips_through_base58() {
        let keypair = Keypair::new();
        let bytes = keypair.to_bytes().to_vec();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&bytes).unwrap()).unwrap();

        let encoded = wallet_json_to_base58(file.path()).unwrap();
        let decoded = keypair_from_base58(&encoded).unwrap();

        assert_eq!(decoded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn missing_wallet_file_is_an_io_error() {
        let result = wallet_json_to_base58(Path::new("/nonexistent/wallet.json"));
        assert!(matches!(result, Err(DefikitError::IoError(_))));
    }

    #[test]
    fn garbage_base58_is_a_wallet_error() {
        let result = keypair_from_base58("not base58 at all!!");
        assert!(matches!(result, Err(DefikitError::WalletError(_))));
    }
}
