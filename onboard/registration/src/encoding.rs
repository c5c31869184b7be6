use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;
use base64::prelude::*;
use ssv_types::OperatorPublicKey;

// Operator keys are stored on chain as the ABI encoding of their base64 PEM string
pub fn encode_operator_key(key: &OperatorPublicKey) -> Bytes {
    key.as_str().to_string().abi_encode().into()
}

pub fn decode_operator_key(data: &[u8]) -> Result<OperatorPublicKey, String> {
    String::abi_decode(data, true)
        .map(OperatorPublicKey::new)
        .map_err(|e| format!("Failed to decode operator key: {}", e))
}

// Encrypted share keys travel as the ABI encoding of the base64 ciphertext
pub fn encode_encrypted_key(ciphertext: &[u8]) -> Bytes {
    BASE64_STANDARD.encode(ciphertext).abi_encode().into()
}

pub fn decode_encrypted_key(data: &[u8]) -> Result<Vec<u8>, String> {
    let encoded = String::abi_decode(data, true)
        .map_err(|e| format!("Failed to decode encrypted key: {}", e))?;
    BASE64_STANDARD
        .decode(encoded)
        .map_err(|e| format!("Encrypted key is not valid base64: {}", e))
}
