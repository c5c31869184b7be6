use base64::prelude::*;
use openssl::pkey::Public;
use openssl::rsa::Rsa;

// Parse from a RSA public key string into the associated RSA representation
pub fn parse_rsa(pem_data: &str) -> Result<Rsa<Public>, String> {
    // First decode the base64 data
    let pem_decoded = BASE64_STANDARD
        .decode(pem_data.trim())
        .map_err(|e| format!("Unable to decode base64 pem data: {}", e))?;

    // Convert the decoded data to a string
    let pem_string = String::from_utf8(pem_decoded)
        .map_err(|e| format!("Unable to convert decoded pem data into a string: {}", e))?;

    // Operators publish PKCS1 headers around a PKCS8 body, so normalise the header first
    let pem_string = pem_string
        .replace(
            "-----BEGIN RSA PUBLIC KEY-----",
            "-----BEGIN PUBLIC KEY-----",
        )
        .replace("-----END RSA PUBLIC KEY-----", "-----END PUBLIC KEY-----");

    Rsa::public_key_from_pem(pem_string.as_bytes())
        .map_err(|e| format!("Failed to parse RSA public key: {}", e))
}

// Encode an RSA public key the way operators publish it: base64 of a PEM document carrying the
// PKCS1 style header.
pub fn encode_rsa(rsa_pubkey: &Rsa<Public>) -> Result<String, String> {
    let pem = rsa_pubkey
        .public_key_to_pem()
        .map_err(|e| format!("Failed to encode RSA public key: {}", e))?;
    let pem_string = String::from_utf8(pem)
        .map_err(|e| format!("Unable to convert pem data into a string: {}", e))?
        .replace("-----BEGIN PUBLIC KEY-----", "-----BEGIN RSA PUBLIC KEY-----")
        .replace("-----END PUBLIC KEY-----", "-----END RSA PUBLIC KEY-----");
    Ok(BASE64_STANDARD.encode(pem_string))
}

// Strip an optional 0x prefix and decode a hex string
pub fn decode_hex(data: &str) -> Result<Vec<u8>, String> {
    let trimmed = data.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(stripped).map_err(|e| format!("Invalid hex data: {}", e))
}
