use crate::error::EncryptError;
use crate::split::BoundShare;
use openssl::pkey::Private;
use openssl::rsa::{Padding, Rsa};
use ssv_types::util::decode_hex;
use ssv_types::{EncryptedShare, OperatorPublicKey, Share, ShareSecret, SHARE_KEY_LENGTH};
use tracing::debug;
use zeroize::Zeroizing;

/// Encrypts `shares[i]` to `recipients[i]`.
///
/// Pairing is strictly positional. Nothing is returned unless every share was encrypted.
pub fn encrypt(
    shares: &[Share],
    recipients: &[OperatorPublicKey],
) -> Result<Vec<EncryptedShare>, EncryptError> {
    if shares.len() != recipients.len() {
        return Err(EncryptError::LengthMismatch {
            shares: shares.len(),
            recipients: recipients.len(),
        });
    }

    shares
        .iter()
        .zip(recipients)
        .map(|(share, recipient)| encrypt_share(share, recipient))
        .collect()
}

/// Encrypts every share to the operator it was bound to when the key was split.
pub fn encrypt_bound(bound: &[BoundShare]) -> Result<Vec<EncryptedShare>, EncryptError> {
    let encrypted = bound
        .iter()
        .map(|entry| encrypt_share(&entry.share, &entry.operator))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(shares = encrypted.len(), "Encrypted shares to operators");
    Ok(encrypted)
}

/// Encrypts a single share to an operator's RSA key with PKCS#1 v1.5 padding.
///
/// The plaintext is the `0x` prefixed hex encoding of the share key, which is what operator nodes
/// expect to find after decryption.
pub fn encrypt_share(
    share: &Share,
    recipient: &OperatorPublicKey,
) -> Result<EncryptedShare, EncryptError> {
    let rsa_pubkey = recipient
        .to_rsa()
        .map_err(EncryptError::InvalidRecipientKey)?;

    let plaintext = Zeroizing::new(format!("0x{}", hex::encode(share.secret.expose())));
    let mut ciphertext = vec![0u8; rsa_pubkey.size() as usize];
    let length = rsa_pubkey
        .public_encrypt(plaintext.as_bytes(), &mut ciphertext, Padding::PKCS1)
        .map_err(|e| EncryptError::Crypto(format!("share {}: {}", share.index, e)))?;
    ciphertext.truncate(length);

    Ok(EncryptedShare {
        operator: recipient.clone(),
        share_pubkey: share.share_pubkey,
        encrypted_private_key: ciphertext,
    })
}

/// Decrypts a share with the operator's private key. This is the operator side of
/// [`encrypt_share`].
pub fn decrypt_share(
    encrypted_private_key: &[u8],
    operator_key: &Rsa<Private>,
) -> Result<ShareSecret, EncryptError> {
    let mut plaintext = Zeroizing::new(vec![0u8; operator_key.size() as usize]);
    let length = operator_key
        .private_decrypt(encrypted_private_key, &mut plaintext, Padding::PKCS1)
        .map_err(|e| EncryptError::Crypto(format!("Unable to decrypt share: {}", e)))?;

    let encoded = std::str::from_utf8(&plaintext[..length])
        .map_err(|e| EncryptError::Crypto(format!("Share is not valid utf8: {}", e)))?;
    let bytes = Zeroizing::new(decode_hex(encoded).map_err(EncryptError::Crypto)?);
    let key: [u8; SHARE_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        EncryptError::Crypto(format!("Share key has wrong length: {}", bytes.len()))
    })?;
    Ok(ShareSecret::new(key))
}
