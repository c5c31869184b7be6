//! The few BLS12-381 conversions needed on top of arkworks.
use ark_bls12_381::{Fr, G1Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInt, BigInteger, PrimeField, Zero};
use ark_serialize::CanonicalSerialize;
use ssv_types::{BlsPublicKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use zeroize::Zeroize;

/// Reads a big endian secret key into a scalar. Rejects keys outside `[1, r)`.
pub(crate) fn scalar_from_be_bytes(bytes: &[u8]) -> Result<Fr, String> {
    if bytes.len() != SECRET_KEY_LENGTH {
        return Err(format!(
            "expected {} bytes, got {}",
            SECRET_KEY_LENGTH,
            bytes.len()
        ));
    }

    // rchunks yields the least significant limb first
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
        word.zeroize();
    }
    let scalar = Fr::from_bigint(BigInt::new(limbs));
    limbs.zeroize();

    match scalar {
        None => Err("key exceeds the curve order".to_string()),
        Some(scalar) if scalar.is_zero() => Err("key is zero".to_string()),
        Some(scalar) => Ok(scalar),
    }
}

/// Big endian encoding of a scalar, the format of an Ethereum secret key
pub(crate) fn scalar_to_be_bytes(scalar: &Fr) -> [u8; SECRET_KEY_LENGTH] {
    let mut encoded = scalar.into_bigint().to_bytes_be();
    let mut bytes = [0u8; SECRET_KEY_LENGTH];
    bytes.copy_from_slice(&encoded);
    encoded.zeroize();
    bytes
}

/// The public key `g1 * scalar`
pub(crate) fn public_key(scalar: &Fr) -> Result<BlsPublicKey, String> {
    let point = (G1Affine::generator() * scalar).into_affine();
    compress(&point)
}

/// Compressed encoding of a G1 point. arkworks writes BLS12-381 points in the ZCash format used
/// on Ethereum, flag bits included.
pub(crate) fn compress(point: &G1Affine) -> Result<BlsPublicKey, String> {
    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    point
        .serialize_compressed(&mut bytes[..])
        .map_err(|e| format!("failed to compress point: {}", e))?;
    Ok(BlsPublicKey(bytes))
}
