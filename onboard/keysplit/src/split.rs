use crate::bls::{public_key, scalar_from_be_bytes, scalar_to_be_bytes};
use crate::error::SplitError;
use ark_bls12_381::Fr;
use ark_ff::{Field, One, Zero};
use ark_std::UniformRand;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use ssv_types::{
    BlsPublicKey, OperatorPublicKey, Share, ShareSecret, ValidatorSecret, SECRET_KEY_LENGTH,
};
use std::collections::HashSet;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// A share together with the operator it is destined for.
#[derive(Debug, Clone)]
pub struct BoundShare {
    pub operator: OperatorPublicKey,
    pub share: Share,
}

/// Number of shares required to reproduce the key when it is split into `share_count` shares.
///
/// This is the committee quorum: `n - f` where `f = (n - 1) / 3` faulty operators are tolerated.
pub fn threshold_for(share_count: usize) -> usize {
    share_count - share_count.saturating_sub(1) / 3
}

/// Public key of a validator secret
pub fn validator_public_key(secret: &ValidatorSecret) -> Result<BlsPublicKey, SplitError> {
    let scalar = read_secret(secret)?;
    public_key(&scalar).map_err(SplitError::Crypto)
}

/// Splits the secret into `share_count` shares using the operating system's randomness.
pub fn split(secret: &ValidatorSecret, share_count: usize) -> Result<Vec<Share>, SplitError> {
    split_with_rng(secret, share_count, &mut OsRng)
}

/// Splits the secret into `share_count` shares. Shares are indexed `1..=share_count`, in order.
///
/// Every invocation draws a fresh random polynomial, so two splits of the same key share nothing
/// but the validator public key.
pub fn split_with_rng<R: RngCore + CryptoRng>(
    secret: &ValidatorSecret,
    share_count: usize,
    rng: &mut R,
) -> Result<Vec<Share>, SplitError> {
    let scalar = read_secret(secret)?;
    if share_count < 1 {
        return Err(SplitError::InvalidCount(share_count));
    }

    let threshold = threshold_for(share_count);

    // f(x) = secret + a_1 * x + ... + a_{t-1} * x^{t-1}, wiped on every exit
    let mut coefficients: Zeroizing<Vec<Fr>> = Zeroizing::new(Vec::with_capacity(threshold));
    coefficients.push(*scalar);
    coefficients.extend((1..threshold).map(|_| Fr::rand(rng)));

    let mut shares = Vec::with_capacity(share_count);
    let mut seen = HashSet::with_capacity(share_count);
    for index in 1..=share_count as u64 {
        let value = Zeroizing::new(evaluate(&coefficients, Fr::from(index)));
        if value.is_zero() {
            return Err(SplitError::Crypto(format!(
                "share {} evaluated to zero",
                index
            )));
        }

        let share_pubkey = public_key(&value).map_err(SplitError::Crypto)?;
        if !seen.insert(share_pubkey) {
            return Err(SplitError::Crypto(format!(
                "share {} duplicates the public key of an earlier share",
                index
            )));
        }

        let mut encoded = scalar_to_be_bytes(&value);
        shares.push(Share {
            index,
            share_pubkey,
            secret: ShareSecret::new(encoded),
        });
        encoded.zeroize();
    }

    debug!(shares = share_count, threshold, "Split validator key");
    Ok(shares)
}

/// Splits the secret into one share per operator, share `i` bound to `operators[i]`.
pub fn split_for_operators(
    secret: &ValidatorSecret,
    operators: &[OperatorPublicKey],
) -> Result<Vec<BoundShare>, SplitError> {
    let shares = split(secret, operators.len())?;
    Ok(operators
        .iter()
        .cloned()
        .zip(shares)
        .map(|(operator, share)| BoundShare { operator, share })
        .collect())
}

/// Recovers the secret from at least `threshold` shares by Lagrange interpolation at zero.
pub fn reconstruct(shares: &[Share], threshold: usize) -> Result<ValidatorSecret, SplitError> {
    if threshold == 0 || shares.len() < threshold {
        return Err(SplitError::InvalidCount(shares.len()));
    }
    let shares = &shares[..threshold];

    let points = shares
        .iter()
        .map(|share| {
            let y = scalar_from_be_bytes(share.secret.expose())
                .map_err(|e| SplitError::InvalidSecret(format!("share {}: {}", share.index, e)))?;
            Ok((Fr::from(share.index), y))
        })
        .collect::<Result<Vec<_>, SplitError>>()?;

    let mut secret = Zeroizing::new(Fr::zero());
    for (i, (xi, yi)) in points.iter().enumerate() {
        // L_i(0) = prod_{j != i} x_j / (x_j - x_i)
        let mut numerator = Fr::one();
        let mut denominator = Fr::one();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i != j {
                numerator *= xj;
                denominator *= *xj - xi;
            }
        }
        let inverse = denominator.inverse().ok_or_else(|| {
            SplitError::InvalidSecret("shares with duplicate indices".to_string())
        })?;
        *secret += *yi * numerator * inverse;
    }

    let mut bytes = scalar_to_be_bytes(&secret);
    let recovered = ValidatorSecret::from_bytes(bytes.to_vec());
    bytes.zeroize();
    Ok(recovered)
}

fn read_secret(secret: &ValidatorSecret) -> Result<Zeroizing<Fr>, SplitError> {
    if secret.is_scrubbed() {
        return Err(SplitError::InvalidSecret(
            "secret has already been scrubbed".to_string(),
        ));
    }
    if secret.expose().len() != SECRET_KEY_LENGTH {
        return Err(SplitError::InvalidSecret(format!(
            "expected {} bytes, got {}",
            SECRET_KEY_LENGTH,
            secret.expose().len()
        )));
    }
    scalar_from_be_bytes(secret.expose())
        .map(Zeroizing::new)
        .map_err(SplitError::InvalidSecret)
}

// Horner evaluation of the polynomial at `x`
fn evaluate(coefficients: &[Fr], x: Fr) -> Fr {
    coefficients
        .iter()
        .rev()
        .fold(Fr::zero(), |acc, coefficient| acc * x + coefficient)
}
