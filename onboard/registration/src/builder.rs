use crate::{BuildError, FeeSchedule, PayloadShape, ProtocolVersion, RegistrationPayload};
use alloy::primitives::{Address, U256};
use quorum::{QuorumSelector, QuorumSnapshot};
use ssv_types::{SecretId, ValidatorSecret};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Inputs that fully determine a payload
#[derive(Clone, Debug, PartialEq, Eq)]
struct MemoKey {
    secret: SecretId,
    quorum: QuorumSnapshot,
    fees: FeeSchedule,
    protocol: ProtocolVersion,
    owner: Address,
}

// Scrubs the secret when dropped unless disarmed, so every early return wipes it
struct ScrubOnError<'a> {
    secret: &'a mut ValidatorSecret,
    armed: bool,
}

impl<'a> ScrubOnError<'a> {
    fn new(secret: &'a mut ValidatorSecret) -> Self {
        Self {
            secret,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ScrubOnError<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(secret = %self.secret.id(), "Scrubbing validator secret after failed build");
            self.secret.scrub();
        }
    }
}

/// Builds registration payloads and remembers the last one.
///
/// Splitting is randomised, so building twice from the same inputs would produce different share
/// material. The builder returns the cached payload for as long as the secret, the quorum, the fee
/// schedule, the protocol and the owner stay the same.
#[derive(Debug)]
pub struct PayloadBuilder {
    protocol: ProtocolVersion,
    fees: FeeSchedule,
    memo: Option<(MemoKey, Arc<RegistrationPayload>)>,
}

impl PayloadBuilder {
    pub fn new(protocol: ProtocolVersion, fees: FeeSchedule) -> Self {
        Self {
            protocol,
            fees,
            memo: None,
        }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Replaces the fee schedule. A cached payload built with different fees is not reused.
    pub fn set_fees(&mut self, fees: FeeSchedule) {
        self.fees = fees;
    }

    /// The last successfully built payload
    pub fn cached(&self) -> Option<Arc<RegistrationPayload>> {
        self.memo.as_ref().map(|(_, payload)| payload.clone())
    }

    pub fn invalidate(&mut self) {
        if self.memo.take().is_some() {
            debug!("Invalidated cached payload");
        }
    }

    /// Builds the registration payload for `secret` and the operators selected in `quorum`.
    ///
    /// Fails without touching the secret if the quorum is not met. Any later failure scrubs the
    /// secret before returning, and nothing is cached.
    pub fn build(
        &mut self,
        secret: &mut ValidatorSecret,
        quorum: &QuorumSelector,
        owner: Address,
    ) -> Result<Arc<RegistrationPayload>, BuildError> {
        if !quorum.is_quorum_met() {
            return Err(BuildError::QuorumNotMet {
                selected: quorum.selected_count(),
                required: quorum.min_operators(),
            });
        }

        let key = MemoKey {
            secret: secret.id(),
            quorum: quorum.snapshot(),
            fees: self.fees,
            protocol: self.protocol,
            owner,
        };
        if let Some((cached_key, payload)) = &self.memo {
            if *cached_key == key {
                debug!(secret = %key.secret, "Reusing cached payload");
                return Ok(payload.clone());
            }
        }
        self.memo = None;

        let guard = ScrubOnError::new(secret);
        let payload = match self.assemble(guard.secret, quorum, owner) {
            Ok(payload) => Arc::new(payload),
            Err(e) => {
                error!(
                    error = %e,
                    kind = ?e.kind(),
                    operators = ?quorum.operator_public_keys(),
                    "Failed to build registration payload"
                );
                return Err(e);
            }
        };
        guard.disarm();

        debug!(
            validator = %payload.validator_public_key,
            operators = payload.operator_public_keys.len(),
            protocol = %self.protocol,
            "Built registration payload"
        );
        self.memo = Some((key, payload.clone()));
        Ok(payload)
    }

    fn assemble(
        &self,
        secret: &ValidatorSecret,
        quorum: &QuorumSelector,
        owner: Address,
    ) -> Result<RegistrationPayload, BuildError> {
        let operators = quorum.operator_public_keys();
        let bound = keysplit::split_for_operators(secret, &operators)?;
        let validator_public_key = keysplit::validator_public_key(secret)?;
        let encrypted_shares = keysplit::encrypt_bound(&bound)?;
        let share_public_keys = bound.iter().map(|b| b.share.share_pubkey).collect();
        drop(bound);

        let shape = match self.protocol {
            ProtocolVersion::Legacy => PayloadShape::Legacy { owner },
            ProtocolVersion::Current => PayloadShape::Current {
                amount: self.registration_cost(quorum)?,
            },
        };

        Ok(RegistrationPayload {
            validator_public_key,
            operator_public_keys: operators,
            share_public_keys,
            encrypted_shares,
            shape,
        })
    }

    /// Funding required for the operators currently selected in `quorum`
    pub fn registration_cost(&self, quorum: &QuorumSelector) -> Result<U256, BuildError> {
        self.fees
            .registration_cost(quorum.selected().map(|selected| selected.operator.fee))
            .ok_or_else(|| BuildError::Fee("registration cost overflows".to_string()))
    }
}
