pub use call::ContractCall;
pub use operator::{OperatorDescriptor, OperatorPublicKey};
pub use secret::{Password, SecretError, SecretId, ValidatorSecret, SECRET_KEY_LENGTH};
pub use share::{
    BlsPublicKey, EncryptedShare, Share, ShareSecret, PUBLIC_KEY_LENGTH, SHARE_KEY_LENGTH,
};
pub use slot::Slot;
mod call;
mod operator;
mod secret;
mod share;
mod slot;
pub mod util;
#[cfg(feature = "test_utils")]
pub mod test_utils;
