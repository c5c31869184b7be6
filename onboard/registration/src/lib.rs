//! Assembly of the network contract calls that register validators and operators.

pub use builder::PayloadBuilder;
pub use encoding::{
    decode_encrypted_key, decode_operator_key, encode_encrypted_key, encode_operator_key,
};
pub use error::{BuildError, ErrorKind, ReadError};
pub use fee::{FeeSchedule, DEFAULT_BLOCKS_PER_YEAR};
pub use gen::SSVNetwork;
pub use operator::OperatorRegistration;
pub use payload::{PayloadShape, RegistrationPayload};
pub use protocol::ProtocolVersion;
pub use reader::{is_operator_registrable, ContractReader, NetworkReader};

mod builder;
mod encoding;
mod error;
mod fee;
mod gen;
mod operator;
mod payload;
mod protocol;
mod reader;
