// Generator functions for test data
pub mod generators {
    // Generate random operators backed by fresh RSA keys
    pub mod operator {
        use crate::{OperatorDescriptor, OperatorPublicKey};
        use alloy::primitives::{Address, U256};
        use openssl::pkey::Private;
        use openssl::rsa::Rsa;

        const RSA_KEY_SIZE: u32 = 2048;

        // A random operator together with the private key needed to decrypt its shares
        pub fn random(id: u8) -> (OperatorDescriptor, Rsa<Private>) {
            let private = Rsa::generate(RSA_KEY_SIZE).expect("Failed to generate rsa key");
            let pem = private
                .public_key_to_pem()
                .expect("Failed to export public key");
            let public = Rsa::public_key_from_pem(&pem).expect("Failed to build public key");
            let public_key = OperatorPublicKey::from_rsa(&public).expect("Failed to encode key");
            let descriptor = OperatorDescriptor::new(public_key, format!("operator {id}"))
                .with_owner(Address::repeat_byte(id))
                .with_fee(U256::from(id) * U256::from(1_000_000_000u64));
            (descriptor, private)
        }

        // Operators with a fixed fee and opaque keys, for tests that never encrypt
        pub fn with_fee(id: u8, fee: U256) -> OperatorDescriptor {
            OperatorDescriptor::new(
                OperatorPublicKey::new(format!("operator-key-{id}")),
                format!("operator {id}"),
            )
            .with_fee(fee)
        }
    }

    pub mod secret {
        use crate::ValidatorSecret;
        use rand::Rng;

        // A random secret that is always a valid scalar
        pub fn random() -> ValidatorSecret {
            let mut bytes: [u8; 32] = rand::thread_rng().gen();
            // Keep below the field modulus
            bytes[0] &= 0x3f;
            bytes[31] |= 0x01;
            ValidatorSecret::from_bytes(bytes.to_vec())
        }
    }
}
