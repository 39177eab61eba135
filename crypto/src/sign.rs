//! Ed25519 message signing and verification.

use airmile_types::{PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `false` for malformed keys as well as bad signatures.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{keypair_from_name, keypair_from_seed};

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_name("Alice");
        let msg = b"transaction id bytes";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = keypair_from_name("Alice");
        let sig = sign_message(b"correct message", &kp.private);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let alice = keypair_from_name("Alice");
        let bob = keypair_from_name("Bob");
        let sig = sign_message(b"test", &alice.private);
        assert!(!verify_signature(b"test", &sig, &bob.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let sig1 = sign_message(b"deterministic", &kp.private);
        let sig2 = sign_message(b"deterministic", &kp.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn invalid_public_key() {
        let kp = keypair_from_name("Alice");
        let sig = sign_message(b"test", &kp.private);
        assert!(!verify_signature(b"test", &sig, &PublicKey([0xFF; 32])));
    }
}
