//! Message signing and signature verification primitives used for webhook
//! source verification.

use ring::hmac;

use crate::errors::{CryptoError, CustomResult};

/// Sign a message with a shared secret.
pub trait SignMessage: Send + Sync {
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Verify a signature over a message with a shared secret.
pub trait VerifySignature: Send + Sync {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// The trivial algorithm: signs nothing, accepts everything. Placeholder for
/// connectors whose webhooks carry no signature at all.
#[derive(Debug)]
pub struct NoAlgorithm;

impl SignMessage for NoAlgorithm {
    fn sign_message(
        &self,
        _secret: &[u8],
        _msg: &[u8],
    ) -> CustomResult<Vec<u8>, CryptoError> {
        Ok(Vec::new())
    }
}

impl VerifySignature for NoAlgorithm {
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        Ok(true)
    }
}

/// HMAC-SHA256. Verification is constant time, delegated to ring.
#[derive(Debug)]
pub struct HmacSha256;

impl SignMessage for HmacSha256 {
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }
}

impl VerifySignature for HmacSha256 {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::verify(&key, msg, signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn hmac_sha256_sign_and_verify_round_trip() {
        let secret = b"wh_secret";
        let message = b"orderReference=abc&eventId=LoanWasDisbursed";

        let signature = HmacSha256.sign_message(secret, message).unwrap();
        assert!(HmacSha256
            .verify_signature(secret, &signature, message)
            .unwrap());
    }

    #[test]
    fn hmac_sha256_rejects_tampered_message() {
        let secret = b"wh_secret";
        let signature = HmacSha256.sign_message(secret, b"original").unwrap();

        assert!(!HmacSha256
            .verify_signature(secret, &signature, b"tampered")
            .unwrap());
    }

    #[test]
    fn hmac_sha256_known_vector() {
        // RFC 4231 test case 2.
        let signature = HmacSha256
            .sign_message(b"Jefe", b"what do ya want for nothing?")
            .unwrap();
        assert_eq!(
            hex::encode(signature),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn no_algorithm_accepts_anything() {
        assert!(NoAlgorithm
            .verify_signature(b"", b"sig", b"msg")
            .unwrap());
    }
}
