//! Deterministic cipher for user PII columns.
//!
//! Names, emails and phone numbers are stored encrypted with AES-256 in ECB
//! mode (PKCS#7 padding, base64 output). The key is the SHA-256 digest of a
//! single secret. Identical plaintexts produce identical ciphertexts, which is
//! what lets the users table keep a unique index on the encrypted email; it
//! also means this is obfuscation, not confidentiality against an attacker
//! who can see the table.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, Key, KeyInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

/// AES-256-ECB field cipher keyed from a secret string.
#[derive(Clone)]
pub struct PiiCipher {
    key: Key<Aes256>,
}

impl std::fmt::Debug for PiiCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiiCipher").finish_non_exhaustive()
    }
}

impl PiiCipher {
    /// Derive the 256-bit key as `SHA-256(secret)`.
    pub fn new(secret: &str) -> Self {
        Self {
            key: Sha256::digest(secret.as_bytes()),
        }
    }

    /// Encrypt a UTF-8 string to base64.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let data =
            Aes256EcbEnc::new(&self.key).encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        STANDARD.encode(data)
    }

    /// Decrypt a base64 ciphertext produced by [`PiiCipher::encrypt`].
    pub fn decrypt(&self, encoded: &str) -> Result<String, CoreError> {
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CoreError::Internal(format!("Ciphertext is not valid base64: {e}")))?;
        if data.is_empty() {
            return Err(CoreError::Internal("Ciphertext is empty".to_string()));
        }

        let plain = Aes256EcbDec::new(&self.key)
            .decrypt_padded_vec_mut::<Pkcs7>(&data)
            .map_err(|_| {
                CoreError::Internal("Ciphertext has a bad length or padding".to_string())
            })?;

        String::from_utf8(plain)
            .map_err(|e| CoreError::Internal(format!("Decrypted value is not UTF-8: {e}")))
    }

    pub fn encrypt_opt(&self, plaintext: Option<&str>) -> Option<String> {
        plaintext.map(|p| self.encrypt(p))
    }

    pub fn decrypt_opt(&self, encoded: Option<&str>) -> Result<Option<String>, CoreError> {
        encoded.map(|e| self.decrypt(e)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decrypt_recovers_plaintext() {
        let cipher = PiiCipher::new("s3cret");
        let encrypted = cipher.encrypt("jane.doe@example.com");
        assert_ne!(encrypted, "jane.doe@example.com");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "jane.doe@example.com");
    }

    #[test]
    fn encryption_is_deterministic() {
        let cipher = PiiCipher::new("s3cret");
        assert_eq!(cipher.encrypt("Jane"), cipher.encrypt("Jane"));
    }

    #[test]
    fn different_secrets_give_different_ciphertexts() {
        let a = PiiCipher::new("one");
        let b = PiiCipher::new("two");
        assert_ne!(a.encrypt("Jane"), b.encrypt("Jane"));
    }

    #[test]
    fn exact_block_input_gets_a_full_padding_block() {
        let cipher = PiiCipher::new("s3cret");
        let raw = STANDARD.decode(cipher.encrypt("0123456789abcdef")).unwrap();
        assert_eq!(raw.len(), 32);
        let raw = STANDARD.decode(cipher.encrypt("")).unwrap();
        assert_eq!(raw.len(), 16);
    }

    #[test]
    fn multibyte_text_survives() {
        let cipher = PiiCipher::new("s3cret");
        let encrypted = cipher.encrypt("José Müller");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "José Müller");
    }

    #[test]
    fn wrong_key_fails_or_garbles() {
        let encrypted = PiiCipher::new("one").encrypt("Jane");
        let result = PiiCipher::new("two").decrypt(&encrypted);
        assert!(result.map(|s| s != "Jane").unwrap_or(true));
    }

    #[test]
    fn malformed_ciphertexts_are_rejected() {
        let cipher = PiiCipher::new("s3cret");
        assert_matches!(cipher.decrypt("not base64!"), Err(CoreError::Internal(_)));
        assert_matches!(cipher.decrypt(&STANDARD.encode([1u8; 5])), Err(CoreError::Internal(_)));
        assert_matches!(cipher.decrypt(""), Err(CoreError::Internal(_)));
    }

    #[test]
    fn truncated_or_tampered_ciphertexts_are_rejected() {
        let cipher = PiiCipher::new("s3cret");
        let mut raw = STANDARD.decode(cipher.encrypt("jane.doe@example.com")).unwrap();
        raw.truncate(raw.len() - 1);
        assert_matches!(cipher.decrypt(&STANDARD.encode(&raw)), Err(CoreError::Internal(_)));

        // An all-zero plaintext block ends in pad byte 0, which is never valid.
        let forged = Aes256EcbEnc::new(&cipher.key)
            .encrypt_padded_vec_mut::<aes::cipher::block_padding::NoPadding>(&[0u8; 16]);
        assert_matches!(cipher.decrypt(&STANDARD.encode(forged)), Err(CoreError::Internal(_)));
    }

    #[test]
    fn optional_helpers_pass_none_through() {
        let cipher = PiiCipher::new("s3cret");
        assert_eq!(cipher.encrypt_opt(None), None);
        assert_eq!(cipher.decrypt_opt(None).unwrap(), None);
        let enc = cipher.encrypt_opt(Some("555"));
        assert_eq!(cipher.decrypt_opt(enc.as_deref()).unwrap().as_deref(), Some("555"));
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let rendered = format!("{:?}", PiiCipher::new("s3cret"));
        assert_eq!(rendered, "PiiCipher { .. }");
    }
}
