//! 署名鍵
//!
//! セッションごとに生成する HMAC-SHA256 鍵。鍵バイト列は外部に出さない。

use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sealed_record_common::error::{AgentError, AgentResult};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 鍵長（バイト）。SHA-256のブロック長
pub const KEY_LENGTH: usize = 64;

/// 署名長（バイト）
pub const SIGNATURE_LENGTH: usize = 32;

/// セッション署名鍵
///
/// `sign` / `verify` のみを提供し、鍵素材を取り出す手段はない。
pub struct SigningKey {
    mac: HmacSha256,
}

impl SigningKey {
    /// OS乱数源から新しい鍵を生成
    pub fn generate() -> AgentResult<Self> {
        Self::generate_from(&mut OsRng)
    }

    /// 指定した乱数源から新しい鍵を生成
    ///
    /// 乱数源が失敗した場合は `AgentError::KeyGeneration`（セッション継続不可）。
    pub fn generate_from<R: RngCore + ?Sized>(rng: &mut R) -> AgentResult<Self> {
        let mut bytes = [0u8; KEY_LENGTH];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| AgentError::KeyGeneration(e.to_string()))?;
        let mac = HmacSha256::new_from_slice(&bytes)
            .map_err(|e| AgentError::KeyGeneration(e.to_string()))?;
        Ok(Self { mac })
    }

    /// メッセージに署名
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let mut mac = self.mac.clone();
        mac.update(message);
        let bytes = mac.finalize().into_bytes();
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&bytes);
        signature
    }

    /// 署名を検証（定数時間比較）
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(signature).is_ok()
    }

    /// 文字列のUTF-8バイト列に署名し、16進文字列で返す
    pub fn sign_hex(&self, data: &str) -> String {
        encode_signature(&self.sign(data.as_bytes()))
    }

    /// 16進署名を検証
    ///
    /// 奇数長・非16進文字・空文字列は検証失敗として扱う。
    pub fn verify_hex(&self, data: &str, signature_hex: &str) -> bool {
        match decode_signature(signature_hex) {
            Some(signature) => self.verify(data.as_bytes(), &signature),
            None => false,
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &"HMAC-SHA256")
            .finish_non_exhaustive()
    }
}

/// 署名を小文字16進文字列に変換
pub fn encode_signature(signature: &[u8]) -> String {
    hex::encode(signature)
}

/// 16進文字列を署名バイト列に戻す（不正な入力は `None`）
pub fn decode_signature(signature_hex: &str) -> Option<Vec<u8>> {
    if signature_hex.is_empty() {
        return None;
    }
    hex::decode(signature_hex).ok()
}
