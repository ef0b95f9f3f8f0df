//! Source decoding with BOM handling and encoding detection.
//!
//! Requests carry the source as JSON text, so bytes that are not UTF-8 are
//! decoded rather than rejected:
//! - UTF-8 fast path, byte-for-byte (a UTF-8 BOM is kept)
//! - UTF-16 LE/BE via BOM
//! - Fallback encoding detection using chardetng
//! - Lossy UTF-8 with replacement characters as a last resort

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

const SAMPLE_SIZE: usize = 8192;

/// Decode source bytes into text.
pub fn decode_source(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    if looks_binary(bytes) {
        tracing::warn!("Source looks binary; sending it with replacement characters");
        return String::from_utf8_lossy(bytes).into_owned();
    }

    let encoding = detect_encoding(bytes);
    tracing::debug!("Decoding source as {}", encoding.name());
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    let guess = detector.guess(None, true);
    // A UTF-8 guess here means the input was not valid UTF-8 after all.
    if guess == UTF_8 {
        encoding_rs::WINDOWS_1252
    } else {
        guess
    }
}

/// Null bytes or fewer than 70% printable bytes in the leading sample.
fn looks_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let printable = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b == 9 || b == 10 || b == 13 || b >= 0x80)
        .count();
    (printable as f64 / sample.len() as f64) < 0.70
}
