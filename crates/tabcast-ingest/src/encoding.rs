//! Encoding detection and decoding.
//!
//! Detection never fails: when every strict decode attempt comes up empty
//! the bytes are decoded as UTF-8 with replacement characters, because
//! partially garbled text is preferred over blocking the conversion.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};

/// Result of decoding raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Name of the encoding that produced `text`.
    pub encoding: String,
    /// True when undecodable bytes were replaced.
    pub lossy: bool,
}

/// Decodes raw bytes into text, guessing the encoding.
///
/// Order of attempts:
/// 1. A BOM, when present, decides the encoding outright.
/// 2. Strict UTF-8 (covers ASCII and well-formed UTF-8, the
///    high-confidence cases).
/// 3. The statistical detector's guess, kept only if it strict-decodes
///    the full buffer.
/// 4. A fixed fallback ladder: UTF-16LE, UTF-16BE, windows-1252.
/// 5. Lossy UTF-8 as the last resort.
pub fn decode_bytes(bytes: &[u8]) -> Decoded {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
        if !had_errors {
            return Decoded {
                text: text.into_owned(),
                encoding: encoding.name().to_string(),
                lossy: false,
            };
        }
    }

    if let Some(text) = strict_decode(UTF_8, bytes) {
        return text;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    if let Some(text) = strict_decode(guessed, bytes) {
        return text;
    }

    for encoding in [UTF_16LE, UTF_16BE, WINDOWS_1252] {
        if let Some(text) = strict_decode(encoding, bytes) {
            return text;
        }
    }

    tracing::warn!("encoding detection failed, decoding as lossy UTF-8");
    let (text, _, _) = UTF_8.decode(bytes);
    Decoded {
        text: text.into_owned(),
        encoding: UTF_8.name().to_string(),
        lossy: true,
    }
}

fn strict_decode(encoding: &'static Encoding, bytes: &[u8]) -> Option<Decoded> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| Decoded {
            text: text.into_owned(),
            encoding: encoding.name().to_string(),
            lossy: false,
        })
}
