//! Fixed-width text codec
//!
//! Text is stored as raw UTF-8 split into 16-byte chunks, the last one
//! zero padded. There is no length prefix; decoding recovers the text by
//! dropping padding and anything non-printable.

use crate::constants::BLOCK_SIZE;

/// One block worth of payload
pub type Chunk = [u8; BLOCK_SIZE];

/// An all-zero block
pub const EMPTY_CHUNK: Chunk = [0; BLOCK_SIZE];

/// Payload errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Nothing left to store after trimming
    #[error("Payload is empty")]
    EmptyPayload,
}

/// Number of chunks needed for `len` bytes of payload
pub const fn chunk_count(len: usize) -> usize {
    if len == 0 { 1 } else { len.div_ceil(BLOCK_SIZE) }
}

/// Split trimmed `text` into zero-padded chunks
pub fn encode(text: &str) -> Result<Vec<Chunk>, CodecError> {
    let bytes = text.trim().as_bytes();
    if bytes.is_empty() {
        return Err(CodecError::EmptyPayload);
    }

    let mut chunks = Vec::with_capacity(chunk_count(bytes.len()));
    for piece in bytes.chunks(BLOCK_SIZE) {
        let mut chunk = EMPTY_CHUNK;
        chunk[..piece.len()].copy_from_slice(piece);
        chunks.push(chunk);
    }
    Ok(chunks)
}

/// Decode a single block read from the card
pub fn decode_block(raw: &[u8]) -> String {
    printable(&String::from_utf8_lossy(raw))
}

/// Decode a run of chunks as one text
///
/// Bytes are joined before UTF-8 decoding, so characters split across a
/// block boundary survive.
pub fn decode(chunks: &[Chunk]) -> String {
    printable(&String::from_utf8_lossy(&chunks.concat()))
}

/// Drop control characters and bytes that were not valid UTF-8
fn printable(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() && c != char::REPLACEMENT_CHARACTER)
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_two_chunks() {
        let chunks = encode("Jane Doe,AB123,guide").unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0], b"Jane Doe,AB123,g");
        assert_eq!(&chunks[1][..4], b"uide");
        assert!(chunks[1][4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_trims() {
        let chunks = encode("  hi \n").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0][..2], b"hi");
        assert!(chunks[0][2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_exact_block() {
        let chunks = encode("0123456789abcdef").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunk_count(16), 1);
        assert_eq!(chunk_count(17), 2);
        assert_eq!(chunk_count(0), 1);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), Err(CodecError::EmptyPayload));
        assert_eq!(encode(" \t\r\n"), Err(CodecError::EmptyPayload));
    }

    #[test]
    fn test_decode() {
        let text = "Jane Doe,AB123,guide";
        assert_eq!(decode(&encode(text).unwrap()), text);

        // Multi-byte characters straddling a block boundary
        let text = "Ångströms, Zoë, guía";
        assert_eq!(decode(&encode(text).unwrap()), text);
    }

    #[test]
    fn test_decode_block() {
        let mut raw = EMPTY_CHUNK;
        raw[..7].copy_from_slice(b"\x01abc\x7f d");
        assert_eq!(decode_block(&raw), "abc d");
        assert_eq!(decode_block(&EMPTY_CHUNK), "");
        assert_eq!(decode_block(&[0xFF; 16]), "");
    }

    #[test]
    fn test_decode_block_drops_invalid_utf8() {
        let mut raw = EMPTY_CHUNK;
        raw[..8].copy_from_slice(b"ok\xC3\xFF\x80 go");
        assert_eq!(decode_block(&raw), "ok go");
    }

    #[test]
    fn test_round_trip_every_length() {
        let alphabet = "abcdefghijklmnopqrstuvwxyz0123456789,.-";
        for len in 1..=64 {
            let text: String = alphabet.chars().cycle().take(len).collect();
            let chunks = encode(&text).unwrap();

            assert_eq!(chunks.len(), len.div_ceil(BLOCK_SIZE), "len {len}");
            assert!(chunks.concat()[len..].iter().all(|&b| b == 0), "len {len}");
            assert_eq!(decode(&chunks), text, "len {len}");
        }
    }

    #[test]
    fn test_round_trip_multibyte_at_every_offset() {
        // Two, three and four byte sequences, each pushed across the boundary
        for wide in ["é", "€", "𝄞"] {
            for offset in 0..=2 * BLOCK_SIZE {
                let text = format!("{}{wide}z", "x".repeat(offset));
                assert_eq!(decode(&encode(&text).unwrap()), text, "{wide} at {offset}");
            }
        }
    }
}
