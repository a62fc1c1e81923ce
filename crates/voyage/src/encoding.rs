use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::VoyageError;
use crate::models::OutputDtype;

/// Decodes a base64 embedding (a little-endian NumPy array) into floats.
///
/// Float payloads hold `f32` values; `int8`/`binary` hold `i8` and
/// `uint8`/`ubinary` hold `u8`, widened losslessly to `f32`.
pub(crate) fn decode_base64_embedding(
    encoded: &str,
    dtype: OutputDtype,
) -> Result<Vec<f32>, VoyageError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| VoyageError::InvalidResponse(format!("base64 embedding: {e}")))?;

    match dtype {
        OutputDtype::Float => {
            let chunks = bytes.chunks_exact(4);
            if !chunks.remainder().is_empty() {
                return Err(VoyageError::InvalidResponse(format!(
                    "float embedding has {} bytes, expected a multiple of 4",
                    bytes.len()
                )));
            }
            Ok(chunks
                .filter_map(|chunk| <[u8; 4]>::try_from(chunk).ok())
                .map(f32::from_le_bytes)
                .collect())
        }
        OutputDtype::Int8 | OutputDtype::Binary => Ok(bytes
            .iter()
            .map(|b| f32::from(i8::from_le_bytes([*b])))
            .collect()),
        OutputDtype::Uint8 | OutputDtype::Ubinary => {
            Ok(bytes.iter().map(|b| f32::from(*b)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn float_payload_decodes_little_endian() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&0.5f32.to_le_bytes());
        raw.extend_from_slice(&(-2.25f32).to_le_bytes());

        let values =
            decode_base64_embedding(&encode(&raw), OutputDtype::Float).expect("decode floats");
        assert_eq!(values, vec![0.5, -2.25]);
    }

    #[test]
    fn signed_and_unsigned_bytes_widen_differently() {
        let payload = encode(&[0x00, 0x7f, 0x80, 0xff]);

        let signed = decode_base64_embedding(&payload, OutputDtype::Int8).expect("decode int8");
        assert_eq!(signed, vec![0.0, 127.0, -128.0, -1.0]);

        let unsigned =
            decode_base64_embedding(&payload, OutputDtype::Ubinary).expect("decode ubinary");
        assert_eq!(unsigned, vec![0.0, 127.0, 128.0, 255.0]);
    }

    #[test]
    fn truncated_float_payload_is_rejected() {
        let err = decode_base64_embedding(&encode(&[1, 2, 3]), OutputDtype::Float)
            .expect_err("three bytes cannot be an f32");
        assert!(matches!(err, VoyageError::InvalidResponse(_)));
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let err = decode_base64_embedding("not base64!!", OutputDtype::Uint8)
            .expect_err("invalid alphabet");
        assert!(err.to_string().contains("base64 embedding"));
    }
}
