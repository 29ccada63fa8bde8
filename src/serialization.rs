/// Serialization format options for stored interpolants.
///
/// Each format has both compressed (Lz4) and uncompressed variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializationFormat {
    /// JSON format - human readable, larger size
    Json,
    /// JSON format with LZ4 compression
    JsonLz4,
    /// Bincode format - compact binary
    Bincode,
    /// Bincode format with LZ4 compression
    #[default]
    BincodeLz4,
}

impl SerializationFormat {
    /// Returns true if this format uses LZ4 compression
    pub fn is_compressed(&self) -> bool {
        matches!(self, SerializationFormat::JsonLz4 | SerializationFormat::BincodeLz4)
    }
}

use crate::errors::InterpError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

fn serialize_serde<T: Serialize>(data: &T, format: SerializationFormat) -> Result<Vec<u8>, InterpError> {
    match format {
        SerializationFormat::Json | SerializationFormat::JsonLz4 => {
            serde_json::to_vec(data).map_err(|_| InterpError::SerializationFailed)
        }
        SerializationFormat::Bincode | SerializationFormat::BincodeLz4 => {
            bincode::serde::encode_to_vec(data, bincode::config::standard()).map_err(|_| InterpError::SerializationFailed)
        }
    }
}

fn deserialize_serde<T: DeserializeOwned>(data: &[u8], format: SerializationFormat) -> Result<T, InterpError> {
    match format {
        SerializationFormat::Json | SerializationFormat::JsonLz4 => {
            serde_json::from_slice(data).map_err(|_| InterpError::DeserializationFailed)
        }
        SerializationFormat::Bincode | SerializationFormat::BincodeLz4 => {
            bincode::serde::decode_from_slice(data, bincode::config::standard())
                .map(|(value, _)| value)
                .map_err(|_| InterpError::DeserializationFailed)
        }
    }
}

/// Serialize data to bytes using the specified format.
/// Applies LZ4 compression if the format variant ends with Lz4.
pub fn serialize<T: Serialize>(data: &T, format: SerializationFormat) -> Result<Vec<u8>, InterpError> {
    let bytes = serialize_serde(data, format)?;
    debug!(?format, len = bytes.len(), "serialized");
    if format.is_compressed() {
        Ok(lz4_flex::compress_prepend_size(&bytes))
    } else {
        Ok(bytes)
    }
}

/// Deserialize data from bytes using the specified format.
/// Applies LZ4 decompression if the format variant ends with Lz4.
pub fn deserialize<T: DeserializeOwned>(data: &[u8], format: SerializationFormat) -> Result<T, InterpError> {
    debug!(?format, len = data.len(), "deserializing");
    if format.is_compressed() {
        let decompressed = lz4_flex::decompress_size_prepended(data)
            .map_err(|_| InterpError::LZ4DecompressionFailed)?;
        deserialize_serde(&decompressed, format)
    } else {
        deserialize_serde(data, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct Table {
        grid: Vec<f64>,
        values: Vec<f64>,
    }

    #[test]
    fn test_every_format_restores_data() {
        let data = Table { grid: vec![0.0, 0.5, 2.0], values: vec![1.0, -3.25, 1e-300] };
        for format in [SerializationFormat::Json, SerializationFormat::JsonLz4, SerializationFormat::Bincode, SerializationFormat::BincodeLz4] {
            let bytes = serialize(&data, format).unwrap();
            let result: Table = deserialize(&bytes, format).unwrap();
            assert_eq!(data, result, "{format:?}");
        }
    }

    #[test]
    fn test_corrupt_input() {
        let garbage = [0xff_u8, 0x01, 0x02];
        assert_eq!(deserialize::<Table>(&garbage, SerializationFormat::BincodeLz4).unwrap_err(), InterpError::LZ4DecompressionFailed);
        assert_eq!(deserialize::<Table>(b"{\"grid\": 3}", SerializationFormat::Json).unwrap_err(), InterpError::DeserializationFailed);
    }
}
