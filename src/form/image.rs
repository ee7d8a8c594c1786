//! Data-URI helpers for image fields.
//!
//! The drag-and-drop widget itself lives in the frontend; its contract with
//! this layer is "produces a base64 data URI given a file". The form stores
//! and returns that string verbatim — these helpers are the encode/decode
//! boundary for anything that needs the raw bytes back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode raw bytes as a `data:<mime>;base64,...` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a base64 data URI. Returns `None` for anything that is not one.
pub fn decode_data_uri(uri: &str) -> Option<DataImage> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some(DataImage { mime: mime.to_string(), bytes })
}
