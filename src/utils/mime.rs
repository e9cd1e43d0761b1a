//! MIME type detection for uploaded files

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME from a filename extension
pub fn guess_mime_from_filename(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first_raw()
        .map(|s| s.to_string())
}

/// Prefer magic bytes, then the extension, otherwise `application/octet-stream`
pub fn guess_mime(bytes: Option<&[u8]>, filename: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(f) = filename
        && let Some(m) = guess_mime_from_filename(f)
    {
        return m;
    }
    "application/octet-stream".to_string()
}
