use anyhow::{Result, anyhow};
use std::path::Path;
use uuid::Uuid;

/// Declared MIME types accepted for upload. Single source of truth: the
/// handler calls `is_allowed_image` once and nothing else inspects types.
/// Declared types are client-supplied and untrusted; content sniffing is
/// deliberately out of scope.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Length of the hex token prefixed to every object key.
const KEY_TOKEN_LEN: usize = 8;

/// Checks a declared content type against the image allow-list. Parameters
/// (`; charset=...`) and case are ignored via the parsed essence.
pub fn is_allowed_image(content_type: &str) -> bool {
    match content_type.parse::<mime::Mime>() {
        Ok(m) => ALLOWED_IMAGE_TYPES.contains(&m.essence_str()),
        Err(_) => false,
    }
}

/// Sanitizes a client-supplied filename: strips any path components, replaces
/// control and reserved characters, caps the length, and rejects names that
/// end up empty or hidden.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == '/'
                || c == '\\'
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(anyhow!("Hidden files (starting with '.') are not allowed"));
    }

    Ok(sanitized)
}

/// Builds the storage key for an upload: a server-generated hex token plus
/// the sanitized filename. The token makes keys unique, so client-chosen
/// names can never overwrite an existing object.
pub fn object_key(sanitized_filename: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}-{}", &token[..KEY_TOKEN_LEN], sanitized_filename)
}

/// Recovers the human-readable name from a key produced by `object_key`.
/// Keys without the token prefix (uploaded by other tooling) pass through.
pub fn display_name(key: &str) -> &str {
    let bytes = key.as_bytes();
    if bytes.len() > KEY_TOKEN_LEN + 1
        && bytes[KEY_TOKEN_LEN] == b'-'
        && bytes[..KEY_TOKEN_LEN].iter().all(u8::is_ascii_hexdigit)
    {
        &key[KEY_TOKEN_LEN + 1..]
    } else {
        key
    }
}
