//! Tour image asset rules.
//!
//! Uploaded images are stored under generated names so two uploads with the
//! same original filename never overwrite each other. Only the extension of
//! the original filename survives.

use crate::error::CoreError;

/// Image file extensions accepted for tour uploads.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Prefix of every generated asset name.
pub const ASSET_NAME_PREFIX: &str = "tour-";

/// Extract and check the lowercase extension of an uploaded filename.
///
/// `field` is the multipart field name the file arrived under and is used
/// in the error.
pub fn image_extension(field: &str, filename: &str) -> Result<String, CoreError> {
    let ext = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => {
            return Err(CoreError::validation(
                field,
                format!("image '{filename}' has no file extension"),
            ))
        }
    };

    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::validation(
            field,
            format!("unsupported image format '.{ext}'. Supported: {SUPPORTED_IMAGE_EXTENSIONS:?}"),
        ));
    }
    Ok(ext)
}

/// Reject empty uploads.
pub fn validate_image_bytes(field: &str, bytes: &[u8]) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::validation(field, "image must not be empty"));
    }
    Ok(())
}

/// Generate a fresh asset name, e.g. `tour-3f2a…e1.png`.
pub fn generate_asset_name(ext: &str) -> String {
    format!("{ASSET_NAME_PREFIX}{}.{ext}", uuid::Uuid::new_v4().simple())
}

/// Whether `name` looks like a name produced by [`generate_asset_name`].
///
/// Used before touching the filesystem so a stored value can never point
/// outside the asset directory.
pub fn is_generated_asset_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(ASSET_NAME_PREFIX) else {
        return false;
    };
    let Some((id, ext)) = rest.split_once('.') else {
        return false;
    };
    id.len() == 32
        && id.chars().all(|c| c.is_ascii_hexdigit())
        && SUPPORTED_IMAGE_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(image_extension("image", "Eiffel.JPG").unwrap(), "jpg");
    }

    #[test]
    fn extension_uses_last_dot() {
        assert_eq!(image_extension("image", "paris.day1.webp").unwrap(), "webp");
    }

    #[test]
    fn rejects_missing_extension() {
        assert_matches!(
            image_extension("image", "paris"),
            Err(CoreError::Validation { field, .. }) if field == "image"
        );
        assert!(image_extension("image", ".png").is_err());
    }

    #[test]
    fn rejects_unsupported_extension() {
        assert_matches!(
            image_extension("new_image", "notes.txt"),
            Err(CoreError::Validation { field, .. }) if field == "new_image"
        );
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(validate_image_bytes("image", &[]).is_err());
        assert!(validate_image_bytes("image", b"\x89PNG").is_ok());
    }

    #[test]
    fn generated_names_are_unique_and_recognised() {
        let a = generate_asset_name("png");
        let b = generate_asset_name("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(is_generated_asset_name(&a));
    }

    #[test]
    fn foreign_names_are_not_recognised() {
        assert!(!is_generated_asset_name("paris.jpg"));
        assert!(!is_generated_asset_name("tour-../../etc/passwd"));
        assert!(!is_generated_asset_name("tour-0123.png"));
    }
}
