//! Receipt file validation applied before any upload.

use crate::error::BilledError;

/// Extensions accepted for receipts (without leading dot).
pub const ALLOWED_RECEIPT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Validate a receipt file name against an allow-list.
///
/// The extension is the text after the last `.` (the whole name when there
/// is none) and is compared case-sensitively: `scan.JPG` is rejected.
pub fn validate_receipt_extension<S: AsRef<str>>(
    file_name: &str,
    allowed_extensions: &[S],
) -> Result<String, BilledError> {
    let extension = file_name.rsplit('.').next().unwrap_or("");

    if !allowed_extensions.iter().any(|ext| ext.as_ref() == extension) {
        tracing::debug!(
            file_name = %file_name,
            extension = %extension,
            "Rejected receipt extension"
        );
        return Err(BilledError::RejectedExtension {
            file_name: file_name.to_string(),
            extension: extension.to_string(),
        });
    }

    Ok(extension.to_string())
}
