//! System clipboard access (native only).

use crate::error::{AppError, AppResult};

/// Copy text to the system clipboard.
#[cfg(feature = "native")]
pub fn copy_text(text: &str) -> AppResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| AppError::Clipboard(e.to_string()))?;
    log::info!("Diagram JSON copied to clipboard ({} bytes)", text.len());
    Ok(())
}

#[cfg(not(feature = "native"))]
pub fn copy_text(_text: &str) -> AppResult<()> {
    Err(AppError::Clipboard("built without the `native` feature".to_string()))
}
