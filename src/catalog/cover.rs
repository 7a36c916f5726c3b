use log::debug;

use crate::config::CatalogSettings;
use crate::source::{MediaSource, SourceError};

use super::paths::{encode_component, file_name_from_path};

/// Placeholder image URL carrying `label` as its text.
pub fn placeholder_image(base: &str, label: &str) -> String {
    format!("{base}?text={}", encode_component(label))
}

/// Probe the conventional cover names in order and return the first that
/// exists, or a placeholder named after the folder.
pub async fn find_cover_image<S: MediaSource>(
    source: &S,
    folder_path: &str,
    settings: &CatalogSettings,
) -> Result<String, SourceError> {
    for cover in &settings.cover_names {
        let target = format!("{folder_path}/{cover}");
        match source.exists(&target).await {
            Ok(true) => {
                debug!("Found cover image: {target}");
                return Ok(target);
            }
            Ok(false) => {}
            Err(e) if e.is_addressing() => return Err(e),
            Err(e) => debug!("Cover probe {target} failed: {e}"),
        }
    }

    Ok(placeholder_image(
        &settings.placeholder_image,
        file_name_from_path(folder_path),
    ))
}
