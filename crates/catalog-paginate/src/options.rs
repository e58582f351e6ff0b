use crate::overrides::ItemOverrides;
use crate::types::*;

/// Catalogue pagination configuration
///
/// Everything the operator can persist between sessions: the default layout,
/// the per-item override tables, the external-URL page slots and the summary
/// flag. Loaded and saved as JSON.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogOptions {
    pub default_layout: LayoutTag,
    pub overrides: ItemOverrides,
    pub url_slots: Vec<UrlPageSlot>,
    pub append_summary: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            default_layout: LayoutTag::FourUp,
            overrides: ItemOverrides::default(),
            url_slots: Vec::new(),
            append_summary: false,
        }
    }
}

impl CatalogOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PaginateError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaginateError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options against an item count
    pub fn validate(&self, item_count: usize) -> Result<()> {
        if self.url_slots.len() > MAX_URL_SLOTS {
            return Err(PaginateError::Config(format!(
                "At most {} URL page slots are supported, got {}",
                MAX_URL_SLOTS,
                self.url_slots.len()
            )));
        }

        self.overrides.validate(item_count)
    }
}
