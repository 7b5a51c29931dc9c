//! The catalog client.
//!
//! Three reads are exposed, each memoized per session:
//!
//! | operation | endpoint | on failure |
//! |-----------|----------|------------|
//! | [`CatalogClient::fetch_set_metadata`] | `sets/{set}/` | `Err`, shown inline |
//! | [`CatalogClient::fetch_theme_name`] | `themes/{id}/` | `"Unknown"` |
//! | [`CatalogClient::fetch_inventory`] | `sets/{set}/parts/` | pages so far, flagged truncated |
//!
//! Pagination is strictly sequential and never retried.

use std::sync::Arc;

use bv_core::{ApiConfig, PartRecord, SetMetadata, UNKNOWN};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::MemoCache;
use crate::error::ClientError;
use crate::transport::{HttpTransport, Transport};
use crate::wire::{InventoryItem, PartsPage, SetDto, ThemeDto};

/// A set's parts listing as fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Records from every page that succeeded, in page order.
    pub records: Vec<PartRecord>,
    /// First page that failed, if pagination stopped early.
    pub failed_page: Option<u32>,
}

impl Inventory {
    /// An inventory whose pagination ran to the end.
    #[must_use]
    pub const fn complete(records: Vec<PartRecord>) -> Self {
        Self {
            records,
            failed_page: None,
        }
    }

    /// An inventory cut short at `failed_page`.
    #[must_use]
    pub const fn truncated(records: Vec<PartRecord>, failed_page: u32) -> Self {
        Self {
            records,
            failed_page: Some(failed_page),
        }
    }

    /// Returns `true` if a page request failed.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.failed_page.is_some()
    }
}

/// Metadata (with theme name resolved) and inventory of one set.
#[derive(Debug, Clone)]
pub struct LoadedSet {
    /// Set metadata.
    pub metadata: SetMetadata,
    /// Shared inventory handle.
    pub inventory: Arc<Inventory>,
}

/// Catalog client bound to one session cache.
///
/// # Examples
///
/// ```no_run
/// use bv_client::CatalogClient;
/// use bv_core::ApiConfig;
///
/// # async fn demo() -> Result<(), bv_client::ClientError> {
/// let config = ApiConfig {
///     api_key: Some("secret".to_owned()),
///     ..ApiConfig::default()
/// };
/// let client = CatalogClient::from_config(&config)?;
/// let set = client.load_set("75192-1").await?;
/// println!("{} has {} records", set.metadata.name, set.inventory.records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CatalogClient<T = HttpTransport> {
    transport: T,
    cache: MemoCache,
    page_size: u32,
}

impl CatalogClient<HttpTransport> {
    /// Builds an HTTP-backed client from API settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self::new(HttpTransport::new(config)?, config.page_size))
    }
}

impl<T: Transport> CatalogClient<T> {
    /// Creates a client over `transport` with an empty cache.
    pub fn new(transport: T, page_size: u32) -> Self {
        Self {
            transport,
            cache: MemoCache::new(),
            page_size: page_size.max(1),
        }
    }

    /// Returns the session cache.
    pub const fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches metadata for `set_num`.
    ///
    /// The theme name is left as [`UNKNOWN`]; see [`Self::load_set`].
    pub async fn fetch_set_metadata(&self, set_num: &str) -> Result<SetMetadata, ClientError> {
        let set_num = validate_set_num(set_num)?;
        if let Some(meta) = self.cache.metadata(set_num) {
            debug!(set_num, "Metadata cache hit");
            return Ok(meta);
        }

        let dto: SetDto = self.get_json(&format!("sets/{set_num}/"), &[]).await?;
        let meta = dto.into_metadata();
        self.cache.insert_metadata(set_num, meta.clone());
        Ok(meta)
    }

    /// Fetches a theme name, or [`UNKNOWN`] on any failure.
    ///
    /// The fallback is memoized too, so a failing theme is asked for once per
    /// session.
    pub async fn fetch_theme_name(&self, theme_id: u32) -> String {
        if let Some(name) = self.cache.theme(theme_id) {
            debug!(theme_id, "Theme cache hit");
            return name;
        }

        match self
            .get_json::<ThemeDto>(&format!("themes/{theme_id}/"), &[])
            .await
        {
            Ok(theme) => {
                self.cache.insert_theme(theme_id, theme.name.clone());
                theme.name
            }
            Err(err) => {
                warn!(theme_id, error = %err, "Theme lookup failed, using fallback");
                self.cache.insert_theme(theme_id, UNKNOWN.to_owned());
                UNKNOWN.to_owned()
            }
        }
    }

    /// Fetches every page of the parts listing for `set_num`.
    ///
    /// Pages are requested one after another until the catalog reports no
    /// next page or sends an empty one. A failed page stops pagination; the
    /// records gathered so far are returned and the result is flagged
    /// truncated.
    pub async fn fetch_inventory(&self, set_num: &str) -> Arc<Inventory> {
        let Ok(set_num) = validate_set_num(set_num) else {
            warn!(set_num, "Refusing to fetch inventory for invalid set id");
            return Arc::new(Inventory::truncated(Vec::new(), 1));
        };
        if let Some(inventory) = self.cache.inventory(set_num) {
            debug!(set_num, records = inventory.records.len(), "Inventory cache hit");
            return inventory;
        }

        let path = format!("sets/{set_num}/parts/");
        let mut records = Vec::new();
        let mut page: u32 = 1;

        let inventory = loop {
            let query = [("page", page.to_string()), ("page_size", self.page_size.to_string())];
            match self.get_json::<PartsPage>(&path, &query).await {
                Ok(body) => {
                    let received = body.results.len();
                    records.extend(body.results.into_iter().map(InventoryItem::into_record));
                    debug!(set_num, page, received, total = records.len(), "Fetched parts page");
                    if body.next.is_none() || received == 0 {
                        break Inventory::complete(records);
                    }
                    page = page.saturating_add(1);
                }
                Err(err) => {
                    warn!(
                        set_num,
                        page,
                        kept = records.len(),
                        error = %err,
                        "Parts page failed, inventory truncated"
                    );
                    break Inventory::truncated(records, page);
                }
            }
        };

        info!(
            set_num,
            records = inventory.records.len(),
            truncated = inventory.is_truncated(),
            "Fetched inventory"
        );
        self.cache.insert_inventory(set_num, inventory)
    }

    /// Fetches metadata, theme name and inventory for `set_num`.
    ///
    /// Fails only when the metadata cannot be fetched.
    pub async fn load_set(&self, set_num: &str) -> Result<LoadedSet, ClientError> {
        let set_num = validate_set_num(set_num)?;
        let metadata = self.fetch_set_metadata(set_num).await?;
        let theme_name = self.fetch_theme_name(metadata.theme_id).await;
        let inventory = self.fetch_inventory(set_num).await;

        Ok(LoadedSet {
            metadata: metadata.with_theme_name(theme_name),
            inventory,
        })
    }

    /// Drops cached metadata and inventory for `set_num` so the next load
    /// goes back to the catalog.
    pub fn invalidate(&self, set_num: &str) {
        if self.cache.invalidate_set(set_num.trim()) {
            info!(set_num, remaining = self.cache.cached_sets(), "Invalidated cached set");
        }
    }

    async fn get_json<D: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<D, ClientError> {
        let response = self.transport.get(path, query).await?;
        if !response.is_ok() {
            return Err(ClientError::status(self.transport.url(path), response.status));
        }
        serde_json::from_str(&response.body).map_err(|source| ClientError::Decode {
            url: self.transport.url(path),
            source,
        })
    }
}

/// Trims `set_num` and rejects anything that is not a plain path segment.
fn validate_set_num(set_num: &str) -> Result<&str, ClientError> {
    let trimmed = set_num.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && trimmed != "."
        && trimmed != "..";
    if valid {
        Ok(trimmed)
    } else {
        Err(ClientError::InvalidSetNum(set_num.to_owned()))
    }
}
