//! Catalog queries.

use crate::client::MediaServerClient;
use crate::error::{Result, ServerClientError};
use crate::types::ItemsResponse;
use async_trait::async_trait;
use cadence_core::{Catalog, CatalogItem, LibraryFilters, SortOrder};
use tracing::debug;
use url::Url;

/// Item fields the queue engine reads.
const ITEM_FIELDS: &str = "Genres,MediaSources,ProductionYear,NormalizationGain";

const ALBUM_ORDER: &str = "ParentIndexNumber,IndexNumber,SortName";

fn sort_params(sort: SortOrder) -> (&'static str, &'static str) {
    match sort {
        SortOrder::Random => ("Random", "Ascending"),
        SortOrder::Name => ("SortName", "Ascending"),
        SortOrder::DateAdded => ("DateCreated", "Descending"),
    }
}

fn apply_filters(url: &mut Url, filters: &LibraryFilters) {
    let mut pairs = url.query_pairs_mut();

    let flags: Vec<&str> = [
        (filters.favorites_only, "IsFavorite"),
        (filters.unplayed_only, "IsUnplayed"),
    ]
    .into_iter()
    .filter_map(|(on, flag)| on.then_some(flag))
    .collect();
    if !flags.is_empty() {
        pairs.append_pair("Filters", &flags.join(","));
    }

    if !filters.genre_ids.is_empty() {
        pairs.append_pair("GenreIds", &filters.genre_ids.join("|"));
    }

    let years = filters.years();
    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(u32::to_string).collect();
        pairs.append_pair("Years", &years.join(","));
    }
}

impl MediaServerClient {
    fn items_url(&self) -> Result<Url> {
        let user_id = self.user_id()?;
        let mut url = self.endpoint(&format!("/Users/{}/Items", user_id))?;
        url.query_pairs_mut()
            .append_pair("IncludeItemTypes", "Audio")
            .append_pair("Recursive", "true")
            .append_pair("Fields", ITEM_FIELDS);
        Ok(url)
    }

    async fn get_items(&self, url: Url) -> Result<ItemsResponse> {
        debug!(url = %url, "Fetching items");

        let response = self.send(self.http.get(url)).await?;
        let items: ItemsResponse = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse items response: {}", e))
        })?;

        debug!(
            items = items.items.len(),
            total = items.total_record_count,
            "Fetched items"
        );
        Ok(items)
    }

    /// Fetch one page of audio items matching `filters`.
    pub async fn get_tracks(
        &self,
        filters: &LibraryFilters,
        sort: SortOrder,
        limit: usize,
        offset: usize,
    ) -> Result<ItemsResponse> {
        let mut url = self.items_url()?;
        let (sort_by, sort_order) = sort_params(sort);
        url.query_pairs_mut()
            .append_pair("SortBy", sort_by)
            .append_pair("SortOrder", sort_order)
            .append_pair("Limit", &limit.to_string())
            .append_pair("StartIndex", &offset.to_string());
        apply_filters(&mut url, filters);

        self.get_items(url).await
    }

    /// Fetch every audio item of an album or playlist, in album order.
    pub async fn fetch_collection_tracks(&self, parent_id: &str) -> Result<Vec<CatalogItem>> {
        let mut url = self.items_url()?;
        url.query_pairs_mut()
            .append_pair("ParentId", parent_id)
            .append_pair("SortBy", ALBUM_ORDER);

        Ok(self.get_items(url).await?.items)
    }
}

#[async_trait]
impl Catalog for MediaServerClient {
    async fn fetch_tracks(
        &self,
        filters: &LibraryFilters,
        sort: SortOrder,
        limit: usize,
        offset: usize,
    ) -> cadence_core::Result<Vec<CatalogItem>> {
        Ok(self.get_tracks(filters, sort, limit, offset).await?.items)
    }
}
