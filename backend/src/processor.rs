use shared::catalog::Catalog;
use shared::models::*;
use shared::validation::{num_pages, page_range};
use crate::error::ApiError;
use crate::store::VoteStore;

pub struct StripProcessor;

impl StripProcessor {
    /// Catalog metadata for `id` joined with its current like count.
    pub fn get_strip(catalog: &Catalog, store: &VoteStore, id: ComicId) -> Result<Strip, ApiError> {
        let entry = catalog.lookup(id).ok_or(ApiError::NotFound)?;
        let likes = store.get_likes(id)?;
        Ok(Strip::new(entry, likes))
    }

    /// Records a like for a published comic; returns the resulting count.
    pub fn cast_vote(catalog: &Catalog, store: &VoteStore, id: ComicId, identity: &str) -> Result<u64, ApiError> {
        if catalog.lookup(id).is_none() {
            return Err(ApiError::NotFound);
        }
        Ok(store.record_vote(id, identity)?)
    }

    pub fn comic_page(catalog: &Catalog, store: &VoteStore, id: ComicId) -> Result<ComicPage, ApiError> {
        Ok(ComicPage {
            strip: Self::get_strip(catalog, store, id)?,
            page: id,
            num_pages: catalog.latest_id(),
            route: ListingRoute::Comic,
        })
    }

    /// Newest-first page of strips.
    pub fn archive_page(catalog: &Catalog, store: &VoteStore, page: usize, per_page: usize) -> Result<StripListPage, ApiError> {
        let ids = catalog.all_ids_newest_first();
        let range = page_range(page, per_page, ids.len()).map_err(|_| ApiError::NotFound)?;
        let pages = num_pages(ids.len(), per_page).map_err(|_| ApiError::NotFound)?;

        let strips = ids[range]
            .iter()
            .map(|&id| Self::get_strip(catalog, store, id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StripListPage {
            strips,
            page,
            num_pages: pages,
            route: ListingRoute::Archive,
        })
    }

    /// Page of strips ordered by likes, most liked first; equal counts keep
    /// newest-first order.
    pub fn top_page(catalog: &Catalog, store: &VoteStore, page: usize, per_page: usize) -> Result<StripListPage, ApiError> {
        let snapshot = store.snapshot()?;
        let mut strips = catalog
            .all_ids_newest_first()
            .into_iter()
            .filter_map(|id| catalog.lookup(id))
            .map(|entry| Strip::new(entry, snapshot.likes_for(entry.id)))
            .collect::<Vec<_>>();
        strips.sort_by(|a, b| b.likes.cmp(&a.likes));

        let total = strips.len();
        let range = page_range(page, per_page, total).map_err(|_| ApiError::NotFound)?;
        let pages = num_pages(total, per_page).map_err(|_| ApiError::NotFound)?;

        Ok(StripListPage {
            strips: strips.drain(range).collect(),
            page,
            num_pages: pages,
            route: ListingRoute::Top,
        })
    }

    /// Maps `roll` uniformly-ish onto the published comics.
    pub fn pick_comic(catalog: &Catalog, roll: u64) -> Option<ComicId> {
        let ids = catalog.all_ids_newest_first();
        if ids.is_empty() {
            return None;
        }
        Some(ids[(roll % ids.len() as u64) as usize])
    }
}
