//! Bookmarks page derivation.
//!
//! Pure functions from a [`VideoSnapshot`] and a search filter to what the
//! bookmarks page shows: one section per category, with a heading and an
//! empty state that tells "nothing bookmarked" apart from "nothing matches".

use crate::catalog::Category;
use crate::sync::{MergedVideo, SyncStatus, VideoSnapshot};

pub const LOADING_MESSAGE: &str = "Loading bookmarks...";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch bookmarks";

/// Case-insensitive substring match. The filter is trimmed; an empty filter matches everything.
pub fn matches_filter(title: &str, filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || title.to_lowercase().contains(&filter.to_lowercase())
}

fn bookmarked_in<'a>(
    videos: &'a [MergedVideo],
    category: Category,
) -> impl Iterator<Item = &'a MergedVideo> {
    videos
        .iter()
        .filter(move |v| v.is_bookmarked && v.category() == category)
}

/// Bookmarked movies whose title matches the filter, in catalog order.
pub fn bookmarked_movies(videos: &[MergedVideo], filter: &str) -> Vec<MergedVideo> {
    bookmarked_in(videos, Category::Movie)
        .filter(|v| matches_filter(v.title(), filter))
        .cloned()
        .collect()
}

/// Bookmarked TV series whose title matches the filter, in catalog order.
pub fn bookmarked_series(videos: &[MergedVideo], filter: &str) -> Vec<MergedVideo> {
    bookmarked_in(videos, Category::TvSeries)
        .filter(|v| matches_filter(v.title(), filter))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing of this category is bookmarked.
    NoBookmarks,
    /// Bookmarks exist but the filter hides all of them.
    NoMatches { filter: String },
}

/// One category block of the page.
#[derive(Debug, Clone)]
pub struct Section {
    pub category: Category,
    pub videos: Vec<MergedVideo>,
    /// Bookmarked items of this category before filtering.
    pub total_bookmarked: usize,
    /// Trimmed filter; empty when none.
    pub filter: String,
}

impl Section {
    fn build(videos: &[MergedVideo], category: Category, filter: &str) -> Self {
        let filter = filter.trim();
        let total_bookmarked = bookmarked_in(videos, category).count();
        let videos = match category {
            Category::Movie => bookmarked_movies(videos, filter),
            Category::TvSeries => bookmarked_series(videos, filter),
        };
        Self {
            category,
            videos,
            total_bookmarked,
            filter: filter.to_string(),
        }
    }

    pub fn count(&self) -> usize {
        self.videos.len()
    }

    fn label(&self) -> String {
        format!("Bookmarked {}", self.category.plural_label())
    }

    pub fn heading(&self) -> String {
        if self.filter.is_empty() {
            return self.label();
        }
        let noun = if self.count() == 1 { "result" } else { "results" };
        format!(
            "Found {} {} for '{}' in {}",
            self.count(),
            noun,
            self.filter,
            self.label()
        )
    }

    /// None when there is something to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.videos.is_empty() {
            return None;
        }
        if self.total_bookmarked == 0 || self.filter.is_empty() {
            Some(EmptyState::NoBookmarks)
        } else {
            Some(EmptyState::NoMatches {
                filter: self.filter.clone(),
            })
        }
    }

    pub fn empty_message(&self) -> Option<String> {
        let noun = match self.category {
            Category::Movie => "Movies",
            Category::TvSeries => "TV Series",
        };
        self.empty_state().map(|state| match state {
            EmptyState::NoBookmarks => format!("There are no bookmarked {}.", noun),
            EmptyState::NoMatches { filter } => {
                format!("No bookmarked {} match '{}'.", noun, filter)
            }
        })
    }
}

#[derive(Debug, Clone)]
pub enum PageState {
    Loading,
    Failed(String),
    Ready { movies: Section, series: Section },
}

pub struct BookmarkPage;

impl BookmarkPage {
    pub fn derive(snapshot: &VideoSnapshot, filter: &str) -> PageState {
        match &snapshot.status {
            SyncStatus::Pending => PageState::Loading,
            SyncStatus::Failed(_) => PageState::Failed(FETCH_FAILED_MESSAGE.to_string()),
            SyncStatus::Synced => PageState::Ready {
                movies: Section::build(&snapshot.videos, Category::Movie, filter),
                series: Section::build(&snapshot.videos, Category::TvSeries, filter),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, VideoId};
    use crate::sync::{merge_bookmarks, ChangeOrigin, VideoStore};
    use std::collections::HashSet;

    const TWO_VIDEOS: &str = r#"[
        {"id": "1", "title": "Beyond Earth", "thumbnail": {"regular": {"small": "a", "medium": "b", "large": "c"}},
         "video": "/v/1.mp4", "year": 2019, "category": "Movie", "rating": "PG"},
        {"id": "2", "title": "Bottom Gear", "thumbnail": {"regular": {"small": "a", "medium": "b", "large": "c"}},
         "video": "/v/2.mp4", "year": 2021, "category": "TV Series", "rating": "PG"}
    ]"#;

    fn synced(json: &str, ids: &[&str]) -> VideoSnapshot {
        let store = VideoStore::new(&Catalog::from_json(json).unwrap());
        let ids: HashSet<VideoId> = ids.iter().map(|id| VideoId::from(*id)).collect();
        store.replace(
            merge_bookmarks(&store.defaults(), &ids),
            ChangeOrigin::Sync,
            SyncStatus::Synced,
        );
        store.snapshot()
    }

    fn ready(state: PageState) -> (Section, Section) {
        match state {
            PageState::Ready { movies, series } => (movies, series),
            other => panic!("expected ready page, got {other:?}"),
        }
    }

    #[test]
    fn test_matches_filter() {
        assert!(matches_filter("Beyond Earth", ""));
        assert!(matches_filter("Beyond Earth", "   "));
        assert!(matches_filter("Beyond Earth", "earth"));
        assert!(matches_filter("Beyond Earth", "  EARTH "));
        assert!(!matches_filter("Beyond Earth", "xyz"));
    }

    #[test]
    fn test_one_movie_bookmarked() {
        let (movies, series) = ready(BookmarkPage::derive(&synced(TWO_VIDEOS, &["1"]), ""));

        assert_eq!(movies.count(), 1);
        assert_eq!(series.count(), 0);
        assert_eq!(movies.heading(), "Bookmarked Movies");
        assert_eq!(series.heading(), "Bookmarked TV series");
        assert_eq!(movies.empty_state(), None);
        assert_eq!(series.empty_state(), Some(EmptyState::NoBookmarks));
        assert_eq!(
            series.empty_message().unwrap(),
            "There are no bookmarked TV Series."
        );
    }

    #[test]
    fn test_filter_without_matches_differs_from_no_bookmarks() {
        let (movies, series) = ready(BookmarkPage::derive(&synced(TWO_VIDEOS, &["1"]), "xyz"));

        assert_eq!(movies.count(), 0);
        assert_eq!(
            movies.empty_state(),
            Some(EmptyState::NoMatches {
                filter: "xyz".to_string()
            })
        );
        assert_eq!(
            movies.empty_message().unwrap(),
            "No bookmarked Movies match 'xyz'."
        );
        assert_eq!(series.empty_state(), Some(EmptyState::NoBookmarks));
        assert_eq!(
            movies.heading(),
            "Found 0 results for 'xyz' in Bookmarked Movies"
        );
    }

    #[test]
    fn test_heading_singular_result() {
        let (movies, _) = ready(BookmarkPage::derive(&synced(TWO_VIDEOS, &["1"]), " earth "));
        assert_eq!(
            movies.heading(),
            "Found 1 result for 'earth' in Bookmarked Movies"
        );
    }

    #[test]
    fn test_embedded_catalog_sections_keep_catalog_order() {
        let catalog = Catalog::embedded().unwrap();
        let all: Vec<&str> = catalog.videos().iter().map(|v| v.id.as_str()).collect();
        let json = serde_json::to_string(catalog.videos()).unwrap();

        let (movies, series) = ready(BookmarkPage::derive(&synced(&json, &all), ""));
        assert_eq!(movies.count() + series.count(), catalog.len());
        assert!(movies.videos.iter().all(|v| v.category() == Category::Movie));
        assert!(series
            .videos
            .iter()
            .all(|v| v.category() == Category::TvSeries));

        let positions: Vec<usize> = movies
            .videos
            .iter()
            .map(|m| all.iter().position(|id| *id == m.id().as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pending_and_failed_states() {
        let store = VideoStore::new(&Catalog::from_json(TWO_VIDEOS).unwrap());
        assert!(matches!(
            BookmarkPage::derive(&store.snapshot(), ""),
            PageState::Loading
        ));

        store.replace(
            store.defaults(),
            ChangeOrigin::Sync,
            SyncStatus::Failed("timeout".to_string()),
        );
        match BookmarkPage::derive(&store.snapshot(), "") {
            PageState::Failed(message) => assert_eq!(message, FETCH_FAILED_MESSAGE),
            other => panic!("expected failed page, got {other:?}"),
        }
    }
}
