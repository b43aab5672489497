//! In-memory profile storage backing the demo endpoints.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use reqcheck_core::pagination::{Pagination, SortDirection};
use reqcheck_core::upload::{MemoryFile, UploadedFile};
use serde::Serialize;
use tokio::sync::RwLock;

/// Fields a profile listing may be sorted by.
pub const PROFILE_ORDER_FIELDS: &[&str] = &["id", "display_name", "email"];

/// Metadata kept for an accepted upload. The bytes themselves are not stored.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub filename: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl From<&MemoryFile> for StoredFile {
    fn from(file: &MemoryFile) -> Self {
        Self {
            filename: file.filename().to_string(),
            size: file.size(),
            content_type: file.content_type().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub avatar: StoredFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<StoredFile>,
}

/// Input for [`ProfileStore::insert`].
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: StoredFile,
    pub banner: Option<StoredFile>,
}

#[derive(Debug)]
pub struct ProfileStore {
    profiles: RwLock<Vec<Profile>>,
    next_id: AtomicI64,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            profiles: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl ProfileStore {
    pub async fn insert(&self, input: NewProfile) -> Profile {
        let profile = Profile {
            id: self.next_id.fetch_add(1, AtomicOrdering::Relaxed),
            display_name: input.display_name,
            email: input.email,
            bio: input.bio,
            avatar: input.avatar,
            banner: input.banner,
        };
        self.profiles.write().await.push(profile.clone());
        profile
    }

    /// One page of profiles plus the total number matching the search.
    ///
    /// Search is a case-insensitive substring match on the display name.
    /// `order_field` is expected to be one of [`PROFILE_ORDER_FIELDS`].
    pub async fn list(&self, pagination: &Pagination) -> (Vec<Profile>, usize) {
        let profiles = self.profiles.read().await;

        let needle = pagination.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<&Profile> = profiles
            .iter()
            .filter(|p| match &needle {
                Some(needle) => p.display_name.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        matching.sort_by(|a, b| {
            let ord = compare(a, b, &pagination.order_field);
            match pagination.order_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let total = matching.len();
        let offset = usize::try_from(pagination.offset).unwrap_or(0);
        let limit = usize::try_from(pagination.per_page).unwrap_or(0);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        (page, total)
    }
}

fn compare(a: &Profile, b: &Profile, field: &str) -> Ordering {
    match field {
        "display_name" => a.display_name.cmp(&b.display_name),
        "email" => a.email.cmp(&b.email),
        _ => a.id.cmp(&b.id),
    }
}

#[cfg(test)]
mod tests {
    use reqcheck_core::pagination::{resolve, PaginationParams};

    use super::*;

    fn new_profile(name: &str) -> NewProfile {
        NewProfile {
            display_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            bio: None,
            avatar: StoredFile {
                filename: "avatar.png".to_string(),
                size: 10,
                content_type: None,
            },
            banner: None,
        }
    }

    fn page(pairs: PaginationParams) -> Pagination {
        resolve(&pairs, PROFILE_ORDER_FIELDS).unwrap()
    }

    #[tokio::test]
    async fn ids_increase_from_one() {
        let store = ProfileStore::default();
        assert_eq!(store.insert(new_profile("Ada")).await.id, 1);
        assert_eq!(store.insert(new_profile("Grace")).await.id, 2);
    }

    #[tokio::test]
    async fn default_listing_is_newest_first() {
        let store = ProfileStore::default();
        for name in ["Ada", "Grace", "Linus"] {
            store.insert(new_profile(name)).await;
        }

        let (items, total) = store.list(&page(PaginationParams::default())).await;
        assert_eq!(total, 3);
        let ids: Vec<_> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn search_and_paging_apply_together() {
        let store = ProfileStore::default();
        for name in ["Ada", "Adam", "Adele", "Bob"] {
            store.insert(new_profile(name)).await;
        }

        let params = PaginationParams {
            per_page: Some("2".into()),
            page: Some("2".into()),
            order_field: Some("display_name".into()),
            order_direction: Some("asc".into()),
            search: Some("ad".into()),
        };
        let (items, total) = store.list(&page(params)).await;
        assert_eq!(total, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name, "Adele");
    }
}
