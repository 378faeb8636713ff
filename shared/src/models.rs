use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;

pub type ComicId = u32;

/// Likes for a single comic together with the identities that cast them.
///
/// `likes` always equals the number of distinct voters; the two only change
/// together through [`VoteRecord::add_vote`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    votes: BTreeSet<String>,
}

impl VoteRecord {
    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn has_voted(&self, identity: &str) -> bool {
        self.votes.contains(identity)
    }

    pub fn voters(&self) -> impl Iterator<Item = &str> {
        self.votes.iter().map(String::as_str)
    }

    /// Returns `false` without changing anything if `identity` already voted.
    pub fn add_vote(&mut self, identity: &str) -> bool {
        if !self.votes.insert(identity.to_owned()) {
            return false;
        }
        self.likes += 1;
        true
    }

    /// Undoes an `add_vote` that could not be made durable.
    pub fn retract_vote(&mut self, identity: &str) -> bool {
        if !self.votes.remove(identity) {
            return false;
        }
        self.likes = self.likes.saturating_sub(1);
        true
    }

    pub fn is_consistent(&self) -> bool {
        self.likes == self.votes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty() && self.likes == 0
    }
}

/// On-disk shape of the vote file: `{"likes": {"<id>": VoteRecord}}`.
///
/// Only a JSON object is accepted; a missing `likes` key reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct Database {
    pub likes: BTreeMap<ComicId, VoteRecord>,
}

impl TryFrom<Map<String, Value>> for Database {
    type Error = serde_json::Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        let likes = match object.remove("likes") {
            Some(likes) => serde_json::from_value(likes)?,
            None => BTreeMap::new(),
        };
        Ok(Self { likes })
    }
}

impl Database {
    pub fn likes_for(&self, id: ComicId) -> u64 {
        self.likes.get(&id).map(VoteRecord::likes).unwrap_or(0)
    }

    /// First comic whose record breaks `likes == |votes|`.
    pub fn first_inconsistent(&self) -> Option<ComicId> {
        self.likes
            .iter()
            .find(|(_, record)| !record.is_consistent())
            .map(|(id, _)| *id)
    }

    pub fn total_likes(&self) -> u64 {
        self.likes.values().map(VoteRecord::likes).sum()
    }
}

/// Static metadata for one comic in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComicEntry {
    pub id: ComicId,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<OffsetDateTime>,
}

fn default_published() -> bool {
    true
}

impl ComicEntry {
    pub fn numbered(id: ComicId) -> Self {
        Self {
            id,
            file_name: format!("comic-{:03}.png", id),
            title: None,
            published: true,
            posted_at: None,
        }
    }

    pub fn url(&self) -> String {
        format!("/static/comics/{}", self.file_name)
    }
}

/// One comic as shown to readers: catalog metadata plus its live like count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Strip {
    pub id: ComicId,
    pub url: String,
    pub likes: u64,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<OffsetDateTime>,
}

impl Strip {
    pub fn new(entry: &ComicEntry, likes: u64) -> Self {
        Self {
            id: entry.id,
            url: entry.url(),
            likes,
            file_name: entry.file_name.clone(),
            title: entry.title.clone(),
            posted_at: entry.posted_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingRoute {
    Comic,
    Archive,
    Top,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComicPage {
    pub strip: Strip,
    pub page: ComicId,
    pub num_pages: ComicId,
    pub route: ListingRoute,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StripListPage {
    pub strips: Vec<Strip>,
    pub page: usize,
    pub num_pages: usize,
    pub route: ListingRoute,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikesResponse {
    pub likes: u64,
}
