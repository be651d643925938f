//! Sorting and pagination applied after filtering.
//!
//! Filtering preserves input order. Callers that want "price low to high" or
//! "newest first" sort the retained entities with [`sort_entities`] and then
//! take a page with [`paginate`].

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::FacetError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Asking price, else the budget window's lower then upper bound.
    Price,
    /// Posting time.
    Posted,
    /// Title, ignoring case.
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Posted => "posted",
            SortKey::Title => "title",
        }
    }
}

/// A single ordering clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub key: SortKey,
    pub dir: Dir,
}

impl OrderBy {
    pub fn new(key: SortKey, dir: Dir) -> Self {
        OrderBy { key, dir }
    }

    pub fn asc(key: SortKey) -> Self {
        OrderBy::new(key, Dir::Asc)
    }

    pub fn desc(key: SortKey) -> Self {
        OrderBy::new(key, Dir::Desc)
    }

    /// Compares two entities by this clause.
    ///
    /// Entities lacking a sort value go last in either direction.
    pub fn compare(&self, a: &Entity, b: &Entity) -> Ordering {
        match self.key {
            SortKey::Price => compare_present(
                a.price_sort_value(),
                b.price_sort_value(),
                self.dir,
                |x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal),
            ),
            SortKey::Posted => {
                compare_present(a.posted_at(), b.posted_at(), self.dir, |x, y| x.cmp(y))
            }
            SortKey::Title => {
                let ta = a.title().to_lowercase();
                let tb = b.title().to_lowercase();
                let ta = (!ta.trim().is_empty()).then_some(ta);
                let tb = (!tb.trim().is_empty()).then_some(tb);
                compare_present(ta, tb, self.dir, |x, y| x.cmp(y))
            }
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key.as_str(), self.dir)
    }
}

/// Parses the sort names used by the listing pages.
///
/// Accepts `price-asc`, `price-desc`, `newest`, `oldest`, `title`, or the
/// general `key:dir` form (`price:desc`, `posted:asc`).
///
/// ```
/// use bazaar_facets::{OrderBy, SortKey, Dir};
///
/// assert_eq!("newest".parse::<OrderBy>().unwrap(), OrderBy::desc(SortKey::Posted));
/// assert_eq!("price:asc".parse::<OrderBy>().unwrap(), OrderBy::asc(SortKey::Price));
/// assert!("cheapest".parse::<OrderBy>().is_err());
/// ```
impl FromStr for OrderBy {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let order = match normalized.as_str() {
            "price-asc" | "price" => OrderBy::asc(SortKey::Price),
            "price-desc" => OrderBy::desc(SortKey::Price),
            "newest" => OrderBy::desc(SortKey::Posted),
            "oldest" => OrderBy::asc(SortKey::Posted),
            "title" => OrderBy::asc(SortKey::Title),
            other => {
                let (key, dir) = other
                    .split_once(':')
                    .ok_or_else(|| FacetError::InvalidSortKey(s.to_string()))?;
                let key = match key {
                    "price" => SortKey::Price,
                    "posted" => SortKey::Posted,
                    "title" => SortKey::Title,
                    _ => return Err(FacetError::InvalidSortKey(s.to_string())),
                };
                let dir = match dir {
                    "asc" => Dir::Asc,
                    "desc" => Dir::Desc,
                    _ => return Err(FacetError::InvalidSortKey(s.to_string())),
                };
                OrderBy::new(key, dir)
            }
        };
        Ok(order)
    }
}

fn compare_present<T, F>(a: Option<T>, b: Option<T>, dir: Dir, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(cmp(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares two entities using a list of ordering clauses.
///
/// The first clause is the primary key, later ones break ties.
pub fn compare_by_orderings(a: &Entity, b: &Entity, orderings: &[OrderBy]) -> Ordering {
    for order_by in orderings {
        let ordering = order_by.compare(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sorts filtered entities in place.
///
/// The sort is stable, so entities that compare equal keep their filtered
/// (input) order.
pub fn sort_entities(entities: &mut [&Entity], orderings: &[OrderBy]) {
    if orderings.is_empty() {
        return;
    }
    entities.sort_by(|a, b| compare_by_orderings(a, b, orderings));
}

/// Skips `offset` items and keeps at most `limit`.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: Option<usize>) -> Vec<T> {
    let mut page: Vec<T> = items.into_iter().skip(offset).collect();
    if let Some(limit) = limit {
        page.truncate(limit);
    }
    page
}
