//! Search, wanted-board and facet commands.
//!
//! Each command takes an already-loaded corpus and returns a serializable
//! report. Loading, argument parsing and rendering happen in the caller.

use std::fmt::Write as _;
use std::path::Path;

use bazaar_facets::{paginate, sort_entities, Entity, FacetCatalog, PredicateEvaluator};
use serde::Serialize;

use crate::output::Report;
use crate::params::SearchRequest;
use crate::records::{load_corpus, CorpusError, ListingRecord, WantedRecord};

/// Which board a corpus belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    /// Published listings; each carries an asking price.
    Listings,
    /// Buyers' wanted requests; each carries a budget window.
    Wanted,
}

impl Board {
    /// Loads a corpus file of this board's record type.
    pub fn load(self, path: &Path) -> Result<Vec<Entity>, CorpusError> {
        match self {
            Board::Listings => load_corpus::<ListingRecord>(path),
            Board::Wanted => load_corpus::<WantedRecord>(path),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Board::Listings => "listings",
            Board::Wanted => "wanted requests",
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

// ============================================================================
// Search
// ============================================================================

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub board: Board,
    /// Number of entities in the corpus.
    pub candidates: usize,
    /// Number of matches before paging.
    pub total: usize,
    pub offset: usize,
    pub limit: Option<usize>,
    pub sort: Vec<String>,
    pub results: Vec<Entity>,
}

/// Filters, sorts and pages a corpus.
pub fn search(corpus: &[Entity], request: &SearchRequest, board: Board) -> SearchReport {
    let evaluator = PredicateEvaluator::new(&request.filters);
    let mut matched = evaluator.filter(corpus);
    let total = matched.len();

    sort_entities(&mut matched, &request.sort);
    let page = paginate(matched, request.offset, request.limit);

    tracing::info!(
        board = %board,
        candidates = corpus.len(),
        matched = total,
        returned = page.len(),
        "search complete"
    );

    SearchReport {
        board,
        candidates: corpus.len(),
        total,
        offset: request.offset,
        limit: request.limit,
        sort: request.sort.iter().map(ToString::to_string).collect(),
        results: page.into_iter().cloned().collect(),
    }
}

impl Report for SearchReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        if self.results.is_empty() {
            let _ = write!(out, "No matching {} ({} matched)", self.board, self.total);
            return out;
        }

        let first = self.offset + 1;
        let last = self.offset + self.results.len();
        let _ = writeln!(
            out,
            "{} matching {} (showing {}-{})",
            self.total, self.board, first, last
        );
        for entity in &self.results {
            let _ = writeln!(
                out,
                "{:<10} {:<32} {:<12} {:<24} {}",
                entity.id(),
                entity.title(),
                entity.category().unwrap_or("any"),
                entity.locations().join(", "),
                price_label(entity)
            );
        }
        out.truncate(out.trim_end().len());
        out
    }
}

/// Describes an entity's price for display.
pub fn price_label(entity: &Entity) -> String {
    if let Some(price) = entity.price_value() {
        return format_amount(price);
    }
    if entity.is_price_unconstrained() {
        return "any budget".to_string();
    }
    match entity.price_range().map(|r| (r.min, r.max)) {
        Some((Some(min), Some(max))) => format!("{} - {}", format_amount(min), format_amount(max)),
        Some((Some(min), None)) => format!("from {}", format_amount(min)),
        Some((None, Some(max))) => format!("up to {}", format_amount(max)),
        _ => "-".to_string(),
    }
}

/// Formats a whole amount with thousands separators.
///
/// ```
/// use bazaar_cli::commands::format_amount;
///
/// assert_eq!(format_amount(1_500_000.0), "1,500,000");
/// assert_eq!(format_amount(950.4), "950");
/// ```
pub fn format_amount(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}

// ============================================================================
// Facets
// ============================================================================

/// Facets for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryFacets {
    pub category: String,
    /// Number of entities in the category.
    pub items: usize,
    #[serde(flatten)]
    pub catalog: FacetCatalog,
}

/// Facet catalogs for one or every category of a corpus.
#[derive(Debug, Clone, Serialize)]
pub struct FacetReport {
    pub board: Board,
    pub categories: Vec<CategoryFacets>,
    #[serde(skip)]
    display_limit: usize,
}

/// Builds facet catalogs.
///
/// With a category, only entities carrying exactly that category contribute.
/// Without one, the corpus is split by category; entities with no category
/// are left out.
pub fn facets(
    corpus: &[Entity],
    category: Option<&str>,
    board: Board,
    display_limit: usize,
) -> FacetReport {
    let categories = match category {
        Some(category) => {
            let items: Vec<Entity> = corpus
                .iter()
                .filter(|e| e.category() == Some(category))
                .cloned()
                .collect();
            vec![CategoryFacets {
                category: category.to_string(),
                items: items.len(),
                catalog: FacetCatalog::build(&items),
            }]
        }
        None => FacetCatalog::by_category(corpus)
            .into_iter()
            .map(|(category, catalog)| CategoryFacets {
                items: corpus
                    .iter()
                    .filter(|e| e.category() == Some(category.as_str()))
                    .count(),
                category,
                catalog,
            })
            .collect(),
    };

    FacetReport {
        board,
        categories,
        display_limit,
    }
}

impl Report for FacetReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        if self.categories.is_empty() {
            let _ = write!(out, "No categorised {}", self.board);
            return out;
        }

        for section in &self.categories {
            let _ = writeln!(out, "{} ({} {})", section.category, section.items, self.board);
            if section.catalog.is_empty() {
                let _ = writeln!(out, "  (no attributes)");
            }
            for facet in section.catalog.facets() {
                let shown = section.catalog.top_values(&facet.key, self.display_limit);
                let values: Vec<String> = shown
                    .iter()
                    .map(|v| format!("{} ({})", v.value, v.count))
                    .collect();
                let mut line = format!("  {}: {}", facet.key, values.join(", "));
                let hidden = facet.values.len().saturating_sub(shown.len());
                if hidden > 0 {
                    let _ = write!(line, ", +{hidden} more");
                }
                let _ = writeln!(out, "{line}");
            }
        }
        out.truncate(out.trim_end().len());
        out
    }
}
