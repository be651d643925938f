//! Query-string parameters to search requests.
//!
//! The search page and the wanted board encode their selections as flat
//! key/value pairs. This module turns those pairs into a validated
//! [`FilterSet`] plus the sort and page to apply afterwards, failing fast on
//! anything that would reach the engine malformed.
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `category` | exact category |
//! | `location` | location substring |
//! | `min_price`, `max_price` | price window; either makes price a constraint |
//! | `any_price` | turns the price constraint off |
//! | `attr.<key>` | attribute equals |
//! | `tag.<key>` | comma-separated values that must all be present |
//! | `q`, `mode` | keyword query and `and`/`or` |
//! | `sort` | comma-separated orderings, e.g. `price-asc,title` |
//! | `limit`, `offset` | page window |

use bazaar_facets::{FacetError, FilterSet, KeywordMode, OrderBy, Result};

/// Fallbacks applied when a request leaves a setting out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchDefaults {
    pub keyword_mode: KeywordMode,
    pub sort: Vec<OrderBy>,
    pub limit: Option<usize>,
}

/// A parsed search: what to match, then how to order and page it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub filters: FilterSet,
    pub sort: Vec<OrderBy>,
    pub limit: Option<usize>,
    pub offset: usize,
}

/// Parses pairs with built-in defaults.
///
/// ```
/// use bazaar_cli::params::parse_query_pairs;
///
/// let request = parse_query_pairs(&[
///     ("category", "Vehicle"),
///     ("max_price", "2000000"),
///     ("tag.model_name", "Aqua"),
/// ])
/// .unwrap();
///
/// assert!(request.filters.price_is_constraint);
/// assert_eq!(request.filters.category(), Some("Vehicle"));
/// ```
pub fn parse_query_pairs<K, V>(pairs: &[(K, V)]) -> Result<SearchRequest>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    parse_query_pairs_with(pairs, &SearchDefaults::default())
}

/// Parses pairs, falling back to `defaults` for mode, sort and limit.
pub fn parse_query_pairs_with<K, V>(
    pairs: &[(K, V)],
    defaults: &SearchDefaults,
) -> Result<SearchRequest>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut filters = FilterSet::new();
    let mut any_price = false;
    let mut mode = None;
    let mut sort = None;
    let mut limit = None;
    let mut offset = 0;

    for (key, value) in pairs {
        let key = key.as_ref().trim();
        let value = value.as_ref().trim();

        match key {
            "category" => filters.category = non_blank(value),
            "location" => filters.location_query = non_blank(value),
            "min_price" => filters.price_min = parse_number(key, value)?,
            "max_price" => filters.price_max = parse_number(key, value)?,
            "any_price" => any_price = parse_flag(key, value)?,
            "q" => filters.keyword_query = non_blank(value),
            "mode" => {
                if !value.is_empty() {
                    mode = Some(value.parse::<KeywordMode>()?);
                }
            }
            "sort" => {
                if !value.is_empty() {
                    sort = Some(parse_sort(value)?);
                }
            }
            "limit" => limit = parse_count(key, value)?,
            "offset" => offset = parse_count(key, value)?.unwrap_or(0),
            _ => {
                if let Some(attr) = key.strip_prefix("attr.") {
                    let attr = attribute_key(key, attr)?;
                    if !value.is_empty() {
                        filters = filters.attr_eq(attr, value);
                    }
                } else if let Some(attr) = key.strip_prefix("tag.") {
                    let attr = attribute_key(key, attr)?;
                    filters = filters.tags_all(
                        attr,
                        value.split(',').map(str::trim).filter(|v| !v.is_empty()),
                    );
                } else {
                    return Err(invalid(key, "unknown parameter"));
                }
            }
        }
    }

    filters.price_is_constraint =
        !any_price && (filters.price_min.is_some() || filters.price_max.is_some());
    filters.keyword_mode = mode.unwrap_or(defaults.keyword_mode);
    filters.validate()?;

    Ok(SearchRequest {
        filters,
        sort: sort.unwrap_or_else(|| defaults.sort.clone()),
        limit: limit.or(defaults.limit),
        offset,
    })
}

/// Splits a `key=value` argument.
///
/// ```
/// use bazaar_cli::params::parse_pair;
///
/// assert_eq!(parse_pair("tag.model_name=Aqua,Vitz").unwrap(),
///            ("tag.model_name".to_string(), "Aqua,Vitz".to_string()));
/// assert!(parse_pair("category").is_err());
/// ```
pub fn parse_pair(arg: &str) -> std::result::Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))
}

/// Parses a comma-separated list of orderings.
pub fn parse_sort(value: &str) -> Result<Vec<OrderBy>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<OrderBy>)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn invalid(name: &str, reason: &str) -> FacetError {
    FacetError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number(name: &str, value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    let number = value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| invalid(name, "expected a number"))?;
    Ok(Some(number))
}

fn parse_count(name: &str, value: &str) -> Result<Option<usize>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| invalid(name, "expected a non-negative integer"))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, "expected true or false")),
    }
}

fn attribute_key<'a>(name: &str, attr: &'a str) -> Result<&'a str> {
    let attr = attr.trim();
    if attr.is_empty() {
        return Err(invalid(name, "missing attribute key"));
    }
    Ok(attr)
}
