//! Multi-valued attribute matching.
//!
//! [`matches_all`] is AND within a key: asking for models "Aqua" and "Vitz"
//! means the entity must carry both, not either. Changing that to OR would
//! change result sets, so it stays a subset test.

use crate::value::AttributeValue;

/// Returns `true` if every required value is present in `actual`.
///
/// Both sides are compared case-insensitively. A scalar `actual` is treated as
/// a one-element set and a missing one as empty. Blank required values are
/// ignored, so an empty requirement is vacuously satisfied.
///
/// ```
/// use bazaar_facets::AttributeValue;
/// use bazaar_facets::tags::matches_all;
///
/// let aqua = AttributeValue::from(vec!["Aqua"]);
/// let both = AttributeValue::from(vec!["Aqua", "Vitz"]);
///
/// assert!(!matches_all(["Aqua", "Vitz"], Some(&aqua)));
/// assert!(matches_all(["Aqua"], Some(&both)));
/// ```
pub fn matches_all<I, S>(required: I, actual: Option<&AttributeValue>) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut required = required
        .into_iter()
        .filter(|v| !v.as_ref().trim().is_empty())
        .peekable();

    if required.peek().is_none() {
        return true;
    }

    let Some(actual) = actual else {
        return false;
    };

    let present = actual.folded_set();
    required.all(|v| present.contains(&v.as_ref().to_lowercase()))
}

/// Returns `true` if `actual` equals `required`, ignoring case.
///
/// When `actual` is a value set, membership is enough. A missing attribute
/// never equals anything.
///
/// ```
/// use bazaar_facets::AttributeValue;
/// use bazaar_facets::tags::matches_equals;
///
/// assert!(matches_equals("full-time", Some(&AttributeValue::from("Full-time"))));
/// assert!(matches_equals("aqua", Some(&AttributeValue::from(vec!["Vitz", "Aqua"]))));
/// assert!(!matches_equals("Aqua", None));
/// ```
pub fn matches_equals(required: &str, actual: Option<&AttributeValue>) -> bool {
    actual.is_some_and(|actual| actual.contains_ignore_case(required))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_is_and_within_key() {
        let aqua = AttributeValue::from(vec!["Aqua"]);
        assert!(!matches_all(["Aqua", "Vitz"], Some(&aqua)));

        let both = AttributeValue::from(vec!["Aqua", "Vitz"]);
        assert!(matches_all(["Aqua"], Some(&both)));
        assert!(matches_all(["Vitz", "Aqua"], Some(&both)));
    }

    #[test]
    fn empty_requirement_is_vacuous() {
        assert!(matches_all(Vec::<String>::new(), None));
        assert!(matches_all(["", "  "], None));
    }

    #[test]
    fn scalar_actual_is_singleton() {
        let scalar = AttributeValue::from("Hybrid");
        assert!(matches_all(["hybrid"], Some(&scalar)));
        assert!(!matches_all(["hybrid", "petrol"], Some(&scalar)));
    }

    #[test]
    fn missing_actual_fails_nonempty_requirement() {
        assert!(!matches_all(["Aqua"], None));
    }

    #[test]
    fn case_insensitive_both_sides() {
        let value = AttributeValue::from(vec!["ELECTRONICS"]);
        assert!(matches_all(["electronics"], Some(&value)));
    }

    #[test]
    fn equals_scalar_and_set() {
        let scalar = AttributeValue::from("Full-time");
        assert!(matches_equals("FULL-TIME", Some(&scalar)));
        assert!(!matches_equals("Part-time", Some(&scalar)));

        let set = AttributeValue::from(vec!["Part-time", "Contract"]);
        assert!(matches_equals("contract", Some(&set)));
        assert!(!matches_equals("Full-time", Some(&set)));
    }

    #[test]
    fn equals_is_not_substring() {
        let scalar = AttributeValue::from("Full-time");
        assert!(!matches_equals("Full", Some(&scalar)));
    }
}
