//! Catalog filter construction
//!
//! Translates the optional, pipe-delimited `rating` / `category` / `price`
//! query parameters into a [`ProductFilter`]: a conjunction of criteria
//! groups, each group a disjunction over its parsed tokens. Building a
//! filter is pure and deterministic — no I/O, no clock, identical
//! parameters always produce an identical value.
//!
//! Malformed tokens are rejected with a [`FilterError`] instead of being
//! silently dropped; a present-but-empty parameter (`rating=`) is rejected
//! the same way, so absence stays the only way to skip a criterion.
//!
//! # Example
//!
//! ```rust,ignore
//! // GET /dishWashing-items?rating=3|5&price=10-20|100-200
//! let filter = ProductFilter::from_query(&query)?;
//! assert!(!filter.is_match_all());
//! ```

use crate::core::error::FilterError;
use crate::core::product::Product;
use serde::Deserialize;

/// Raw query parameters of the catalog listing endpoint
///
/// All parameters are optional and independently present or absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Pipe-delimited integers, e.g. `"3|4|5"`
    pub rating: Option<String>,

    /// Pipe-delimited free-text tokens, e.g. `"soap|detergent"`
    pub category: Option<String>,

    /// Pipe-delimited `<min>-<max>` ranges, e.g. `"10-20|30-50"`
    pub price: Option<String>,
}

/// An inclusive price interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Inclusive on both bounds
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// A compound product predicate
///
/// Groups combine with AND; tokens within a group combine with OR. Empty
/// groups contribute no criterion, so a filter with all groups empty
/// matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Product rating must be a member of this set
    pub ratings: Vec<i32>,

    /// Product category must contain one of these tokens (case-insensitive)
    pub categories: Vec<String>,

    /// Product price must fall within one of these ranges
    pub price_ranges: Vec<PriceRange>,
}

impl ProductFilter {
    /// Build a filter from raw query parameters
    pub fn from_query(query: &CatalogQuery) -> Result<Self, FilterError> {
        let mut filter = Self::default();

        if let Some(raw) = &query.rating {
            filter.ratings = parse_ratings(raw)?;
        }

        if let Some(raw) = &query.category {
            filter.categories = parse_categories(raw)?;
        }

        if let Some(raw) = &query.price {
            filter.price_ranges = parse_price_ranges(raw)?;
        }

        Ok(filter)
    }

    /// True when no criterion was added (the filter matches everything)
    pub fn is_match_all(&self) -> bool {
        self.ratings.is_empty() && self.categories.is_empty() && self.price_ranges.is_empty()
    }

    /// Evaluate the predicate against a product
    ///
    /// This is the reference semantics; the MongoDB translation in
    /// `storage::mongodb` must select exactly the products this accepts.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.ratings.is_empty() && !self.ratings.contains(&product.rating) {
            return false;
        }

        if !self.categories.is_empty() {
            let category = product.category.to_lowercase();
            let any_token = self
                .categories
                .iter()
                .any(|token| category.contains(&token.to_lowercase()));
            if !any_token {
                return false;
            }
        }

        if !self.price_ranges.is_empty() {
            let any_range = self
                .price_ranges
                .iter()
                .any(|range| range.contains(product.price));
            if !any_range {
                return false;
            }
        }

        true
    }
}

/// Parse `"3|4|5"` into a rating set
fn parse_ratings(raw: &str) -> Result<Vec<i32>, FilterError> {
    if raw.is_empty() {
        return Err(FilterError::EmptyParameter { parameter: "rating" });
    }

    raw.split('|')
        .map(|token| {
            token.parse::<i32>().map_err(|_| FilterError::InvalidRating {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse `"soap|detergent"` into category tokens
fn parse_categories(raw: &str) -> Result<Vec<String>, FilterError> {
    if raw.is_empty() {
        return Err(FilterError::EmptyParameter {
            parameter: "category",
        });
    }

    Ok(raw.split('|').map(str::to_string).collect())
}

/// Parse `"10-20|30-50"` into price ranges, splitting each token on its
/// first `-`
fn parse_price_ranges(raw: &str) -> Result<Vec<PriceRange>, FilterError> {
    if raw.is_empty() {
        return Err(FilterError::EmptyParameter { parameter: "price" });
    }

    raw.split('|')
        .map(|token| {
            let malformed = || FilterError::InvalidPriceRange {
                token: token.to_string(),
            };

            let (min, max) = token.split_once('-').ok_or_else(malformed)?;
            let min = min.parse::<f64>().map_err(|_| malformed())?;
            let max = max.parse::<f64>().map_err(|_| malformed())?;

            Ok(PriceRange { min, max })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        rating: Option<&str>,
        category: Option<&str>,
        price: Option<&str>,
    ) -> CatalogQuery {
        CatalogQuery {
            rating: rating.map(str::to_string),
            category: category.map(str::to_string),
            price: price.map(str::to_string),
        }
    }

    fn product(rating: i32, category: &str, price: f64) -> Product {
        Product::new(rating, category, price)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn test_no_parameters_builds_match_all() {
        let filter = ProductFilter::from_query(&CatalogQuery::default()).unwrap();
        assert!(filter.is_match_all());
        assert!(filter.matches(&product(1, "anything", 999.0)));
    }

    #[test]
    fn test_rating_tokens_are_parsed() {
        let filter = ProductFilter::from_query(&query(Some("3|4|5"), None, None)).unwrap();
        assert_eq!(filter.ratings, vec![3, 4, 5]);
    }

    #[test]
    fn test_price_tokens_split_on_first_dash() {
        let filter = ProductFilter::from_query(&query(None, None, Some("10-20|30-50"))).unwrap();
        assert_eq!(
            filter.price_ranges,
            vec![
                PriceRange {
                    min: 10.0,
                    max: 20.0
                },
                PriceRange {
                    min: 30.0,
                    max: 50.0
                }
            ]
        );
    }

    #[test]
    fn test_identical_queries_build_identical_filters() {
        let q = query(Some("3|5"), Some("soap"), Some("10-20"));
        let a = ProductFilter::from_query(&q).unwrap();
        let b = ProductFilter::from_query(&q).unwrap();
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // Malformed tokens
    // -----------------------------------------------------------------------

    #[test]
    fn test_non_numeric_rating_is_rejected() {
        let err = ProductFilter::from_query(&query(Some("3|high|5"), None, None)).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidRating {
                token: "high".to_string()
            }
        );
    }

    #[test]
    fn test_price_range_without_dash_is_rejected() {
        let err = ProductFilter::from_query(&query(None, None, Some("10"))).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidPriceRange {
                token: "10".to_string()
            }
        );
    }

    #[test]
    fn test_price_range_with_missing_bound_is_rejected() {
        for token in ["10-", "-20", "10-abc"] {
            let err = ProductFilter::from_query(&query(None, None, Some(token))).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidPriceRange { .. }),
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_present_but_empty_parameter_is_rejected() {
        // `rating=` carries a single empty token; the filter refuses to
        // guess between match-nothing and match-all.
        for (q, parameter) in [
            (query(Some(""), None, None), "rating"),
            (query(None, Some(""), None), "category"),
            (query(None, None, Some("")), "price"),
        ] {
            let err = ProductFilter::from_query(&q).unwrap_err();
            assert_eq!(err, FilterError::EmptyParameter { parameter });
        }
    }

    #[test]
    fn test_absent_parameter_is_not_empty_parameter() {
        // Absence skips the criterion entirely; only `param=` is an error.
        let filter = ProductFilter::from_query(&query(Some("3"), None, None)).unwrap();
        assert_eq!(filter.ratings, vec![3]);
        assert!(filter.categories.is_empty());
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    #[test]
    fn test_rating_membership() {
        let filter = ProductFilter::from_query(&query(Some("3|5"), None, None)).unwrap();

        let products = [1, 3, 4, 5, 5].map(|r| product(r, "soap", 10.0));
        let selected: Vec<i32> = products
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.rating)
            .collect();

        assert_eq!(selected, vec![3, 5, 5]);
    }

    #[test]
    fn test_price_ranges_are_inclusive_disjunctions() {
        let filter =
            ProductFilter::from_query(&query(None, None, Some("10-20|100-200"))).unwrap();

        assert!(filter.matches(&product(1, "soap", 15.0)));
        assert!(filter.matches(&product(1, "soap", 150.0)));
        assert!(!filter.matches(&product(1, "soap", 50.0)));

        // Boundary values are included on both ends.
        assert!(filter.matches(&product(1, "soap", 10.0)));
        assert!(filter.matches(&product(1, "soap", 20.0)));
        assert!(filter.matches(&product(1, "soap", 200.0)));
    }

    #[test]
    fn test_category_match_is_case_insensitive_substring() {
        let filter = ProductFilter::from_query(&query(None, Some("SOAP"), None)).unwrap();

        assert!(filter.matches(&product(1, "Dish Soap", 5.0)));
        assert!(filter.matches(&product(1, "soap", 5.0)));
        assert!(!filter.matches(&product(1, "detergent", 5.0)));
    }

    #[test]
    fn test_category_tokens_combine_with_or() {
        let filter =
            ProductFilter::from_query(&query(None, Some("soap|detergent"), None)).unwrap();

        assert!(filter.matches(&product(1, "Liquid Detergent", 5.0)));
        assert!(filter.matches(&product(1, "Bar Soap", 5.0)));
        assert!(!filter.matches(&product(1, "sponge", 5.0)));
    }

    #[test]
    fn test_criteria_groups_combine_with_and() {
        let filter =
            ProductFilter::from_query(&query(Some("4|5"), Some("soap"), Some("0-10"))).unwrap();

        assert!(filter.matches(&product(5, "soap", 8.0)));
        // Fails the rating group
        assert!(!filter.matches(&product(3, "soap", 8.0)));
        // Fails the category group
        assert!(!filter.matches(&product(5, "sponge", 8.0)));
        // Fails the price group
        assert!(!filter.matches(&product(5, "soap", 80.0)));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        // "30-20" parses but is an empty interval, not an error.
        let filter = ProductFilter::from_query(&query(None, None, Some("30-20"))).unwrap();
        assert!(!filter.matches(&product(1, "soap", 25.0)));
    }
}
