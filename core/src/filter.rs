//! Optional query filters for car listing and stats aggregation.
//!
//! The backend accepts these as plain query parameters. A default (empty)
//! filter produces no query string at all, so the unfiltered request shape
//! stays `GET /cars/`.

/// Filter for `GET /cars/`.
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    pub make: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl CarFilter {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(make) = &self.make {
            pairs.push(("make", make.clone()));
        }
        if let Some(condition) = &self.condition {
            pairs.push(("condition", condition.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        if let Some(min_year) = self.min_year {
            pairs.push(("min_year", min_year.to_string()));
        }
        if let Some(max_year) = self.max_year {
            pairs.push(("max_year", max_year.to_string()));
        }
        pairs
    }
}

/// Filter applied before the stats aggregation on `GET /cars/stats/aggregation`.
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub make: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl StatsFilter {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(make) = &self.make {
            pairs.push(("make", make.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        pairs
    }
}

/// Percent-encode key/value pairs into a query string, without the leading
/// `?`. Empty input yields an empty string.
pub(crate) fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_produces_no_pairs() {
        assert!(CarFilter::default().to_pairs().is_empty());
        assert!(StatsFilter::default().to_pairs().is_empty());
    }

    #[test]
    fn car_filter_emits_pairs_in_declaration_order() {
        let filter = CarFilter {
            make: Some("Toyota".to_string()),
            min_year: Some(2015),
            ..Default::default()
        };
        assert_eq!(
            filter.to_pairs(),
            vec![("make", "Toyota".to_string()), ("min_year", "2015".to_string())]
        );
    }

    #[test]
    fn encode_query_escapes_reserved_characters() {
        let pairs = [("user_id", "a b&c".to_string())];
        assert_eq!(encode_query(&pairs), "user_id=a%20b%26c");
    }

    #[test]
    fn encode_query_joins_multiple_pairs() {
        let pairs = [
            ("make", "Alfa Romeo".to_string()),
            ("max_price", "15000".to_string()),
        ];
        assert_eq!(encode_query(&pairs), "make=Alfa%20Romeo&max_price=15000");
    }
}
