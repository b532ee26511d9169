//! Commission rates per product category.

use std::{collections::HashMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

const BROWSE_LIMIT: usize = 50;
const SEARCH_LIMIT: usize = 30;

/// Which of the two marketplace rates applies to a sale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SaleMode {
    #[default]
    Retail,
    Wholesale,
}

impl SaleMode {
    pub fn label(&self) -> &'static str {
        match self {
            SaleMode::Retail => "Retail",
            SaleMode::Wholesale => "Wholesale",
        }
    }
}

/// Retail and wholesale commission, each a fraction of the final price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct RatePair {
    #[serde(default)]
    pub retail: f64,
    #[serde(default)]
    pub wholesale: f64,
}

impl RatePair {
    pub fn flat(rate: f64) -> Self {
        Self {
            retail: rate,
            wholesale: rate,
        }
    }

    pub fn for_mode(&self, mode: SaleMode) -> f64 {
        match mode {
            SaleMode::Retail => self.retail,
            SaleMode::Wholesale => self.wholesale,
        }
    }
}

/// Dataset entry: older exports carry a single number for both modes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RateEntry {
    Flat(f64),
    Split(RatePair),
}

impl From<RateEntry> for RatePair {
    fn from(entry: RateEntry) -> Self {
        match entry {
            RateEntry::Flat(rate) => RatePair::flat(rate),
            RateEntry::Split(pair) => pair,
        }
    }
}

/// Category name to rate pair, in dataset order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateTable {
    names: Vec<String>,
    rates: HashMap<String, RatePair>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a category. A replaced category keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, pair: RatePair) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        if self.rates.insert(name.clone(), pair).is_none() {
            self.names.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RatePair> {
        self.rates.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, RatePair)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, RatePair)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (name, pair) in iter {
            table.insert(name, pair);
        }
        table
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RateTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to commission rate")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RateTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = RateTable::new();
                while let Some((name, entry)) = map.next_entry::<String, RateEntry>()? {
                    table.insert(name, entry.into());
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Read-only access to the rate table, built once at startup and shared.
#[derive(Clone, Debug, Default)]
pub struct RateLookup {
    table: RateTable,
}

impl RateLookup {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Unknown or empty categories resolve to a zero rate.
    pub fn rate_for(&self, category: &str, mode: SaleMode) -> f64 {
        if category.is_empty() {
            return 0.0;
        }
        self.table
            .get(category)
            .map(|pair| pair.for_mode(mode))
            .unwrap_or(0.0)
    }

    pub fn rate_for_selection(&self, category: Option<&str>, mode: SaleMode) -> f64 {
        category
            .map(|name| self.rate_for(name, mode))
            .unwrap_or(0.0)
    }

    pub fn category_names(&self) -> &[String] {
        self.table.names()
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Names matching `query` in table order.
    ///
    /// An empty query lists the first 50 categories; otherwise up to 30 names that
    /// contain the query as typed or case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.trim();
        let names = self.table.names().iter().map(String::as_str);
        if query.is_empty() {
            return names.take(BROWSE_LIMIT).collect();
        }

        let lowered = query.to_lowercase();
        names
            .filter(|name| name.contains(query) || name.to_lowercase().contains(&lowered))
            .take(SEARCH_LIMIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> RateLookup {
        let json = r#"{
            "Handmade Soap": { "retail": 0.08, "wholesale": 0.05 },
            "Saffron": 0.1,
            "Carpets": { "retail": 0.12 }
        }"#;
        RateLookup::new(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn resolves_rate_by_mode() {
        let rates = lookup();
        assert_eq!(rates.rate_for("Handmade Soap", SaleMode::Retail), 0.08);
        assert_eq!(rates.rate_for("Handmade Soap", SaleMode::Wholesale), 0.05);
        assert_ne!(
            rates.rate_for("Handmade Soap", SaleMode::Retail),
            rates.rate_for("Handmade Soap", SaleMode::Wholesale)
        );
    }

    #[test]
    fn legacy_number_applies_to_both_modes() {
        let rates = lookup();
        assert_eq!(rates.rate_for("Saffron", SaleMode::Retail), 0.1);
        assert_eq!(rates.rate_for("Saffron", SaleMode::Wholesale), 0.1);
    }

    #[test]
    fn missing_mode_resolves_to_zero() {
        assert_eq!(lookup().rate_for("Carpets", SaleMode::Wholesale), 0.0);
    }

    #[test]
    fn unknown_and_empty_categories_are_zero() {
        let rates = lookup();
        for mode in [SaleMode::Retail, SaleMode::Wholesale] {
            assert_eq!(rates.rate_for("Spaceships", mode), 0.0);
            assert_eq!(rates.rate_for("", mode), 0.0);
            assert_eq!(rates.rate_for_selection(None, mode), 0.0);
        }
    }

    #[test]
    fn category_names_follow_dataset_order() {
        let rates = lookup();
        assert_eq!(
            rates.category_names(),
            &["Handmade Soap", "Saffron", "Carpets"]
        );
        assert_eq!(rates.category_names(), rates.category_names());
    }

    #[test]
    fn duplicate_keeps_first_position_and_last_value() {
        let mut table = RateTable::new();
        table.insert("A", RatePair::flat(0.1));
        table.insert("B", RatePair::flat(0.2));
        table.insert("A", RatePair::flat(0.3));
        table.insert("", RatePair::flat(0.4));
        assert_eq!(table.names(), &["A", "B"]);
        assert_eq!(table.get("A"), Some(&RatePair::flat(0.3)));
    }

    #[test]
    fn search_matches_case_insensitively() {
        let rates = lookup();
        assert_eq!(rates.search("soap"), vec!["Handmade Soap"]);
        assert_eq!(rates.search("  "), vec!["Handmade Soap", "Saffron", "Carpets"]);
        assert!(rates.search("tea").is_empty());
    }

    #[test]
    fn search_caps_results() {
        let table: RateTable = (0..80)
            .map(|i| (format!("Category {i}"), RatePair::flat(0.05)))
            .collect();
        let rates = RateLookup::new(table);
        assert_eq!(rates.search("").len(), 50);
        assert_eq!(rates.search("category").len(), 30);
        assert_eq!(rates.search("Category 7").len(), 11);
    }
}
