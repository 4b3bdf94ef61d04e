//! Suggestion index built from a batch of places

use crate::places::PlaceRecord;
use std::collections::{BTreeMap, BTreeSet};

/// A city as indexed: its canonical key and preferred display form
#[derive(Debug, Clone, PartialEq, Eq)]
struct CityEntry {
    key: String,
    display: String,
}

/// Cities, tags and place names known from the last fetch.
///
/// Rebuilt wholesale from each batch of records; never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionIndex {
    /// Spelling-insensitive form -> city. "The Hague" and "Thehague" share
    /// one entry.
    cities: BTreeMap<String, CityEntry>,
    /// Lowercase tags
    tags: BTreeSet<String>,
    /// Place names, case preserved
    place_names: BTreeSet<String>,
}

/// Canonical key for a city: lowercase, whitespace runs become `-`
pub fn city_key(city: &str) -> String {
    city.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Lowercase with whitespace and dashes removed
fn compact(city: &str) -> String {
    city.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl SuggestionIndex {
    /// Build an index from place records
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PlaceRecord>,
    {
        let mut index = Self::default();

        for record in records {
            if let Some(ref city) = record.city {
                index.add_city(city);
            }

            for tag in &record.tags {
                let tag = tag.trim().to_lowercase();
                if !tag.is_empty() {
                    index.tags.insert(tag);
                }
            }

            if !record.name.trim().is_empty() {
                index.place_names.insert(record.name.clone());
            }
        }

        index
    }

    fn add_city(&mut self, city: &str) {
        let display = city.trim();
        if display.is_empty() {
            return;
        }

        let entry = CityEntry {
            key: city_key(display),
            display: display.to_string(),
        };
        match self.cities.get_mut(&compact(display)) {
            // Multi-word spellings win over single-word ones
            Some(existing) => {
                if display.contains(' ') && !existing.display.contains(' ') {
                    *existing = entry;
                }
            }
            None => {
                self.cities.insert(compact(display), entry);
            }
        }
    }

    /// Map a key or display form back to the city's canonical key
    pub fn canonical_city(&self, value: &str) -> Option<&str> {
        self.cities
            .get(&compact(value))
            .map(|entry| entry.key.as_str())
    }

    /// Iterate over (key, display) pairs
    pub fn cities(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cities
            .values()
            .map(|entry| (entry.key.as_str(), entry.display.as_str()))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn place_names(&self) -> impl Iterator<Item = &str> {
        self.place_names.iter().map(String::as_str)
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// True when nothing has been indexed yet
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.tags.is_empty() && self.place_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str, city: Option<&str>, tags: &[&str]) -> PlaceRecord {
        let mut p = PlaceRecord::new(id, name, 4.0).with_tags(tags.iter().copied());
        p.city = city.map(String::from);
        p
    }

    #[test]
    fn test_empty_input() {
        let index = SuggestionIndex::build(Vec::<PlaceRecord>::new().iter());
        assert!(index.is_empty());
        assert_eq!(index.city_count(), 0);
    }

    #[test]
    fn test_extracts_all_three_collections() {
        let records = vec![
            place("1", "Coffee Company", Some("Amsterdam"), &["WiFi", "cozy"]),
            place("2", "Espresso Bar", Some(" amsterdam "), &["wifi"]),
            place("3", "Nowhere Beans", None, &[]),
        ];
        let index = SuggestionIndex::build(&records);

        assert_eq!(index.cities().collect::<Vec<_>>(), vec![("amsterdam", "Amsterdam")]);
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["cozy", "wifi"]);
        assert_eq!(
            index.place_names().collect::<Vec<_>>(),
            vec!["Coffee Company", "Espresso Bar", "Nowhere Beans"]
        );
    }

    #[test]
    fn test_first_spaced_form_sticks() {
        let records = vec![
            place("1", "a", Some("THE HAGUE"), &[]),
            place("2", "b", Some("the hague"), &[]),
        ];
        let index = SuggestionIndex::build(&records);
        assert_eq!(index.cities().collect::<Vec<_>>(), vec![("the-hague", "THE HAGUE")]);
    }

    #[test]
    fn test_later_spaced_form_replaces_compact_one() {
        let records = vec![
            place("1", "a", Some("Thehague"), &[]),
            place("2", "b", Some("The Hague"), &[]),
            place("3", "c", Some("THEHAGUE"), &[]),
        ];
        let index = SuggestionIndex::build(&records);
        assert_eq!(index.city_count(), 1);
        assert_eq!(index.cities().collect::<Vec<_>>(), vec![("the-hague", "The Hague")]);
    }

    #[test]
    fn test_city_key_is_slug() {
        assert_eq!(city_key("The Hague"), "the-hague");
        assert_eq!(city_key("  Alphen aan  den Rijn "), "alphen-aan-den-rijn");
        assert_eq!(city_key("Amsterdam"), "amsterdam");
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let records = vec![place("1", "  ", Some("   "), &["", " "])];
        assert!(SuggestionIndex::build(&records).is_empty());
    }

    #[test]
    fn test_canonical_city() {
        let records = vec![place("1", "Morning Brew", Some("The Hague"), &[])];
        let index = SuggestionIndex::build(&records);
        assert_eq!(index.canonical_city("The Hague"), Some("the-hague"));
        assert_eq!(index.canonical_city("the hague"), Some("the-hague"));
        assert_eq!(index.canonical_city("the-hague"), Some("the-hague"));
        assert_eq!(index.canonical_city("Utrecht"), None);
    }
}
