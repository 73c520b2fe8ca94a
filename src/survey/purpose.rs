use std::collections::btree_map::Iter;
use std::collections::BTreeMap;

use getset::CopyGetters;
use rust_decimal::Decimal;

/// What is known about one purpose. Either field may still be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct PurposeEntry {
    population: Option<u64>,
    percentage: Option<Decimal>,
}

impl PurposeEntry {
    pub fn new(population: Option<u64>, percentage: Option<Decimal>) -> PurposeEntry {
        PurposeEntry { population, percentage }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Purposes {
    entries: BTreeMap<String, PurposeEntry>,
}

impl Purposes {
    pub fn new() -> Purposes {
        Purposes {
            entries: BTreeMap::new(),
        }
    }

    pub fn update(&mut self, purpose: &str, population: Option<u64>, percentage: Option<Decimal>) {
        let entry = self.entries.entry(purpose.to_string()).or_default();

        if population.is_some() {
            entry.population = population;
        }
        if percentage.is_some() {
            entry.percentage = percentage;
        }
    }

    pub fn get(&self, purpose: &str) -> Option<&PurposeEntry> {
        self.entries.get(purpose)
    }

    pub fn percentage(&self, purpose: &str) -> Option<Decimal> {
        self.get(purpose).and_then(PurposeEntry::percentage)
    }

    pub fn contains(&self, purpose: &str) -> bool {
        self.entries.contains_key(purpose)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, PurposeEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Purposes {
    type Item = (&'a String, &'a PurposeEntry);
    type IntoIter = Iter<'a, String, PurposeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
