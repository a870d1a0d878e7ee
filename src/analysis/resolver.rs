// src/analysis/resolver.rs
use crate::config::{region_name, Dataset, RegionId, StateRecord};

pub const SUGGESTION_LIMIT: usize = 8;

/// What a caller wants resolved: a display name typed or picked by the user,
/// or a symbolic id coming from the map.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'q> {
    Name(&'q str),
    Region(&'q RegionId),
}

/// Maps names and map ids onto dataset records. A miss is `None`, never an
/// error; callers show the national or "no data" view instead.
#[derive(Debug, Clone, Copy)]
pub struct StateResolver<'d> {
    dataset: &'d Dataset,
}

impl<'d> StateResolver<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self { dataset }
    }

    pub fn resolve(&self, lookup: Lookup<'_>) -> Option<&'d StateRecord> {
        match lookup {
            Lookup::Name(name) => self.by_name(name),
            Lookup::Region(id) => region_name(id.as_str()).and_then(|name| self.by_name(name)),
        }
    }

    /// Exact full-name match, ignoring case and surrounding whitespace.
    pub fn by_name(&self, name: &str) -> Option<&'d StateRecord> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        if let Some(record) = self.dataset.get(name.trim()) {
            return Some(record);
        }
        self.dataset.iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, record)| record)
    }

    /// Search-box suggestions: display names containing `query`, in dataset
    /// order, at most [`SUGGESTION_LIMIT`].
    pub fn suggest(&self, query: &str) -> Vec<&'d str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.dataset.records()
            .map(|record| record.full_name.as_str())
            .filter(|name| name.to_lowercase().contains(&query))
            .take(SUGGESTION_LIMIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        ["Maharashtra", "Madhya Pradesh", "Manipur", "Kerala", "Goa"]
            .into_iter()
            .map(StateRecord::named)
            .collect()
    }

    #[test]
    fn test_name_lookup_ignores_case_and_whitespace() {
        let dataset = dataset();
        let resolver = StateResolver::new(&dataset);
        let expected = resolver.resolve(Lookup::Name("Maharashtra")).unwrap();

        for query in ["maharashtra", "MAHARASHTRA", " Maharashtra "] {
            let found = resolver.resolve(Lookup::Name(query)).unwrap();
            assert!(std::ptr::eq(found, expected), "{query:?} resolved elsewhere");
        }
    }

    #[test]
    fn test_unknown_or_partial_names_resolve_to_none() {
        let dataset = dataset();
        let resolver = StateResolver::new(&dataset);
        assert!(resolver.resolve(Lookup::Name("Atlantis")).is_none());
        assert!(resolver.resolve(Lookup::Name("Mahara")).is_none());
        assert!(resolver.resolve(Lookup::Name("   ")).is_none());
    }

    #[test]
    fn test_region_ids_go_through_the_table() {
        let dataset = dataset();
        let resolver = StateResolver::new(&dataset);
        let record = resolver.resolve(Lookup::Region(&RegionId::from("INMH"))).unwrap();
        assert_eq!(record.full_name, "Maharashtra");
        assert!(resolver.resolve(Lookup::Region(&RegionId::from("ZZZZ"))).is_none());
        // in the table but not in the dataset
        assert!(resolver.resolve(Lookup::Region(&RegionId::from("INBR"))).is_none());
    }

    #[test]
    fn test_suggestions_are_substring_matches() {
        let dataset = dataset();
        let resolver = StateResolver::new(&dataset);
        assert_eq!(resolver.suggest("ma"), ["Maharashtra", "Madhya Pradesh", "Manipur"]);
        assert_eq!(resolver.suggest("RAL"), ["Kerala"]);
        assert!(resolver.suggest("").is_empty());
    }

    #[test]
    fn test_suggestions_are_capped() {
        let dataset: Dataset = (0..12).map(|i| StateRecord::named(format!("State {i}"))).collect();
        let resolver = StateResolver::new(&dataset);
        assert_eq!(resolver.suggest("state").len(), SUGGESTION_LIMIT);
    }
}
