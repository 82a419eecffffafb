//! Crime category catalog and selection derivation
//!
//! The server sends selections as a comma-separated list of catalog
//! *positions* (0-based). Catalog ids are 1-based and only used for display
//! keys, never for indexing.

use tracing::debug;

pub const CATEGORY_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: u8,
    pub label: &'static str,
}

pub static CATALOG: [Category; CATEGORY_COUNT] = [
    Category { id: 1, label: "Assault" },
    Category { id: 2, label: "Battery" },
    Category { id: 3, label: "Homicide" },
    Category { id: 4, label: "Human Trafficking" },
    Category { id: 5, label: "Kidnapping" },
    Category { id: 6, label: "Narcotics" },
    Category { id: 7, label: "Public Indecency" },
    Category { id: 8, label: "Robbery" },
    Category { id: 9, label: "Sexual" },
    Category { id: 10, label: "Stalking" },
    Category { id: 11, label: "Weapon" },
];

/// Which catalog entries are active, index-aligned to `CATALOG`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionVector([bool; CATEGORY_COUNT]);

impl SelectionVector {
    pub fn is_active(&self, position: usize) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    pub fn active_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Pair each catalog entry with its active flag, in display order
    pub fn entries(&self) -> impl Iterator<Item = (&'static Category, bool)> + '_ {
        CATALOG.iter().zip(self.0.iter().copied())
    }
}

/// Build a selection vector from the server's comma-separated position list.
///
/// Tokens that are empty, non-numeric, negative or past the end of the
/// catalog are skipped.
pub fn derive_selections(raw: &str) -> SelectionVector {
    let mut selected = [false; CATEGORY_COUNT];
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<usize>() {
            Ok(pos) if pos < CATEGORY_COUNT => selected[pos] = true,
            Ok(pos) => debug!(position = pos, "Ignoring out-of-range category position"),
            Err(_) => debug!(token = %token, "Ignoring non-numeric category token"),
        }
    }
    SelectionVector(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_selects_nothing() {
        let sel = derive_selections("");
        assert_eq!(sel.as_slice().len(), CATEGORY_COUNT);
        assert_eq!(sel.active_count(), 0);
    }

    #[test]
    fn marks_exactly_the_listed_positions() {
        let sel = derive_selections("0,3,7");
        assert_eq!(sel.active_positions(), vec![0, 3, 7]);
    }

    #[test]
    fn positions_are_zero_based_not_ids() {
        // "0" is the first catalog entry (id 1), "10" the last (id 11)
        let sel = derive_selections("0,10");
        let active: Vec<&str> = sel
            .entries()
            .filter(|(_, on)| *on)
            .map(|(c, _)| c.label)
            .collect();
        assert_eq!(active, vec!["Assault", "Weapon"]);
        assert!(!derive_selections("11").is_active(10));
    }

    #[test]
    fn junk_tokens_are_ignored() {
        let sel = derive_selections("2,abc,,-1,  5 ,11,99,4x");
        assert_eq!(sel.active_positions(), vec![2, 5]);
    }

    #[test]
    fn only_garbage_selects_nothing() {
        assert_eq!(derive_selections("x,y,,").active_count(), 0);
        assert_eq!(derive_selections(",").active_count(), 0);
    }

    #[test]
    fn duplicates_are_harmless() {
        assert_eq!(derive_selections("1,1,1").active_positions(), vec![1]);
    }

    #[test]
    fn full_list_selects_everything() {
        let all: Vec<String> = (0..CATEGORY_COUNT).map(|i| i.to_string()).collect();
        let sel = derive_selections(&all.join(","));
        assert_eq!(sel.active_count(), CATEGORY_COUNT);
    }

    #[test]
    fn catalog_ids_are_sequential() {
        for (pos, cat) in CATALOG.iter().enumerate() {
            assert_eq!(cat.id as usize, pos + 1);
        }
    }
}
