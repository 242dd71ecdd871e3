//! The Euler-pole model table and its age queries.
//!
//! A table holds the site/pole records of one reconstruction model in load
//! order and answers three kinds of questions:
//!
//! - plate membership (`entries_for_plate`, `plate_ids`)
//! - exact plate/age lookups (`entries_for_plate_and_age`)
//! - relevant-age selection for an interpolation window (`relevant_ages`)
//!
//! The relevant-age selection is the interesting part: given a sparse,
//! non-uniformly sampled set of reconstruction ages, find the minimal
//! ordered subset a caller needs to interpolate anywhere inside an age
//! window, including a bracketing age just outside each window edge.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::{EulerPoleEntry, TableStats};
use crate::error::{AppError, ErrorKind};
use crate::io::ingest;

/// Parsed Euler-pole reconstructions for one model.
///
/// Entries are immutable after load and kept in the order the source
/// delivered them. Model files are usually grouped by plate and ascending
/// in age within a plate, but nothing here relies on that globally.
#[derive(Debug, Clone, Default)]
pub struct EulerPoleTable {
    entries: Vec<EulerPoleEntry>,
}

impl EulerPoleTable {
    /// Load a table from a model CSV file.
    pub fn load_file(path: &Path) -> Result<Self, AppError> {
        Ok(Self {
            entries: ingest::parse_file(path)?,
        })
    }

    /// Load a table from in-memory text (literal `\n` sequences are
    /// normalized to real newlines before parsing).
    pub fn load_text(text: &str) -> Result<Self, AppError> {
        Ok(Self {
            entries: ingest::parse_text(text)?,
        })
    }

    /// Replace this table's contents from a file.
    ///
    /// The previous entries are discarded before parsing, never merged; on
    /// error the table is left empty.
    pub fn reload_file(&mut self, path: &Path) -> Result<(), AppError> {
        self.entries = Vec::new();
        self.entries = ingest::parse_file(path)?;
        Ok(())
    }

    /// Replace this table's contents from in-memory text. Same semantics as
    /// [`EulerPoleTable::reload_file`].
    pub fn reload_text(&mut self, text: &str) -> Result<(), AppError> {
        self.entries = Vec::new();
        self.entries = ingest::parse_text(text)?;
        Ok(())
    }

    /// All entries, in load order.
    pub fn all_entries(&self) -> &[EulerPoleEntry] {
        &self.entries
    }

    /// All entries associated with a plate.
    pub fn entries_for_plate(&self, plate_id: u32) -> Vec<&EulerPoleEntry> {
        self.entries
            .iter()
            .filter(|e| e.plate_id() == Some(plate_id))
            .collect()
    }

    /// Entries matching a plate and an exact reconstruction age.
    ///
    /// Usually a single entry. At a plate crossover (the age at which
    /// rotation switches to a different reference plate) two entries share
    /// the nominal age, and both are returned. Fails with a NotFound error
    /// when nothing matches; an empty result is never silently returned.
    pub fn entries_for_plate_and_age(
        &self,
        plate_id: u32,
        age: u32,
    ) -> Result<Vec<&EulerPoleEntry>, AppError> {
        let matches: Vec<&EulerPoleEntry> = self
            .entries
            .iter()
            .filter(|e| e.plate_id() == Some(plate_id) && e.age == age)
            .collect();

        if matches.is_empty() {
            return Err(AppError::new(
                ErrorKind::NotFound,
                format!("No entry for age={age} and plate_id={plate_id} found in Euler pole table."),
            ));
        }

        Ok(matches)
    }

    /// Distinct plate ids present in the table, ascending.
    pub fn plate_ids(&self) -> BTreeSet<u32> {
        self.entries.iter().filter_map(|e| e.plate_id()).collect()
    }

    /// Summary stats for reports. `None` for an empty table.
    pub fn stats(&self) -> Option<TableStats> {
        let first = self.entries.first()?;
        let mut age_min = first.age;
        let mut age_max = first.age;
        for entry in &self.entries {
            age_min = age_min.min(entry.age);
            age_max = age_max.max(entry.age);
        }
        Some(TableStats {
            n_entries: self.entries.len(),
            n_plates: self.plate_ids().len(),
            age_min,
            age_max,
        })
    }

    /// Ages needed to interpolate a reconstruction anywhere in
    /// `[min_age, max_age]` for a plate, ascending (recent to less recent).
    ///
    /// One pass over the plate's entries in stored order:
    ///
    /// - every in-window age is collected, except an age equal to the one
    ///   just inserted (crossover rows repeat an age back-to-back; keep one)
    /// - the closest age at or below `min_age` and the closest at or above
    ///   `max_age` are tracked as bracket candidates; a candidate strictly
    ///   outside the window is appended once at the end, while a candidate
    ///   landing exactly on a window edge was already collected in-window
    /// - the result is sorted ascending before returning
    ///
    /// The duplicate suppression is keyed on insertion order, not sorted
    /// order: duplicate ages separated by another age both survive when the
    /// stored sequence is not ascending. Model files keep each plate's rows
    /// age-sorted, which is the case this guard is for.
    ///
    /// A plate with no entries yields an empty sequence: no brackets exist.
    pub fn relevant_ages(&self, plate_id: u32, min_age: u32, max_age: u32) -> Vec<u32> {
        let mut ages: Vec<u32> = Vec::new();

        let mut left_outside: Option<u32> = None;
        let mut right_outside: Option<u32> = None;

        for entry in self.entries.iter().filter(|e| e.plate_id() == Some(plate_id)) {
            if entry.age >= min_age && entry.age <= max_age && ages.last() != Some(&entry.age) {
                ages.push(entry.age);
            }

            if entry.age <= min_age {
                left_outside = Some(left_outside.map_or(entry.age, |a| a.max(entry.age)));
            }

            if entry.age >= max_age {
                right_outside = Some(right_outside.map_or(entry.age, |a| a.min(entry.age)));
            }
        }

        if let Some(age) = left_outside {
            if age < min_age {
                ages.push(age);
            }
        }

        if let Some(age) = right_outside {
            if age > max_age {
                ages.push(age);
            }
        }

        ages.sort_unstable();
        ages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sample_id: &str, age: u32) -> EulerPoleEntry {
        EulerPoleEntry {
            sample_id: sample_id.to_string(),
            latitude: 10.0,
            longitude: 20.0,
            age,
            age_min: age,
            age_max: age,
        }
    }

    fn table_with_ages(plate: u32, ages: &[u32]) -> EulerPoleTable {
        EulerPoleTable {
            entries: ages.iter().map(|&a| entry(&plate.to_string(), a)).collect(),
        }
    }

    #[test]
    fn relevant_ages_brackets_both_sides() {
        let table = table_with_ages(101, &[10, 50, 100, 150]);
        assert_eq!(table.relevant_ages(101, 60, 120), vec![50, 100, 150]);
    }

    #[test]
    fn relevant_ages_exact_boundary_adds_no_brackets() {
        let table = table_with_ages(101, &[10, 50, 100]);
        assert_eq!(table.relevant_ages(101, 50, 100), vec![50, 100]);
    }

    #[test]
    fn relevant_ages_empty_plate_is_empty() {
        let table = table_with_ages(101, &[]);
        assert!(table.relevant_ages(101, 0, 1000).is_empty());

        // A populated table is just as empty for a plate it doesn't know.
        let table = table_with_ages(101, &[10, 50]);
        assert!(table.relevant_ages(999, 0, 1000).is_empty());
    }

    #[test]
    fn relevant_ages_all_inside_returns_sorted_window() {
        let table = table_with_ages(101, &[30, 10, 20]);
        assert_eq!(table.relevant_ages(101, 0, 100), vec![10, 20, 30]);
    }

    #[test]
    fn relevant_ages_none_inside_yields_only_brackets() {
        let table = table_with_ages(101, &[10, 200]);
        assert_eq!(table.relevant_ages(101, 50, 100), vec![10, 200]);
    }

    #[test]
    fn relevant_ages_output_is_sorted_regardless_of_scan_order() {
        let table = table_with_ages(101, &[150, 100, 50, 10]);
        let ages = table.relevant_ages(101, 60, 120);
        let mut sorted = ages.clone();
        sorted.sort_unstable();
        assert_eq!(ages, sorted);
        assert_eq!(ages, vec![50, 100, 150]);
    }

    #[test]
    fn relevant_ages_suppresses_adjacent_crossover_duplicates() {
        // Crossover: two rows share age 320, stored back-to-back.
        let table = table_with_ages(102, &[300, 320, 320, 340]);
        assert_eq!(table.relevant_ages(102, 300, 340), vec![300, 320, 340]);
    }

    #[test]
    fn relevant_ages_separated_duplicates_survive() {
        // Suppression is keyed on the previously inserted age, so duplicates
        // separated by another age both survive when the stored order is not
        // ascending. Pinned so a change here is a conscious one.
        let table = table_with_ages(102, &[320, 300, 320]);
        assert_eq!(table.relevant_ages(102, 290, 340), vec![300, 320, 320]);
    }

    #[test]
    fn relevant_ages_age_zero_candidate() {
        // Age 0 is a legitimate left bracket, not an "unset" marker.
        let table = table_with_ages(101, &[0, 50]);
        assert_eq!(table.relevant_ages(101, 10, 40), vec![0, 50]);
    }

    #[test]
    fn plate_age_lookup_returns_single_match() {
        let table = table_with_ages(101, &[10, 50, 100]);
        let matches = table.entries_for_plate_and_age(101, 50).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].age, 50);
    }

    #[test]
    fn plate_age_lookup_returns_crossover_pair() {
        let table = table_with_ages(102, &[300, 320, 320, 340]);
        let matches = table.entries_for_plate_and_age(102, 320).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|e| e.age == 320));
    }

    #[test]
    fn plate_age_lookup_missing_is_not_found() {
        // The lookup must actually filter: a match succeeds and only a
        // genuine miss (wrong age, or wrong plate) raises NotFound.
        let table = table_with_ages(101, &[10, 50, 100]);

        let err = table.entries_for_plate_and_age(101, 60).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = table.entries_for_plate_and_age(999, 50).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn entries_for_plate_filters_and_keeps_load_order() {
        let table = EulerPoleTable {
            entries: vec![
                entry("101", 10),
                entry("201", 20),
                entry("101", 30),
                entry("west-australia", 40), // no numeric plate id
            ],
        };

        let plate_101 = table.entries_for_plate(101);
        assert_eq!(plate_101.len(), 2);
        assert_eq!(plate_101[0].age, 10);
        assert_eq!(plate_101[1].age, 30);

        assert_eq!(table.all_entries().len(), 4);
        let ids: Vec<u32> = table.plate_ids().into_iter().collect();
        assert_eq!(ids, vec![101, 201]);
    }

    #[test]
    fn load_text_and_reload_replace_contents() {
        let mut table = EulerPoleTable::load_text("101,1.0,2.0,10,5,15\n101,1.0,2.0,20,15,25\n").unwrap();
        assert_eq!(table.all_entries().len(), 2);

        table.reload_text("201,3.0,4.0,30,25,35\n").unwrap();
        assert_eq!(table.all_entries().len(), 1);
        assert_eq!(table.all_entries()[0].sample_id, "201");

        // A failed reload leaves the table empty, not half-merged.
        assert!(table.reload_text("bad,row\n").is_err());
        assert!(table.all_entries().is_empty());
    }

    #[test]
    fn stats_cover_age_range_and_plate_count() {
        let table = EulerPoleTable {
            entries: vec![entry("101", 10), entry("201", 150), entry("101", 60)],
        };
        let stats = table.stats().unwrap();
        assert_eq!(stats.n_entries, 3);
        assert_eq!(stats.n_plates, 2);
        assert_eq!((stats.age_min, stats.age_max), (10, 150));

        assert!(EulerPoleTable::default().stats().is_none());
    }
}
