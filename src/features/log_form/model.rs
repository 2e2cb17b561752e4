use tracing::{debug, warn};

use crate::core::error::{AppError, Collection, Result};
use crate::features::log_form::directory::EmployeeDirectory;
use crate::features::log_form::dtos::{CrewEntry, LogRecord, PhotoRef};
use crate::shared::constants::{MAX_CREW_SIZE, MAX_PHOTOS};

/// Single source of truth for the in-progress daily log
///
/// Crew and photo counts never exceed their caps and crew names stay
/// pairwise distinct after every operation. The model performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormModel {
    directory: EmployeeDirectory,
    record: LogRecord,
    pending: Option<String>,
}

impl LogFormModel {
    pub fn new(directory: EmployeeDirectory) -> Self {
        Self {
            directory,
            record: LogRecord::default(),
            pending: None,
        }
    }

    pub fn set_foreman(&mut self, name: impl Into<String>) {
        self.record.foreman = name.into();
    }

    pub fn set_date(&mut self, text: impl Into<String>) {
        self.record.date = text.into();
    }

    pub fn set_task_description(&mut self, text: impl Into<String>) {
        self.record.task_description = text.into();
    }

    /// Choose the employee the next add will commit; an empty name clears the choice
    pub fn select_candidate(&mut self, employee_name: &str) -> Result<()> {
        if employee_name.is_empty() {
            self.pending = None;
            return Ok(());
        }

        if !self.directory.contains(employee_name) {
            warn!("Rejected selection outside directory: {}", employee_name);
            return Err(AppError::UnknownEmployee(employee_name.to_string()));
        }

        self.pending = Some(employee_name.to_string());
        Ok(())
    }

    /// Commit the pending selection as a new crew entry with empty hours
    ///
    /// Fails without changing anything when nothing is selected, when the
    /// employee is already on the crew, or when the crew is full.
    pub fn add_pending_as_crew_entry(&mut self) -> Result<()> {
        let name = self.pending.as_deref().ok_or(AppError::NoSelection)?;

        if self.crew_contains(name) {
            warn!("Rejected duplicate crew entry: {}", name);
            return Err(AppError::DuplicateEntry(name.to_string()));
        }

        if self.record.crew.len() >= MAX_CREW_SIZE {
            warn!("Rejected crew entry {}: crew is full", name);
            return Err(AppError::CapacityExceeded {
                collection: Collection::Crew,
                limit: MAX_CREW_SIZE,
            });
        }

        let entry = CrewEntry::new(name);
        debug!("Added crew entry: {}", entry.employee_name);
        self.record.crew.push(entry);
        self.pending = None;
        Ok(())
    }

    /// Remove an employee from the crew; returns whether anything was removed
    pub fn remove_crew_entry(&mut self, employee_name: &str) -> bool {
        let before = self.record.crew.len();
        self.record
            .crew
            .retain(|entry| entry.employee_name != employee_name);
        let removed = self.record.crew.len() != before;
        if removed {
            debug!("Removed crew entry: {}", employee_name);
        }
        removed
    }

    /// Replace an employee's hours; returns false if they are not on the crew
    pub fn set_hours(&mut self, employee_name: &str, hours: impl Into<String>) -> bool {
        match self
            .record
            .crew
            .iter_mut()
            .find(|entry| entry.employee_name == employee_name)
        {
            Some(entry) => {
                entry.hours = hours.into();
                true
            }
            None => {
                debug!("Ignored hours for employee not on crew: {}", employee_name);
                false
            }
        }
    }

    /// Append a batch of photos, all or nothing
    ///
    /// A batch that would push the total past the cap is rejected whole.
    /// Returns the number of photos appended.
    pub fn add_photos(&mut self, new_photos: Vec<PhotoRef>) -> Result<usize> {
        if self.record.photos.len() + new_photos.len() > MAX_PHOTOS {
            warn!(
                "Rejected {} photos: {} already attached",
                new_photos.len(),
                self.record.photos.len()
            );
            return Err(AppError::CapacityExceeded {
                collection: Collection::Photos,
                limit: MAX_PHOTOS,
            });
        }

        let added = new_photos.len();
        self.record.photos.extend(new_photos);
        debug!("Attached {} photos ({} total)", added, self.record.photos.len());
        Ok(added)
    }

    pub fn remaining_photo_capacity(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.record.photos.len())
    }

    /// Owned copy of the current record; later edits never reach it
    pub fn snapshot(&self) -> LogRecord {
        self.record.clone()
    }

    /// Clear every field and the pending selection; the directory is kept
    pub fn reset(&mut self) {
        self.record = LogRecord::default();
        self.pending = None;
    }

    pub fn foreman(&self) -> &str {
        &self.record.foreman
    }

    pub fn date(&self) -> &str {
        &self.record.date
    }

    pub fn task_description(&self) -> &str {
        &self.record.task_description
    }

    pub fn crew(&self) -> &[CrewEntry] {
        &self.record.crew
    }

    pub fn photos(&self) -> &[PhotoRef] {
        &self.record.photos
    }

    #[allow(dead_code)]
    pub fn pending_selection(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    fn crew_contains(&self, employee_name: &str) -> bool {
        self.record
            .crew
            .iter()
            .any(|entry| entry.employee_name == employee_name)
    }
}

impl Default for LogFormModel {
    fn default() -> Self {
        Self::new(EmployeeDirectory::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use std::collections::HashSet;

    fn add(model: &mut LogFormModel, name: &str) -> Result<()> {
        model.select_candidate(name)?;
        model.add_pending_as_crew_entry()
    }

    fn photos(count: usize) -> Vec<PhotoRef> {
        (0..count)
            .map(|i| PhotoRef::new(format!("/photos/img_{}.jpg", i)))
            .collect()
    }

    fn full_crew() -> LogFormModel {
        let mut model = LogFormModel::default();
        for i in 1..=10 {
            add(&mut model, &format!("Employee {}", i)).unwrap();
        }
        model
    }

    #[test]
    fn test_scenario_two_employees_with_hours() {
        let mut model = LogFormModel::default();
        add(&mut model, "Employee 1").unwrap();
        assert!(model.set_hours("Employee 1", "8"));
        add(&mut model, "Employee 2").unwrap();
        assert!(model.set_hours("Employee 2", "4"));

        let snapshot = model.snapshot();
        assert_eq!(
            snapshot.crew,
            vec![
                CrewEntry {
                    employee_name: "Employee 1".to_string(),
                    hours: "8".to_string(),
                },
                CrewEntry {
                    employee_name: "Employee 2".to_string(),
                    hours: "4".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_add_clears_pending_selection() {
        let mut model = LogFormModel::default();
        model.select_candidate("Employee 3").unwrap();
        assert_eq!(model.pending_selection(), Some("Employee 3"));

        model.add_pending_as_crew_entry().unwrap();
        assert_eq!(model.pending_selection(), None);
        assert_eq!(model.crew()[0].hours, "");
    }

    #[test]
    fn test_add_without_selection() {
        let mut model = LogFormModel::default();
        assert!(matches!(
            model.add_pending_as_crew_entry(),
            Err(AppError::NoSelection)
        ));

        model.select_candidate("Employee 1").unwrap();
        model.select_candidate("").unwrap();
        assert!(matches!(
            model.add_pending_as_crew_entry(),
            Err(AppError::NoSelection)
        ));
        assert!(model.crew().is_empty());
    }

    #[test]
    fn test_select_outside_directory_keeps_previous_selection() {
        let mut model = LogFormModel::new(EmployeeDirectory::new(vec!["Ana", "Bo"]));
        model.select_candidate("Ana").unwrap();

        let result = model.select_candidate("Employee 1");
        assert!(matches!(result, Err(AppError::UnknownEmployee(ref n)) if n == "Employee 1"));
        assert_eq!(model.pending_selection(), Some("Ana"));
    }

    #[test]
    fn test_duplicate_is_rejected_without_change() {
        let mut model = LogFormModel::default();
        add(&mut model, "Employee 1").unwrap();
        model.set_hours("Employee 1", "8");
        let before = model.snapshot();

        let result = add(&mut model, "Employee 1");
        assert!(matches!(result, Err(AppError::DuplicateEntry(ref n)) if n == "Employee 1"));
        assert_eq!(model.snapshot(), before);
        assert_eq!(model.pending_selection(), Some("Employee 1"));
    }

    #[test]
    fn test_eleventh_employee_is_rejected() {
        let mut model = full_crew();

        let result = add(&mut model, "Employee 11");
        assert!(matches!(
            result,
            Err(AppError::CapacityExceeded {
                collection: Collection::Crew,
                limit: 10
            })
        ));
        assert_eq!(model.crew().len(), 10);
        assert_eq!(model.pending_selection(), Some("Employee 11"));
    }

    #[test]
    fn test_remove_then_readd_resets_hours() {
        let mut model = LogFormModel::default();
        add(&mut model, "Employee 5").unwrap();
        model.set_hours("Employee 5", "10");

        assert!(model.remove_crew_entry("Employee 5"));
        add(&mut model, "Employee 5").unwrap();
        assert_eq!(model.crew()[0].hours, "");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut model = LogFormModel::default();
        add(&mut model, "Employee 1").unwrap();

        assert!(!model.remove_crew_entry("Employee 2"));
        assert!(!model.remove_crew_entry("Employee 2"));
        assert_eq!(model.crew().len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let mut model = LogFormModel::default();
        for name in ["Employee 1", "Employee 2", "Employee 3"] {
            add(&mut model, name).unwrap();
        }
        model.remove_crew_entry("Employee 2");

        let names: Vec<&str> = model
            .crew()
            .iter()
            .map(|e| e.employee_name.as_str())
            .collect();
        assert_eq!(names, vec!["Employee 1", "Employee 3"]);
    }

    #[test]
    fn test_set_hours_for_absent_employee() {
        let mut model = LogFormModel::default();
        assert!(!model.set_hours("Employee 1", "8"));
        assert!(model.crew().is_empty());
    }

    #[test]
    fn test_photo_batch_over_cap_is_rejected_whole() {
        let mut model = LogFormModel::default();
        assert_eq!(model.add_photos(photos(8)).unwrap(), 8);

        let result = model.add_photos(photos(3));
        assert!(matches!(
            result,
            Err(AppError::CapacityExceeded {
                collection: Collection::Photos,
                limit: 10
            })
        ));
        assert_eq!(model.photos().len(), 8);
        assert_eq!(model.remaining_photo_capacity(), 2);
    }

    #[test]
    fn test_photo_batch_filling_cap_is_accepted() {
        let mut model = LogFormModel::default();
        model.add_photos(photos(8)).unwrap();
        assert_eq!(model.add_photos(photos(2)).unwrap(), 2);
        assert_eq!(model.photos().len(), 10);
        assert_eq!(model.remaining_photo_capacity(), 0);
    }

    #[test]
    fn test_snapshot_does_not_alias() {
        let mut model = LogFormModel::default();
        model.set_foreman("Dana");
        add(&mut model, "Employee 1").unwrap();
        let earlier = model.snapshot();

        model.set_foreman("Lee");
        model.set_hours("Employee 1", "8");
        model.add_photos(photos(1)).unwrap();
        let later = model.snapshot();

        assert_ne!(earlier, later);
        assert_eq!(earlier.foreman, "Dana");
        assert_eq!(earlier.crew[0].hours, "");
        assert!(earlier.photos.is_empty());
    }

    #[test]
    fn test_reset_matches_fresh_model() {
        let directory = EmployeeDirectory::new(vec!["Ana", "Bo", "Cy"]);
        let mut model = LogFormModel::new(directory.clone());
        model.set_foreman("Dana");
        model.set_date("06/14/2025");
        model.set_task_description("Poured footings");
        add(&mut model, "Ana").unwrap();
        model.set_hours("Ana", "8");
        model.select_candidate("Bo").unwrap();
        model.add_photos(photos(3)).unwrap();

        model.reset();
        assert_eq!(model, LogFormModel::new(directory));
    }

    #[test]
    fn test_random_operation_sequences_hold_invariants() {
        let directory = EmployeeDirectory::default();

        for _ in 0..50 {
            let mut model = LogFormModel::new(directory.clone());
            let steps: usize = (20..80).fake();

            for _ in 0..steps {
                let index: usize = (0..directory.len()).fake();
                let name = directory.get(index).unwrap().to_string();
                match (0..4u8).fake::<u8>() {
                    0 | 1 => {
                        let _ = add(&mut model, &name);
                    }
                    2 => {
                        model.remove_crew_entry(&name);
                    }
                    _ => {
                        let batch: usize = (0..5).fake();
                        let _ = model.add_photos(photos(batch));
                    }
                }

                assert!(model.crew().len() <= MAX_CREW_SIZE);
                assert!(model.photos().len() <= MAX_PHOTOS);
                let unique: HashSet<&str> = model
                    .crew()
                    .iter()
                    .map(|e| e.employee_name.as_str())
                    .collect();
                assert_eq!(unique.len(), model.crew().len());
            }
        }
    }
}
