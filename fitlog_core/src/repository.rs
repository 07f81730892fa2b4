//! Record repository: the storage surface the core is written against.
//!
//! Analytics and the CLI consume the [`JournalRepository`] trait only; they
//! never assume a particular storage engine. [`MemoryJournal`] is the
//! bundled implementation, persisted as a single JSON document with file
//! locking and an atomic temp-file rename.

use crate::{DailyLog, Error, NutritionEntry, Result, WorkoutRecord};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Sort direction for query results
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// CRUD plus sorted query per entity collection.
///
/// Deleting a workout drops its exercises and sets with it (children are
/// owned by value). `delete_entry` returns the removed record so the caller
/// can release its attachment handles.
pub trait JournalRepository {
    // Daily logs: keyed by calendar day, at most one per day.
    fn upsert_daily_log(&mut self, log: DailyLog) -> Result<()>;
    fn daily_log(&self, date: NaiveDate) -> Option<DailyLog>;
    fn delete_daily_log(&mut self, date: NaiveDate) -> Result<DailyLog>;
    fn daily_logs(&self, order: SortOrder) -> Vec<DailyLog>;

    // Workout records: keyed by id, sorted by timestamp.
    fn insert_workout(&mut self, workout: WorkoutRecord) -> Result<()>;
    fn update_workout(&mut self, workout: WorkoutRecord) -> Result<()>;
    fn delete_workout(&mut self, id: Uuid) -> Result<WorkoutRecord>;
    fn workouts(&self, order: SortOrder) -> Vec<WorkoutRecord>;

    // Nutrition entries: keyed by id, sorted by timestamp.
    fn insert_entry(&mut self, entry: NutritionEntry) -> Result<()>;
    fn update_entry(&mut self, entry: NutritionEntry) -> Result<()>;
    fn delete_entry(&mut self, id: Uuid) -> Result<NutritionEntry>;
    fn entries(&self, order: SortOrder) -> Vec<NutritionEntry>;

    /// Minimum timestamp across all three collections, for computing the
    /// scrollable offset range. None when the journal is empty.
    fn earliest_record_time(&self) -> Option<DateTime<Utc>>;
}

/// In-memory journal with JSON file persistence
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryJournal {
    #[serde(default)]
    daily_logs: Vec<DailyLog>,
    #[serde(default)]
    workouts: Vec<WorkoutRecord>,
    #[serde(default)]
    entries: Vec<NutritionEntry>,
}

impl JournalRepository for MemoryJournal {
    fn upsert_daily_log(&mut self, log: DailyLog) -> Result<()> {
        match self.daily_logs.iter_mut().find(|l| l.date == log.date) {
            Some(existing) => *existing = log,
            None => self.daily_logs.push(log),
        }
        Ok(())
    }

    fn daily_log(&self, date: NaiveDate) -> Option<DailyLog> {
        self.daily_logs.iter().find(|l| l.date == date).cloned()
    }

    fn delete_daily_log(&mut self, date: NaiveDate) -> Result<DailyLog> {
        let pos = self
            .daily_logs
            .iter()
            .position(|l| l.date == date)
            .ok_or_else(|| Error::NotFound(format!("daily log for {}", date)))?;
        Ok(self.daily_logs.remove(pos))
    }

    fn daily_logs(&self, order: SortOrder) -> Vec<DailyLog> {
        let mut logs = self.daily_logs.clone();
        logs.sort_by_key(|l| l.date);
        if order == SortOrder::Descending {
            logs.reverse();
        }
        logs
    }

    fn insert_workout(&mut self, mut workout: WorkoutRecord) -> Result<()> {
        workout.renumber_exercises();
        self.workouts.push(workout);
        Ok(())
    }

    fn update_workout(&mut self, mut workout: WorkoutRecord) -> Result<()> {
        workout.renumber_exercises();
        let existing = self
            .workouts
            .iter_mut()
            .find(|w| w.id == workout.id)
            .ok_or_else(|| Error::NotFound(format!("workout {}", workout.id)))?;
        *existing = workout;
        Ok(())
    }

    fn delete_workout(&mut self, id: Uuid) -> Result<WorkoutRecord> {
        let pos = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(format!("workout {}", id)))?;
        Ok(self.workouts.remove(pos))
    }

    fn workouts(&self, order: SortOrder) -> Vec<WorkoutRecord> {
        let mut workouts = self.workouts.clone();
        workouts.sort_by_key(|w| w.timestamp);
        if order == SortOrder::Descending {
            workouts.reverse();
        }
        workouts
    }

    fn insert_entry(&mut self, entry: NutritionEntry) -> Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn update_entry(&mut self, entry: NutritionEntry) -> Result<()> {
        let existing = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| Error::NotFound(format!("nutrition entry {}", entry.id)))?;
        *existing = entry;
        Ok(())
    }

    fn delete_entry(&mut self, id: Uuid) -> Result<NutritionEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("nutrition entry {}", id)))?;
        Ok(self.entries.remove(pos))
    }

    fn entries(&self, order: SortOrder) -> Vec<NutritionEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.timestamp);
        if order == SortOrder::Descending {
            entries.reverse();
        }
        entries
    }

    fn earliest_record_time(&self) -> Option<DateTime<Utc>> {
        let log_min = self
            .daily_logs
            .iter()
            .map(|l| l.date)
            .min()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
        let workout_min = self.workouts.iter().map(|w| w.timestamp).min();
        let entry_min = self.entries.iter().map(|e| e.timestamp).min();

        [log_min, workout_min, entry_min]
            .into_iter()
            .flatten()
            .min()
    }
}

impl MemoryJournal {
    /// Load a journal from a file with shared locking
    ///
    /// Returns an empty journal if the file doesn't exist. A corrupted
    /// file logs a warning and also yields an empty journal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No journal file found, starting empty");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open journal {:?}: {}. Starting empty.", path, e);
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock journal {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read journal {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<MemoryJournal>(&contents) {
            Ok(journal) => {
                tracing::debug!(
                    "Loaded journal from {:?}: {} daily logs, {} workouts, {} entries",
                    path,
                    journal.daily_logs.len(),
                    journal.workouts.len(),
                    journal.entries.len()
                );
                Ok(journal)
            }
            Err(e) => {
                tracing::warn!("Failed to parse journal {:?}: {}. Starting empty.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the journal to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "journal path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved journal to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseSet, ExerciseType, MuscleGroup, TrainingType};
    use chrono::TimeZone;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn ts(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_upsert_keeps_one_log_per_day() {
        let mut journal = MemoryJournal::default();

        let mut log = DailyLog::new(day(1));
        log.weight = Some(70.5);
        journal.upsert_daily_log(log).unwrap();

        let mut updated = DailyLog::new(day(1));
        updated.weight = Some(70.1);
        updated.steps = Some(8500);
        journal.upsert_daily_log(updated).unwrap();

        let logs = journal.daily_logs(SortOrder::Ascending);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].weight, Some(70.1));
        assert_eq!(logs[0].steps, Some(8500));
    }

    #[test]
    fn test_daily_logs_sorted_both_directions() {
        let mut journal = MemoryJournal::default();
        for d in [3, 1, 2] {
            journal.upsert_daily_log(DailyLog::new(day(d))).unwrap();
        }

        let asc = journal.daily_logs(SortOrder::Ascending);
        assert_eq!(asc[0].date, day(1));
        assert_eq!(asc[2].date, day(3));

        let desc = journal.daily_logs(SortOrder::Descending);
        assert_eq!(desc[0].date, day(3));
    }

    #[test]
    fn test_update_unknown_workout_is_not_found() {
        let mut journal = MemoryJournal::default();
        let workout = WorkoutRecord::new(ts(1), TrainingType::Aerobic);
        assert!(matches!(
            journal.update_workout(workout),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_workout_save_renumbers_order_indices() {
        let mut journal = MemoryJournal::default();
        let mut workout = WorkoutRecord::new(ts(1), TrainingType::Anaerobic);

        let mut a = ExerciseSet::new("A", ExerciseType::Machine, MuscleGroup::Back);
        let mut b = ExerciseSet::new("B", ExerciseType::Machine, MuscleGroup::Back);
        a.order_index = 5;
        b.order_index = 2;
        workout.exercises = vec![a, b];

        journal.insert_workout(workout).unwrap();
        let stored = &journal.workouts(SortOrder::Ascending)[0];
        let indices: Vec<i32> = stored.exercises.iter().map(|e| e.order_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_delete_workout_cascades_children() {
        let mut journal = MemoryJournal::default();
        let mut workout = WorkoutRecord::new(ts(1), TrainingType::Anaerobic);
        let mut exercise = ExerciseSet::new("Squat", ExerciseType::FreeWeight, MuscleGroup::Legs);
        exercise.repeat_sets(3, 60.0, 5).unwrap();
        workout.exercises.push(exercise);
        let id = workout.id;

        journal.insert_workout(workout).unwrap();
        let removed = journal.delete_workout(id).unwrap();
        assert_eq!(removed.exercises[0].sets.len(), 3);
        assert!(journal.workouts(SortOrder::Ascending).is_empty());
    }

    #[test]
    fn test_delete_entry_returns_record_for_handle_release() {
        let mut journal = MemoryJournal::default();
        let entry = NutritionEntry::pending_with_photos(ts(2), "lunch", vec!["h1.jpg".into()]);
        let id = entry.id;
        journal.insert_entry(entry).unwrap();

        let removed = journal.delete_entry(id).unwrap();
        assert_eq!(removed.photos, vec!["h1.jpg".to_string()]);
        assert!(matches!(
            journal.delete_entry(id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_earliest_record_time_spans_collections() {
        let mut journal = MemoryJournal::default();
        assert_eq!(journal.earliest_record_time(), None);

        journal
            .insert_workout(WorkoutRecord::new(ts(10), TrainingType::Aerobic))
            .unwrap();
        journal
            .insert_entry(NutritionEntry::new(ts(8), "lunch", "salad"))
            .unwrap();
        journal.upsert_daily_log(DailyLog::new(day(5))).unwrap();

        // The daily log at midnight of March 5 is the oldest record.
        let earliest = journal.earliest_record_time().unwrap();
        assert_eq!(earliest.date_naive(), day(5));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("journal.json");

        let mut journal = MemoryJournal::default();
        let mut log = DailyLog::new(day(1));
        log.weight = Some(70.5);
        journal.upsert_daily_log(log).unwrap();
        journal
            .insert_entry(NutritionEntry::new(ts(1), "dinner", "steak"))
            .unwrap();
        journal.save(&path).unwrap();

        let loaded = MemoryJournal::load(&path).unwrap();
        assert_eq!(loaded.daily_logs(SortOrder::Ascending).len(), 1);
        assert_eq!(loaded.entries(SortOrder::Ascending).len(), 1);
    }

    #[test]
    fn test_corrupted_journal_starts_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("journal.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let journal = MemoryJournal::load(&path).unwrap();
        assert!(journal.daily_logs(SortOrder::Ascending).is_empty());
    }

    #[test]
    fn test_load_nonexistent_starts_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal = MemoryJournal::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(journal.earliest_record_time().is_none());
    }
}
