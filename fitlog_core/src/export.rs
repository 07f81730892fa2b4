//! CSV export of the journal collections.
//!
//! One file per collection; workouts flatten to one row per exercise so
//! the volume data stays spreadsheet-friendly.

use crate::{DailyLog, NutritionEntry, Result, WorkoutRecord};
use std::path::Path;

#[derive(Debug, serde::Serialize)]
struct DailyLogRow {
    date: String,
    weight_kg: Option<f64>,
    sleep_hours: Option<f64>,
    steps: Option<u32>,
    resting_heart_rate: Option<u32>,
}

impl From<&DailyLog> for DailyLogRow {
    fn from(log: &DailyLog) -> Self {
        DailyLogRow {
            date: log.date.to_string(),
            weight_kg: log.weight,
            sleep_hours: log.sleep_duration_hours,
            steps: log.steps,
            resting_heart_rate: log.resting_heart_rate,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct WorkoutRow {
    workout_id: String,
    timestamp: String,
    training_type: String,
    duration_minutes: u32,
    exercise: Option<String>,
    muscle_group: Option<String>,
    sets: usize,
    volume_kg: f64,
    max_weight_kg: f64,
}

#[derive(Debug, serde::Serialize)]
struct NutritionRow {
    entry_id: String,
    timestamp: String,
    meal_type: String,
    description: String,
    amount: f64,
    protein_portions: Option<f64>,
    carb_portions: Option<f64>,
    veg_portions: Option<f64>,
    fat_portions: Option<f64>,
    estimated_calories: f64,
    status: String,
}

impl From<&NutritionEntry> for NutritionRow {
    fn from(entry: &NutritionEntry) -> Self {
        NutritionRow {
            entry_id: entry.id.to_string(),
            timestamp: entry.timestamp.to_rfc3339(),
            meal_type: entry.meal_type.clone(),
            description: entry.description.clone(),
            amount: entry.amount,
            protein_portions: entry.protein_portions,
            carb_portions: entry.carb_portions,
            veg_portions: entry.veg_portions,
            fat_portions: entry.fat_portions,
            estimated_calories: entry.estimated_calories(),
            status: format!("{:?}", entry.status).to_lowercase(),
        }
    }
}

/// Write daily logs to a CSV file, returning the row count
pub fn export_daily_logs(logs: &[DailyLog], path: &Path) -> Result<usize> {
    let mut writer = csv_writer(path)?;
    for log in logs {
        writer.serialize(DailyLogRow::from(log))?;
    }
    writer.flush()?;
    tracing::info!("Exported {} daily logs to {:?}", logs.len(), path);
    Ok(logs.len())
}

/// Write workouts to a CSV file, one row per exercise.
///
/// Sessions without exercise detail (aerobic) still emit a single row so
/// their duration is not lost.
pub fn export_workouts(workouts: &[WorkoutRecord], path: &Path) -> Result<usize> {
    let mut writer = csv_writer(path)?;
    let mut rows = 0;

    for workout in workouts {
        let base = |exercise: Option<&crate::ExerciseSet>| WorkoutRow {
            workout_id: workout.id.to_string(),
            timestamp: workout.timestamp.to_rfc3339(),
            training_type: format!("{:?}", workout.training_type).to_lowercase(),
            duration_minutes: workout.duration_minutes,
            exercise: exercise.map(|e| e.exercise_name.clone()),
            muscle_group: exercise.map(|e| e.muscle_group.name().to_string()),
            sets: exercise.map(|e| e.sets.len()).unwrap_or(0),
            volume_kg: exercise.map(|e| e.total_volume()).unwrap_or(0.0),
            max_weight_kg: exercise.map(|e| e.max_weight()).unwrap_or(0.0),
        };

        if workout.exercises.is_empty() {
            writer.serialize(base(None))?;
            rows += 1;
        } else {
            for exercise in workout.sorted_exercises() {
                writer.serialize(base(Some(exercise)))?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} workout rows to {:?}", rows, path);
    Ok(rows)
}

/// Write nutrition entries to a CSV file, returning the row count
pub fn export_nutrition(entries: &[NutritionEntry], path: &Path) -> Result<usize> {
    let mut writer = csv_writer(path)?;
    for entry in entries {
        writer.serialize(NutritionRow::from(entry))?;
    }
    writer.flush()?;
    tracing::info!("Exported {} nutrition entries to {:?}", entries.len(), path);
    Ok(entries.len())
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(csv::Writer::from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExerciseSet, ExerciseType, MuscleGroup, TrainingType};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_export_daily_logs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("daily.csv");

        let mut log = DailyLog::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        log.weight = Some(70.5);
        log.steps = Some(8500);

        let count = export_daily_logs(&[log], &path).unwrap();
        assert_eq!(count, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("date,weight_kg,sleep_hours,steps,resting_heart_rate"));
        assert!(contents.contains("2026-03-01,70.5,,8500,"));
    }

    #[test]
    fn test_export_workouts_one_row_per_exercise() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.csv");

        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        let mut workout = WorkoutRecord::new(ts, TrainingType::Anaerobic);
        let mut chest = ExerciseSet::new("Bench Press", ExerciseType::FreeWeight, MuscleGroup::Chest);
        chest.repeat_sets(3, 20.0, 10).unwrap();
        let mut back = ExerciseSet::new("Barbell Row", ExerciseType::FreeWeight, MuscleGroup::Back);
        back.repeat_sets(2, 30.0, 8).unwrap();
        workout.exercises = vec![chest, back];

        let aerobic = WorkoutRecord::new(ts, TrainingType::Aerobic);

        let count = export_workouts(&[workout, aerobic], &path).unwrap();
        assert_eq!(count, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Bench Press"));
        assert!(contents.contains("600"));
        assert!(contents.contains("aerobic"));
    }

    #[test]
    fn test_export_nutrition_includes_derived_calories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nutrition.csv");

        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut entry = NutritionEntry::new(ts, "lunch", "bento");
        entry
            .set_portions(Some(1.0), Some(1.0), Some(1.0), Some(0.5))
            .unwrap();

        export_nutrition(&[entry], &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("315"));
        assert!(contents.contains("complete"));
    }

    #[test]
    fn test_export_empty_collection_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("daily.csv");

        let count = export_daily_logs(&[], &path).unwrap();
        assert_eq!(count, 0);
        assert!(path.exists());
    }
}
