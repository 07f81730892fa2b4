//! Analytics aggregation engine.
//!
//! Every function here is stateless: it takes the records, a resolved
//! [`TimeWindow`] and any selector, and returns a fresh aggregate. No
//! matching records is a valid empty result, never an error, and repeated
//! calls over the same input produce identical output.

use crate::types::{
    DailyLog, EntryStatus, MacroType, MuscleGroup, NutritionEntry, TrainingType, WorkoutRecord,
};
use crate::window::TimeWindow;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Which metric drives the muscle-balance ranking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuscleMetric {
    Sets,
    Volume,
}

/// Per-muscle-group accumulation for the balance chart
#[derive(Clone, Debug, PartialEq)]
pub struct MuscleBalance {
    pub muscle_group: MuscleGroup,
    pub sets: usize,
    pub volume: f64,
}

impl MuscleBalance {
    pub fn value(&self, metric: MuscleMetric) -> f64 {
        match metric {
            MuscleMetric::Sets => self.sets as f64,
            MuscleMetric::Volume => self.volume,
        }
    }
}

/// One point of the volume-trend series: a single exercise of a single
/// workout. Bucketing into hour/day bars is a presentation concern.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeTrendPoint {
    pub date: DateTime<Utc>,
    pub muscle_group: MuscleGroup,
    pub volume: f64,
}

/// Aggregate statistics over the workouts of a window
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutSummary {
    pub workouts: usize,
    pub total_minutes: u64,
    /// Anaerobic subset only
    pub total_volume: f64,
    /// Anaerobic subset only
    pub total_sets: usize,
    /// Average volume per anaerobic workout; 0 when there are none
    pub avg_volume: f64,
}

/// Summed hand portions for one macro over a window
#[derive(Clone, Debug, PartialEq)]
pub struct MacroTotal {
    pub macro_type: MacroType,
    pub portions: f64,
}

/// Which daily-log field a health summary covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthMetric {
    Weight,
    Steps,
    RestingHeartRate,
    SleepDuration,
}

impl HealthMetric {
    fn extract(&self, log: &DailyLog) -> Option<f64> {
        match self {
            HealthMetric::Weight => log.weight,
            HealthMetric::Steps => log.steps.map(f64::from),
            HealthMetric::RestingHeartRate => log.resting_heart_rate.map(f64::from),
            HealthMetric::SleepDuration => log.sleep_duration_hours,
        }
    }
}

/// Average and maximum of one health metric over a window
#[derive(Clone, Debug, PartialEq)]
pub struct HealthSummary {
    /// Mean of the non-empty values; None when the window has none
    pub average: Option<f64>,
    /// The (date, value) pair with the greatest value
    pub max: Option<(NaiveDate, f64)>,
}

fn in_window<'a>(
    workouts: &'a [WorkoutRecord],
    window: &TimeWindow,
) -> impl Iterator<Item = &'a WorkoutRecord> + 'a {
    let window = *window;
    workouts.iter().filter(move |w| window.contains(w.timestamp))
}

fn anaerobic_in_window<'a>(
    workouts: &'a [WorkoutRecord],
    window: &TimeWindow,
) -> impl Iterator<Item = &'a WorkoutRecord> + 'a {
    in_window(workouts, window).filter(|w| w.training_type == TrainingType::Anaerobic)
}

/// Muscle-group balance over the anaerobic workouts of a window.
///
/// Groups every exercise by muscle group, accumulating set counts and
/// volume. `Other` and zero-set groups are excluded. Sorted descending by
/// the selected metric; equal values fall back to muscle-group order so
/// output stays deterministic.
pub fn muscle_balance(
    workouts: &[WorkoutRecord],
    window: &TimeWindow,
    metric: MuscleMetric,
) -> Vec<MuscleBalance> {
    let mut stats: HashMap<MuscleGroup, (usize, f64)> = HashMap::new();

    for workout in anaerobic_in_window(workouts, window) {
        for exercise in &workout.exercises {
            let entry = stats.entry(exercise.muscle_group).or_insert((0, 0.0));
            entry.0 += exercise.sets.len();
            entry.1 += exercise.total_volume();
        }
    }

    let mut balance: Vec<MuscleBalance> = stats
        .into_iter()
        .filter(|(group, (sets, _))| *group != MuscleGroup::Other && *sets > 0)
        .map(|(muscle_group, (sets, volume))| MuscleBalance {
            muscle_group,
            sets,
            volume,
        })
        .collect();

    balance.sort_by(|a, b| {
        b.value(metric)
            .partial_cmp(&a.value(metric))
            .unwrap_or(Ordering::Equal)
            .then(a.muscle_group.cmp(&b.muscle_group))
    });
    balance
}

/// Flat per-exercise volume series over the anaerobic workouts of a
/// window, sorted ascending by workout date.
pub fn volume_trend(workouts: &[WorkoutRecord], window: &TimeWindow) -> Vec<VolumeTrendPoint> {
    let mut points: Vec<VolumeTrendPoint> = anaerobic_in_window(workouts, window)
        .flat_map(|workout| {
            workout.exercises.iter().map(|exercise| VolumeTrendPoint {
                date: workout.timestamp,
                muscle_group: exercise.muscle_group,
                volume: exercise.total_volume(),
            })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

/// Count, duration, volume and set totals over the workouts of a window
pub fn workout_summary(workouts: &[WorkoutRecord], window: &TimeWindow) -> WorkoutSummary {
    let filtered: Vec<&WorkoutRecord> = in_window(workouts, window).collect();

    let total_minutes = filtered
        .iter()
        .map(|w| u64::from(w.duration_minutes))
        .sum();

    let anaerobic: Vec<&&WorkoutRecord> = filtered
        .iter()
        .filter(|w| w.training_type == TrainingType::Anaerobic)
        .collect();

    let total_volume: f64 = anaerobic.iter().map(|w| w.total_volume()).sum();
    let total_sets: usize = anaerobic
        .iter()
        .map(|w| w.exercises.iter().map(|e| e.sets.len()).sum::<usize>())
        .sum();
    let avg_volume = if anaerobic.is_empty() {
        0.0
    } else {
        total_volume / anaerobic.len() as f64
    };

    WorkoutSummary {
        workouts: filtered.len(),
        total_minutes,
        total_volume,
        total_sets,
        avg_volume,
    }
}

/// Per-macro portion sums over the nutrition entries of a window.
///
/// Missing portion fields count as 0; only macros with a positive total
/// are emitted, in declaration order.
pub fn macro_totals(entries: &[NutritionEntry], window: &TimeWindow) -> Vec<MacroTotal> {
    let mut totals = [0.0f64; 4];

    for entry in entries.iter().filter(|e| window.contains(e.timestamp)) {
        totals[0] += entry.protein_portions.unwrap_or(0.0);
        totals[1] += entry.carb_portions.unwrap_or(0.0);
        totals[2] += entry.veg_portions.unwrap_or(0.0);
        totals[3] += entry.fat_portions.unwrap_or(0.0);
    }

    MacroType::ALL
        .iter()
        .zip(totals)
        .filter(|(_, portions)| *portions > 0.0)
        .map(|(macro_type, portions)| MacroTotal {
            macro_type: *macro_type,
            portions,
        })
        .collect()
}

/// Total estimated calories over the nutrition entries of a window
pub fn total_calories(entries: &[NutritionEntry], window: &TimeWindow) -> f64 {
    entries
        .iter()
        .filter(|e| window.contains(e.timestamp))
        .map(NutritionEntry::estimated_calories)
        .sum()
}

/// Average and (date, value) maximum of one health metric over the daily
/// logs of a window
pub fn health_summary(
    logs: &[DailyLog],
    window: &TimeWindow,
    metric: HealthMetric,
) -> HealthSummary {
    let values: Vec<(NaiveDate, f64)> = logs
        .iter()
        .filter(|l| window.contains_day(l.date))
        .filter_map(|l| metric.extract(l).map(|v| (l.date, v)))
        .collect();

    if values.is_empty() {
        return HealthSummary {
            average: None,
            max: None,
        };
    }

    let sum: f64 = values.iter().map(|(_, v)| v).sum();
    let average = Some(sum / values.len() as f64);
    let max = values
        .iter()
        .copied()
        .fold(None::<(NaiveDate, f64)>, |best, candidate| match best {
            Some((_, v)) if v >= candidate.1 => best,
            _ => Some(candidate),
        });

    HealthSummary { average, max }
}

/// Days in the window whose recorded step count meets the goal.
///
/// Days with no step count recorded never count toward the goal.
pub fn days_meeting_step_goal(logs: &[DailyLog], window: &TimeWindow, goal: u32) -> usize {
    logs.iter()
        .filter(|l| window.contains_day(l.date))
        .filter(|l| l.steps.map_or(false, |s| s >= goal))
        .count()
}

/// Nutrition entries still awaiting their second capture phase
pub fn pending_entries(entries: &[NutritionEntry]) -> Vec<&NutritionEntry> {
    entries
        .iter()
        .filter(|e| e.status == EntryStatus::Pending)
        .collect()
}

pub fn pending_count(entries: &[NutritionEntry]) -> usize {
    pending_entries(entries).len()
}
