//! Core domain types for the fitlog journal.
//!
//! This module defines the fundamental types used throughout the system:
//! - Classification enums (training type, muscle group, nutrition unit)
//! - Weight-unit and macro-portion conversion
//! - The five journal entities and their derived computations
//!
//! All stored weights are kilograms. Unit conversion happens once at the
//! data-entry boundary, never at read time.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Classification Enums
// ============================================================================

/// Aerobic (cardio) or anaerobic (strength) session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    Aerobic,
    Anaerobic,
}

/// Machine-based or free-weight exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Machine,
    FreeWeight,
}

/// Target muscle group for an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Other,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
            MuscleGroup::Other => "other",
        }
    }
}

/// How the `amount` field of a nutrition entry is interpreted
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NutritionUnit {
    Serving,
    WeightGrams,
    Calorie,
    HandPortion,
}

/// Completion state of a nutrition entry.
///
/// Legacy records carry no persisted status; a missing field deserializes
/// as `Complete` so historical data is never hidden as incomplete.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Complete,
    Pending,
}

/// Kind of a media attachment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

// ============================================================================
// Weight Unit Conversion
// ============================================================================

/// Weight unit used at the data-entry boundary
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => value * 0.453592,
        }
    }

    /// Convert kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => kg * 2.20462,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            other => Err(Error::Validation(format!("unknown weight unit: {}", other))),
        }
    }
}

// ============================================================================
// Macro Portions (hand-portion rule)
// ============================================================================

/// Macro nutrient type for the hand-portion sizing rule.
///
/// Two independent gram constants exist per macro: the grams used inside
/// the calorie formula and the grams used for weight display. The source
/// data keeps them separate (protein: 25 g in the formula, 100 g per palm
/// on the plate) and so do we.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MacroType {
    Protein,
    Carbs,
    Vegetables,
    Fats,
}

impl MacroType {
    pub const ALL: [MacroType; 4] = [
        MacroType::Protein,
        MacroType::Carbs,
        MacroType::Vegetables,
        MacroType::Fats,
    ];

    /// Grams per portion used by the calorie formula
    fn formula_grams(&self) -> f64 {
        match self {
            MacroType::Protein => 25.0,
            MacroType::Carbs => 30.0,
            MacroType::Vegetables => 50.0,
            MacroType::Fats => 10.0,
        }
    }

    /// Calories per gram of this macro
    fn kcal_per_gram(&self) -> f64 {
        match self {
            MacroType::Protein | MacroType::Carbs => 4.0,
            MacroType::Vegetables => 1.0,
            MacroType::Fats => 9.0,
        }
    }

    /// Estimated calories for the given number of portions
    ///
    /// Per-portion: protein 100 kcal, carbs 120, vegetables 50, fats 90.
    pub fn estimated_calories(&self, portions: f64) -> f64 {
        portions * self.formula_grams() * self.kcal_per_gram()
    }

    /// Estimated plate weight in grams for the given number of portions
    ///
    /// Display-side constants, deliberately distinct from `formula_grams`.
    pub fn estimated_weight_grams(&self, portions: f64) -> f64 {
        let grams = match self {
            MacroType::Protein => 100.0,
            MacroType::Carbs => 80.0,
            MacroType::Vegetables => 100.0,
            MacroType::Fats => 10.0,
        };
        portions * grams
    }

    /// Body-part unit the portion is measured in
    pub fn portion_unit(&self) -> &'static str {
        match self {
            MacroType::Protein => "palm",
            MacroType::Carbs => "cupped hand",
            MacroType::Vegetables => "fist",
            MacroType::Fats => "thumb",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MacroType::Protein => "protein",
            MacroType::Carbs => "carbs",
            MacroType::Vegetables => "vegetables",
            MacroType::Fats => "fats",
        }
    }
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Reject non-finite or negative numeric input before it reaches an entity
pub fn validate_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::Validation(format!("{} must be a finite number", field)));
    }
    if value < 0.0 {
        return Err(Error::Validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

// ============================================================================
// Media Attachment
// ============================================================================

/// An opaque attachment handle paired with its media kind
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaAttachment {
    pub handle: String,
    pub kind: MediaKind,
}

// ============================================================================
// Daily Log
// ============================================================================

/// One record per calendar day of body metrics.
///
/// The `date` field is the unique key; day granularity is enforced by the
/// `NaiveDate` type itself, which is the start-of-day normalization the
/// rest of the system relies on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub sleep_duration_hours: Option<f64>,
    pub wake_up_time: Option<NaiveTime>,
    pub sleep_time: Option<NaiveTime>,
    pub steps: Option<u32>,
    pub resting_heart_rate: Option<u32>,
}

impl DailyLog {
    /// Empty log for the given day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weight: None,
            sleep_duration_hours: None,
            wake_up_time: None,
            sleep_time: None,
            steps: None,
            resting_heart_rate: None,
        }
    }

    /// Normalize a point in time to its day key
    pub fn day_of(timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.date_naive()
    }

    /// True when no metric has been filled in yet
    pub fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.sleep_duration_hours.is_none()
            && self.wake_up_time.is_none()
            && self.sleep_time.is_none()
            && self.steps.is_none()
            && self.resting_heart_rate.is_none()
    }
}

// ============================================================================
// Set Entry
// ============================================================================

/// One performed set: weight in kilograms and repetition count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub id: Uuid,
    pub weight_kg: f64,
    pub reps: u32,
}

impl SetEntry {
    /// Create a set, rejecting invalid weight input
    pub fn new(weight_kg: f64, reps: u32) -> Result<Self> {
        let weight_kg = validate_non_negative("set weight", weight_kg)?;
        Ok(Self {
            id: Uuid::new_v4(),
            weight_kg,
            reps,
        })
    }

    /// Volume contribution of this set
    pub fn volume(&self) -> f64 {
        self.weight_kg * f64::from(self.reps)
    }
}

// ============================================================================
// Exercise Set
// ============================================================================

/// One exercise within a workout, owning its performed sets
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub exercise_name: String,
    pub exercise_type: ExerciseType,
    pub muscle_group: MuscleGroup,
    pub sets: Vec<SetEntry>,
    pub note: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl ExerciseSet {
    pub fn new(
        exercise_name: impl Into<String>,
        exercise_type: ExerciseType,
        muscle_group: MuscleGroup,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_name: exercise_name.into(),
            exercise_type,
            muscle_group,
            sets: Vec::new(),
            note: None,
            order_index: 0,
            media: Vec::new(),
        }
    }

    /// Materialize the "N sets of weight × reps" input grouping as N
    /// individual set rows. The model has no repeat-count field.
    pub fn repeat_sets(&mut self, count: u32, weight_kg: f64, reps: u32) -> Result<()> {
        let weight_kg = validate_non_negative("set weight", weight_kg)?;
        for _ in 0..count {
            self.sets.push(SetEntry::new(weight_kg, reps)?);
        }
        Ok(())
    }

    /// Σ(weight × reps) across all sets, in kilograms. 0 when empty.
    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(SetEntry::volume).sum()
    }

    /// Heaviest set weight, or 0 when no sets exist
    pub fn max_weight(&self) -> f64 {
        self.sets
            .iter()
            .map(|s| s.weight_kg)
            .fold(0.0, f64::max)
    }
}

// ============================================================================
// Workout Record
// ============================================================================

/// One training session, owning its exercises (and transitively their sets)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub training_type: TrainingType,
    pub exercises: Vec<ExerciseSet>,
    pub duration_minutes: u32,
    pub note: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl WorkoutRecord {
    pub fn new(timestamp: DateTime<Utc>, training_type: TrainingType) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            training_type,
            exercises: Vec::new(),
            duration_minutes: 0,
            note: None,
            media: Vec::new(),
        }
    }

    /// Σ of child exercise volumes. Aerobic sessions with no exercises
    /// yield 0.
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(ExerciseSet::total_volume).sum()
    }

    /// Exercises in user-controlled order.
    ///
    /// Stable ascending sort by `order_index`; ties keep their stored
    /// relative order. Insertion order is not guaranteed stable after
    /// edits, which is why the explicit index exists.
    pub fn sorted_exercises(&self) -> Vec<&ExerciseSet> {
        let mut exercises: Vec<&ExerciseSet> = self.exercises.iter().collect();
        exercises.sort_by_key(|e| e.order_index);
        exercises
    }

    /// Rewrite order indices dense 0..N-1 following the current sorted
    /// order. Gaps do not break correctness, but saves keep them dense.
    pub fn renumber_exercises(&mut self) {
        self.exercises.sort_by_key(|e| e.order_index);
        for (i, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.order_index = i as i32;
        }
    }
}

// ============================================================================
// Nutrition Entry
// ============================================================================

/// One food/meal log entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutritionEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub meal_type: String,
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub amount: f64,
    pub unit: NutritionUnit,
    pub protein_portions: Option<f64>,
    pub carb_portions: Option<f64>,
    pub veg_portions: Option<f64>,
    pub fat_portions: Option<f64>,
    pub manual_calories: Option<f64>,
    pub note: Option<String>,
    #[serde(default)]
    pub status: EntryStatus,
}

/// Placeholder description for photo-only quick saves
pub const PENDING_DESCRIPTION: &str = "to be completed";

impl NutritionEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        meal_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            meal_type: meal_type.into(),
            description: description.into(),
            photos: Vec::new(),
            amount: 0.0,
            unit: NutritionUnit::HandPortion,
            protein_portions: None,
            carb_portions: None,
            veg_portions: None,
            fat_portions: None,
            manual_calories: None,
            note: None,
            status: EntryStatus::Complete,
        }
    }

    /// Photo-only quick save: media now, quantities later.
    /// Produces a pending entry with a placeholder description.
    pub fn pending_with_photos(
        timestamp: DateTime<Utc>,
        meal_type: impl Into<String>,
        photos: Vec<String>,
    ) -> Self {
        let mut entry = Self::new(timestamp, meal_type, PENDING_DESCRIPTION);
        entry.photos = photos;
        entry.status = EntryStatus::Pending;
        entry
    }

    /// Second phase of a quick save: fill in quantitative detail and mark
    /// the entry complete.
    pub fn complete(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        unit: NutritionUnit,
        manual_calories: Option<f64>,
    ) -> Result<()> {
        let amount = validate_non_negative("amount", amount)?;
        if let Some(kcal) = manual_calories {
            validate_non_negative("manual calories", kcal)?;
        }
        self.description = description.into();
        self.amount = amount;
        self.unit = unit;
        self.manual_calories = manual_calories;
        self.status = EntryStatus::Complete;
        Ok(())
    }

    pub fn set_portions(
        &mut self,
        protein: Option<f64>,
        carbs: Option<f64>,
        veg: Option<f64>,
        fats: Option<f64>,
    ) -> Result<()> {
        for (name, value) in [
            ("protein portions", protein),
            ("carb portions", carbs),
            ("veg portions", veg),
            ("fat portions", fats),
        ] {
            if let Some(v) = value {
                validate_non_negative(name, v)?;
            }
        }
        self.protein_portions = protein;
        self.carb_portions = carbs;
        self.veg_portions = veg;
        self.fat_portions = fats;
        Ok(())
    }

    /// Estimated calories by priority:
    /// 1. an explicit manual override wins verbatim,
    /// 2. a calorie-unit entry's amount is already calories,
    /// 3. otherwise sum the per-macro hand-portion estimates.
    ///
    /// Always re-derived; never cached across mutations.
    pub fn estimated_calories(&self) -> f64 {
        if let Some(manual) = self.manual_calories {
            return manual;
        }
        if self.unit == NutritionUnit::Calorie {
            return self.amount;
        }

        let mut total = 0.0;
        for (macro_type, portions) in [
            (MacroType::Protein, self.protein_portions),
            (MacroType::Carbs, self.carb_portions),
            (MacroType::Vegetables, self.veg_portions),
            (MacroType::Fats, self.fat_portions),
        ] {
            if let Some(p) = portions {
                total += macro_type.estimated_calories(p);
            }
        }
        total
    }

    /// True when any of the four macro-portion fields is set
    pub fn is_hand_portion_mode(&self) -> bool {
        self.protein_portions.is_some()
            || self.carb_portions.is_some()
            || self.veg_portions.is_some()
            || self.fat_portions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_weight_unit_roundtrip() {
        let x = 72.5;
        let lb = WeightUnit::Lb.from_kg(x);
        let back = WeightUnit::Lb.to_kg(lb);
        assert!((x - back).abs() < 1e-6, "{} -> {} -> {}", x, lb, back);

        assert_eq!(WeightUnit::Kg.to_kg(x), x);
        assert_eq!(WeightUnit::Kg.from_kg(x), x);
    }

    #[test]
    fn test_known_lb_conversion() {
        assert!((WeightUnit::Lb.to_kg(1.0) - 0.453592).abs() < 1e-9);
        assert!((WeightUnit::Lb.from_kg(1.0) - 2.20462).abs() < 1e-9);
    }

    #[test]
    fn test_macro_calories_per_portion() {
        assert_eq!(MacroType::Protein.estimated_calories(1.0), 100.0);
        assert_eq!(MacroType::Carbs.estimated_calories(1.0), 120.0);
        assert_eq!(MacroType::Vegetables.estimated_calories(1.0), 50.0);
        assert_eq!(MacroType::Fats.estimated_calories(1.0), 90.0);
    }

    #[test]
    fn test_macro_weight_constants_stay_independent() {
        // Plate-weight grams differ from the grams inside the calorie
        // formula for protein and carbs.
        assert_eq!(MacroType::Protein.estimated_weight_grams(1.0), 100.0);
        assert_eq!(MacroType::Carbs.estimated_weight_grams(1.0), 80.0);
        assert_eq!(MacroType::Vegetables.estimated_weight_grams(1.0), 100.0);
        assert_eq!(MacroType::Fats.estimated_weight_grams(1.0), 10.0);
    }

    #[test]
    fn test_empty_exercise_set_defaults_to_zero() {
        let exercise = ExerciseSet::new("Bench Press", ExerciseType::FreeWeight, MuscleGroup::Chest);
        assert_eq!(exercise.total_volume(), 0.0);
        assert_eq!(exercise.max_weight(), 0.0);
    }

    #[test]
    fn test_exercise_volume_and_max_weight() {
        let mut exercise =
            ExerciseSet::new("Bench Press", ExerciseType::FreeWeight, MuscleGroup::Chest);
        exercise.repeat_sets(3, 20.0, 10).unwrap();
        assert_eq!(exercise.sets.len(), 3);
        assert_eq!(exercise.total_volume(), 600.0);
        assert_eq!(exercise.max_weight(), 20.0);

        exercise.sets.push(SetEntry::new(25.0, 5).unwrap());
        assert_eq!(exercise.max_weight(), 25.0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(SetEntry::new(-1.0, 10).is_err());
        assert!(SetEntry::new(f64::NAN, 10).is_err());
    }

    #[test]
    fn test_workout_total_volume_order_independent() {
        let mut workout = WorkoutRecord::new(ts(2026, 3, 1), TrainingType::Anaerobic);

        let mut chest = ExerciseSet::new("Bench Press", ExerciseType::FreeWeight, MuscleGroup::Chest);
        chest.repeat_sets(3, 20.0, 10).unwrap();
        chest.order_index = 1;

        let mut back = ExerciseSet::new("Barbell Row", ExerciseType::FreeWeight, MuscleGroup::Back);
        back.repeat_sets(2, 30.0, 8).unwrap();
        back.order_index = 0;

        workout.exercises = vec![chest.clone(), back.clone()];
        assert_eq!(workout.total_volume(), 1080.0);

        // Reordering must not change the sum.
        workout.exercises = vec![back, chest];
        assert_eq!(workout.total_volume(), 1080.0);
    }

    #[test]
    fn test_sorted_exercises_stable_on_ties() {
        let mut workout = WorkoutRecord::new(ts(2026, 3, 1), TrainingType::Anaerobic);
        let mut a = ExerciseSet::new("A", ExerciseType::Machine, MuscleGroup::Legs);
        let mut b = ExerciseSet::new("B", ExerciseType::Machine, MuscleGroup::Legs);
        let mut c = ExerciseSet::new("C", ExerciseType::Machine, MuscleGroup::Legs);
        a.order_index = 1;
        b.order_index = 0;
        c.order_index = 1; // tie with a, inserted after it
        workout.exercises = vec![a.clone(), b, c.clone()];

        let sorted = workout.sorted_exercises();
        let names: Vec<&str> = sorted.iter().map(|e| e.exercise_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_renumber_exercises_dense() {
        let mut workout = WorkoutRecord::new(ts(2026, 3, 1), TrainingType::Anaerobic);
        let mut a = ExerciseSet::new("A", ExerciseType::Machine, MuscleGroup::Legs);
        let mut b = ExerciseSet::new("B", ExerciseType::Machine, MuscleGroup::Legs);
        a.order_index = 7;
        b.order_index = 2;
        workout.exercises = vec![a, b];
        workout.renumber_exercises();

        let indices: Vec<i32> = workout.exercises.iter().map(|e| e.order_index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(workout.exercises[0].exercise_name, "B");
    }

    #[test]
    fn test_manual_calories_override_wins() {
        let mut entry = NutritionEntry::new(ts(2026, 3, 1), "lunch", "chicken rice");
        entry
            .set_portions(Some(2.0), Some(1.0), None, None)
            .unwrap();
        entry.manual_calories = Some(640.0);
        assert_eq!(entry.estimated_calories(), 640.0);
    }

    #[test]
    fn test_calorie_unit_uses_amount() {
        let mut entry = NutritionEntry::new(ts(2026, 3, 1), "snack", "protein bar");
        entry.unit = NutritionUnit::Calorie;
        entry.amount = 210.0;
        assert_eq!(entry.estimated_calories(), 210.0);
    }

    #[test]
    fn test_hand_portion_calorie_sum() {
        let mut entry = NutritionEntry::new(ts(2026, 3, 1), "dinner", "bento");
        entry
            .set_portions(Some(1.0), Some(1.0), Some(1.0), Some(0.5))
            .unwrap();
        // 100 + 120 + 50 + 45
        assert_eq!(entry.estimated_calories(), 315.0);
        assert!(entry.is_hand_portion_mode());
    }

    #[test]
    fn test_no_data_estimates_zero() {
        let entry = NutritionEntry::new(ts(2026, 3, 1), "breakfast", "coffee");
        assert_eq!(entry.estimated_calories(), 0.0);
        assert!(!entry.is_hand_portion_mode());
    }

    #[test]
    fn test_pending_quick_save_then_complete() {
        let mut entry = NutritionEntry::pending_with_photos(
            ts(2026, 3, 1),
            "lunch",
            vec!["abc.jpg".into()],
        );
        assert_eq!(entry.status, EntryStatus::Pending);
        assert_eq!(entry.description, PENDING_DESCRIPTION);

        entry
            .complete("noodle soup", 0.0, NutritionUnit::HandPortion, Some(450.0))
            .unwrap();
        assert_eq!(entry.status, EntryStatus::Complete);
        assert_eq!(entry.estimated_calories(), 450.0);
    }

    #[test]
    fn test_missing_status_deserializes_complete() {
        // Legacy records persisted before the status field existed.
        let json = r#"{
            "id": "9f2c4e58-0000-0000-0000-000000000001",
            "timestamp": "2025-11-02T08:30:00Z",
            "meal_type": "breakfast",
            "description": "oatmeal",
            "amount": 1.0,
            "unit": "serving",
            "protein_portions": null,
            "carb_portions": null,
            "veg_portions": null,
            "fat_portions": null,
            "manual_calories": null,
            "note": null
        }"#;
        let entry: NutritionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, EntryStatus::Complete);
        assert!(entry.photos.is_empty());
    }

    #[test]
    fn test_daily_log_is_empty() {
        let mut log = DailyLog::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert!(log.is_empty());
        log.steps = Some(8500);
        assert!(!log.is_empty());
    }
}
