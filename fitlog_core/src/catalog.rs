//! Suggested exercise names keyed by (muscle group, exercise type).
//!
//! Pure static configuration data: no dynamic computation. Every list ends
//! with the generic "Other" catch-all so free-text entry is always reachable.

use crate::types::{ExerciseType, MuscleGroup};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The catch-all sentinel that closes every suggestion list
pub const CATCH_ALL: &str = "Other";

/// Cached suggestion table - built once and reused across all lookups
static EXERCISE_CATALOG: Lazy<HashMap<(MuscleGroup, ExerciseType), Vec<&'static str>>> =
    Lazy::new(build_catalog);

/// Suggested exercise names for the given muscle group and exercise type.
///
/// `MuscleGroup::Other` yields a single-element list regardless of the
/// exercise type; every other pair yields a curated list ending in
/// [`CATCH_ALL`].
pub fn exercises_for(muscle_group: MuscleGroup, exercise_type: ExerciseType) -> &'static [&'static str] {
    EXERCISE_CATALOG
        .get(&(muscle_group, exercise_type))
        .map(Vec::as_slice)
        .unwrap_or(&[CATCH_ALL])
}

fn build_catalog() -> HashMap<(MuscleGroup, ExerciseType), Vec<&'static str>> {
    use ExerciseType::{FreeWeight, Machine};
    use MuscleGroup::*;

    let mut table = HashMap::new();

    // ========================================================================
    // Free weight
    // ========================================================================

    table.insert(
        (Chest, FreeWeight),
        vec![
            "Barbell Bench Press - Flat",
            "Barbell Bench Press - Incline",
            "Barbell Bench Press - Decline",
            "Dumbbell Bench Press - Flat",
            "Dumbbell Bench Press - Incline",
            "Dumbbell Bench Press - Decline",
            "Dumbbell Fly",
            "Dips",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Back, FreeWeight),
        vec![
            "Deadlift - Conventional",
            "Deadlift - Sumo",
            "Pull-up",
            "Chin-up",
            "Barbell Row",
            "One-Arm Dumbbell Row",
            "Dumbbell Straight-Arm Pulldown",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Legs, FreeWeight),
        vec![
            "Barbell Squat - Back",
            "Barbell Squat - Front",
            "Goblet Squat",
            "Romanian Deadlift (RDL)",
            "Lunge - Walking",
            "Lunge - Reverse",
            "Bulgarian Split Squat",
            "Standing Calf Raise",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Shoulders, FreeWeight),
        vec![
            "Barbell Shoulder Press",
            "Military Press",
            "Dumbbell Shoulder Press",
            "Dumbbell Lateral Raise",
            "Dumbbell Front Raise",
            "Bent-Over Reverse Fly",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Arms, FreeWeight),
        vec![
            "Barbell Curl",
            "Dumbbell Curl",
            "Hammer Curl",
            "Close-Grip Bench Press",
            "French Press",
            "Skull Crusher",
            "Overhead Triceps Extension",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Core, FreeWeight),
        vec![
            "Weighted Plank",
            "Russian Twist",
            "Hanging Leg Raise",
            "Weighted Crunch",
            CATCH_ALL,
        ],
    );

    // ========================================================================
    // Machine
    // ========================================================================

    table.insert(
        (Chest, Machine),
        vec![
            "Seated Chest Press Machine",
            "Pec Deck Fly",
            "Cable Crossover",
            "Smith Machine Bench Press",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Back, Machine),
        vec![
            "Lat Pulldown",
            "Seated Row Machine",
            "Assisted Pull-up Machine",
            "Straight-Arm Pulldown - Cable",
            "T-Bar Row",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Legs, Machine),
        vec![
            "Leg Press",
            "Seated Leg Extension",
            "Lying Leg Curl",
            "Seated Leg Curl",
            "Hip Abduction Machine",
            "Hip Adduction Machine",
            "Smith Machine Squat",
            "Calf Press",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Shoulders, Machine),
        vec![
            "Machine Shoulder Press",
            "Reverse Pec Deck Fly",
            "Cable Lateral Raise",
            "Face Pull - Cable",
            "Smith Machine Shoulder Press",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Arms, Machine),
        vec![
            "Preacher Curl Machine",
            "Cable Curl",
            "Cable Pushdown",
            "Machine Triceps Extension",
            CATCH_ALL,
        ],
    );

    table.insert(
        (Core, Machine),
        vec![
            "Ab Crunch Machine",
            "Rotary Torso Machine",
            "Cable Crunch",
            CATCH_ALL,
        ],
    );

    // Free-text only
    table.insert((Other, FreeWeight), vec![CATCH_ALL]);
    table.insert((Other, Machine), vec![CATCH_ALL]);

    table
}

/// Validate the suggestion table for consistency
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate() -> Vec<String> {
    let mut errors = Vec::new();

    for muscle_group in MuscleGroup::ALL {
        for exercise_type in [ExerciseType::FreeWeight, ExerciseType::Machine] {
            let entries = exercises_for(muscle_group, exercise_type);

            if entries.is_empty() {
                errors.push(format!(
                    "No suggestions for ({:?}, {:?})",
                    muscle_group, exercise_type
                ));
                continue;
            }
            if entries.last() != Some(&CATCH_ALL) {
                errors.push(format!(
                    "({:?}, {:?}) list does not end with the catch-all entry",
                    muscle_group, exercise_type
                ));
            }
            if muscle_group == MuscleGroup::Other && entries.len() != 1 {
                errors.push(format!(
                    "(Other, {:?}) must be a single-element list",
                    exercise_type
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_suggestions() {
        for muscle_group in MuscleGroup::ALL {
            for exercise_type in [ExerciseType::FreeWeight, ExerciseType::Machine] {
                let entries = exercises_for(muscle_group, exercise_type);
                assert!(
                    !entries.is_empty(),
                    "({:?}, {:?}) has no suggestions",
                    muscle_group,
                    exercise_type
                );
            }
        }
    }

    #[test]
    fn test_every_list_ends_with_catch_all() {
        for muscle_group in MuscleGroup::ALL {
            for exercise_type in [ExerciseType::FreeWeight, ExerciseType::Machine] {
                let entries = exercises_for(muscle_group, exercise_type);
                assert_eq!(entries.last(), Some(&CATCH_ALL));
            }
        }
    }

    #[test]
    fn test_other_is_single_element_for_both_types() {
        assert_eq!(
            exercises_for(MuscleGroup::Other, ExerciseType::FreeWeight),
            &[CATCH_ALL]
        );
        assert_eq!(
            exercises_for(MuscleGroup::Other, ExerciseType::Machine),
            &[CATCH_ALL]
        );
    }

    #[test]
    fn test_catalog_validates() {
        let errors = validate();
        assert!(errors.is_empty(), "catalog validation errors: {:?}", errors);
    }

    #[test]
    fn test_lookup_is_stable() {
        let first = exercises_for(MuscleGroup::Chest, ExerciseType::FreeWeight);
        let second = exercises_for(MuscleGroup::Chest, ExerciseType::FreeWeight);
        assert_eq!(first, second);
    }
}
