use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal fitness and nutrition journal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record or update the daily health log
    Daily {
        /// Day to record (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Body weight (interpreted in --unit)
        #[arg(long)]
        weight: Option<f64>,

        /// Weight unit for this invocation (kg, lb)
        #[arg(long)]
        unit: Option<String>,

        /// Sleep duration in hours
        #[arg(long)]
        sleep_hours: Option<f64>,

        /// Wake-up time (HH:MM)
        #[arg(long)]
        wake: Option<NaiveTime>,

        /// Bed time (HH:MM)
        #[arg(long)]
        bed: Option<NaiveTime>,

        /// Step count
        #[arg(long)]
        steps: Option<u32>,

        /// Resting heart rate (bpm)
        #[arg(long)]
        rhr: Option<u32>,
    },

    /// Log a workout session
    Workout {
        /// Training type (aerobic, anaerobic)
        #[arg(long, default_value = "anaerobic")]
        training_type: String,

        /// Session duration in minutes
        #[arg(long, default_value_t = 0)]
        duration: u32,

        /// Exercise spec, repeatable: MUSCLE:TYPE:NAME:SETSxWEIGHTxREPS
        /// e.g. chest:free_weight:Bench Press:3x60x10
        #[arg(long = "exercise")]
        exercises: Vec<String>,

        /// Weight unit for the exercise specs (kg, lb)
        #[arg(long)]
        unit: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// Log a meal
    Meal {
        /// Meal type (breakfast, lunch, dinner, snack, ...)
        #[arg(long)]
        meal_type: String,

        /// What was eaten
        #[arg(long)]
        description: String,

        /// Amount in --amount-unit terms
        #[arg(long, default_value_t = 0.0)]
        amount: f64,

        /// How the amount is measured (serving, grams, calorie, portion)
        #[arg(long, default_value = "portion")]
        amount_unit: String,

        /// Protein hand portions (palms)
        #[arg(long)]
        protein: Option<f64>,

        /// Carb hand portions (cupped hands)
        #[arg(long)]
        carb: Option<f64>,

        /// Vegetable hand portions (fists)
        #[arg(long)]
        veg: Option<f64>,

        /// Fat hand portions (thumbs)
        #[arg(long)]
        fat: Option<f64>,

        /// Manual calorie override
        #[arg(long)]
        calories: Option<f64>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// Quick-save a pending meal to complete later
    Pending {
        /// Meal type (breakfast, lunch, dinner, snack, ...)
        #[arg(long)]
        meal_type: String,

        /// Photo files to attach
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },

    /// Complete a pending meal entry
    Complete {
        /// Entry id (from `fitlog pending` output)
        #[arg(long)]
        id: Uuid,

        /// What was eaten
        #[arg(long)]
        description: String,

        /// Amount in --amount-unit terms
        #[arg(long, default_value_t = 0.0)]
        amount: f64,

        /// How the amount is measured (serving, grams, calorie, portion)
        #[arg(long, default_value = "portion")]
        amount_unit: String,

        /// Protein hand portions
        #[arg(long)]
        protein: Option<f64>,

        /// Carb hand portions
        #[arg(long)]
        carb: Option<f64>,

        /// Vegetable hand portions
        #[arg(long)]
        veg: Option<f64>,

        /// Fat hand portions
        #[arg(long)]
        fat: Option<f64>,

        /// Manual calorie override
        #[arg(long)]
        calories: Option<f64>,
    },

    /// Delete a record, releasing any attachments it holds
    Delete {
        /// Nutrition entry id
        #[arg(long)]
        entry: Option<Uuid>,

        /// Workout id
        #[arg(long)]
        workout: Option<Uuid>,

        /// Daily log date (YYYY-MM-DD)
        #[arg(long)]
        daily: Option<NaiveDate>,
    },

    /// Show analytics for a time window
    Stats {
        /// Window period (day, week, month)
        #[arg(long, default_value = "week")]
        period: String,

        /// Window offset: 0 current, negative past, positive future
        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Muscle balance metric (sets, volume)
        #[arg(long, default_value = "sets")]
        metric: String,
    },

    /// Export the journal to CSV files
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    fitlog_core::logging::init();

    let cli = Cli::parse();

    // Determine data and media directories. A --data-dir override keeps
    // everything under that one root; otherwise the configured locations
    // apply.
    let config = Config::load()?;
    let (data_dir, media_dir) = match cli.data_dir {
        Some(dir) => {
            let media_dir = dir.join("media");
            (dir, media_dir)
        }
        None => (config.data.data_dir.clone(), config.media.media_dir.clone()),
    };
    let journal_path = data_dir.join("journal.json");

    match cli.command {
        Commands::Daily {
            date,
            weight,
            unit,
            sleep_hours,
            wake,
            bed,
            steps,
            rhr,
        } => {
            let unit = resolve_unit(unit, &config)?;
            cmd_daily(
                &journal_path,
                date,
                weight,
                unit,
                sleep_hours,
                wake,
                bed,
                steps,
                rhr,
            )
        }
        Commands::Workout {
            training_type,
            duration,
            exercises,
            unit,
            note,
        } => {
            let unit = resolve_unit(unit, &config)?;
            cmd_workout(&journal_path, &training_type, duration, &exercises, unit, note)
        }
        Commands::Meal {
            meal_type,
            description,
            amount,
            amount_unit,
            protein,
            carb,
            veg,
            fat,
            calories,
            note,
        } => cmd_meal(
            &journal_path,
            &meal_type,
            &description,
            amount,
            &amount_unit,
            (protein, carb, veg, fat),
            calories,
            note,
        ),
        Commands::Pending { meal_type, photos } => {
            cmd_pending(&journal_path, &media_dir, &meal_type, &photos)
        }
        Commands::Complete {
            id,
            description,
            amount,
            amount_unit,
            protein,
            carb,
            veg,
            fat,
            calories,
        } => cmd_complete(
            &journal_path,
            id,
            &description,
            amount,
            &amount_unit,
            (protein, carb, veg, fat),
            calories,
        ),
        Commands::Delete {
            entry,
            workout,
            daily,
        } => cmd_delete(&journal_path, &media_dir, entry, workout, daily),
        Commands::Stats {
            period,
            offset,
            metric,
        } => cmd_stats(&journal_path, &period, offset, &metric, &config),
        Commands::Export { out } => cmd_export(&journal_path, &out),
    }
}

fn resolve_unit(flag: Option<String>, config: &Config) -> Result<WeightUnit> {
    match flag {
        Some(s) => s.parse(),
        None => Ok(config.units.weight_unit),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_daily(
    journal_path: &std::path::Path,
    date: Option<NaiveDate>,
    weight: Option<f64>,
    unit: WeightUnit,
    sleep_hours: Option<f64>,
    wake: Option<NaiveTime>,
    bed: Option<NaiveTime>,
    steps: Option<u32>,
    rhr: Option<u32>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| DailyLog::day_of(Utc::now()));

    let mut journal = MemoryJournal::load(journal_path)?;
    let mut log = journal.daily_log(date).unwrap_or_else(|| DailyLog::new(date));

    if let Some(w) = weight {
        log.weight = Some(unit.to_kg(validate_non_negative("weight", w)?));
    }
    if let Some(h) = sleep_hours {
        log.sleep_duration_hours = Some(validate_non_negative("sleep hours", h)?);
    }
    if wake.is_some() {
        log.wake_up_time = wake;
    }
    if bed.is_some() {
        log.sleep_time = bed;
    }
    if steps.is_some() {
        log.steps = steps;
    }
    if rhr.is_some() {
        log.resting_heart_rate = rhr;
    }

    journal.upsert_daily_log(log)?;
    journal.save(journal_path)?;

    println!("✓ Daily log saved for {}", date);
    Ok(())
}

fn cmd_workout(
    journal_path: &std::path::Path,
    training_type: &str,
    duration: u32,
    exercise_specs: &[String],
    unit: WeightUnit,
    note: Option<String>,
) -> Result<()> {
    let training_type = parse_training_type(training_type)?;

    let mut workout = WorkoutRecord::new(Utc::now(), training_type);
    workout.duration_minutes = duration;
    workout.note = note;

    for (i, spec) in exercise_specs.iter().enumerate() {
        let mut exercise = parse_exercise_spec(spec, unit)?;
        exercise.order_index = i as i32;
        workout.exercises.push(exercise);
    }

    let volume = workout.total_volume();
    let exercise_count = workout.exercises.len();

    let mut journal = MemoryJournal::load(journal_path)?;
    journal.insert_workout(workout)?;
    journal.save(journal_path)?;

    println!("✓ Workout logged");
    println!("  Exercises: {}", exercise_count);
    if volume > 0.0 {
        println!("  Volume: {:.1} kg", volume);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_meal(
    journal_path: &std::path::Path,
    meal_type: &str,
    description: &str,
    amount: f64,
    amount_unit: &str,
    portions: (Option<f64>, Option<f64>, Option<f64>, Option<f64>),
    calories: Option<f64>,
    note: Option<String>,
) -> Result<()> {
    let unit = parse_nutrition_unit(amount_unit)?;

    let mut entry = NutritionEntry::new(Utc::now(), meal_type, description);
    entry.amount = validate_non_negative("amount", amount)?;
    entry.unit = unit;
    entry.note = note;
    entry.set_portions(portions.0, portions.1, portions.2, portions.3)?;
    if let Some(kcal) = calories {
        entry.manual_calories = Some(validate_non_negative("calories", kcal)?);
    }

    let estimate = entry.estimated_calories();

    let mut journal = MemoryJournal::load(journal_path)?;
    journal.insert_entry(entry)?;
    journal.save(journal_path)?;

    println!("✓ Meal logged");
    if estimate > 0.0 {
        println!("  Estimated: {:.0} kcal", estimate);
    }
    Ok(())
}

fn cmd_pending(
    journal_path: &std::path::Path,
    media_dir: &std::path::Path,
    meal_type: &str,
    photos: &[PathBuf],
) -> Result<()> {
    let store = DirAttachmentStore::new(media_dir);

    let mut handles = Vec::new();
    for photo in photos {
        let bytes = std::fs::read(photo)?;
        handles.push(store.save(&bytes, MediaKind::Photo)?);
    }

    let entry = NutritionEntry::pending_with_photos(Utc::now(), meal_type, handles);
    let id = entry.id;

    let mut journal = MemoryJournal::load(journal_path)?;
    journal.insert_entry(entry)?;
    journal.save(journal_path)?;

    println!("✓ Pending meal saved: {}", id);
    println!("  Complete it with: fitlog complete --id {} --description ...", id);
    Ok(())
}

fn cmd_complete(
    journal_path: &std::path::Path,
    id: Uuid,
    description: &str,
    amount: f64,
    amount_unit: &str,
    portions: (Option<f64>, Option<f64>, Option<f64>, Option<f64>),
    calories: Option<f64>,
) -> Result<()> {
    let unit = parse_nutrition_unit(amount_unit)?;

    let mut journal = MemoryJournal::load(journal_path)?;
    let mut entry = journal
        .entries(SortOrder::Ascending)
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| Error::NotFound(format!("nutrition entry {}", id)))?;

    entry.complete(description, amount, unit, calories)?;
    entry.set_portions(portions.0, portions.1, portions.2, portions.3)?;
    let estimate = entry.estimated_calories();

    journal.update_entry(entry)?;
    journal.save(journal_path)?;

    println!("✓ Entry completed");
    if estimate > 0.0 {
        println!("  Estimated: {:.0} kcal", estimate);
    }
    Ok(())
}

fn cmd_delete(
    journal_path: &std::path::Path,
    media_dir: &std::path::Path,
    entry: Option<Uuid>,
    workout: Option<Uuid>,
    daily: Option<NaiveDate>,
) -> Result<()> {
    let mut journal = MemoryJournal::load(journal_path)?;
    let store = DirAttachmentStore::new(media_dir);

    match (entry, workout, daily) {
        (Some(id), None, None) => {
            let removed = journal.delete_entry(id)?;
            media::release_handles(&store, removed.photos.iter().map(String::as_str));
            println!("✓ Deleted nutrition entry {}", id);
        }
        (None, Some(id), None) => {
            let removed = journal.delete_workout(id)?;
            let handles: Vec<&str> = removed
                .media
                .iter()
                .chain(removed.exercises.iter().flat_map(|e| e.media.iter()))
                .map(|m| m.handle.as_str())
                .collect();
            media::release_handles(&store, handles);
            println!("✓ Deleted workout {}", id);
        }
        (None, None, Some(date)) => {
            journal.delete_daily_log(date)?;
            println!("✓ Deleted daily log for {}", date);
        }
        _ => {
            return Err(Error::Validation(
                "specify exactly one of --entry, --workout or --daily".into(),
            ))
        }
    }

    journal.save(journal_path)?;
    Ok(())
}

fn cmd_stats(
    journal_path: &std::path::Path,
    period: &str,
    offset: i64,
    metric: &str,
    config: &Config,
) -> Result<()> {
    let period = parse_period(period)?;
    let metric = parse_muscle_metric(metric)?;
    let now = Utc::now();

    let journal = MemoryJournal::load(journal_path)?;
    let range = offset_range(journal.earliest_record_time(), now, period);
    if !range.contains(&offset) {
        return Err(Error::Validation(format!(
            "offset {} outside the journal range {}..={}",
            offset,
            range.start(),
            range.end()
        )));
    }

    let window = TimeWindow::resolve(period, offset, now);
    let workouts = journal.workouts(SortOrder::Ascending);
    let entries = journal.entries(SortOrder::Ascending);
    let logs = journal.daily_logs(SortOrder::Ascending);

    println!(
        "Stats for {} ({} to {})",
        relative_label(period, offset),
        window.start.date_naive(),
        window.end.date_naive()
    );

    let summary = workout_summary(&workouts, &window);
    println!();
    println!("  Workouts: {}", summary.workouts);
    println!("  Minutes:  {}", summary.total_minutes);
    println!("  Volume:   {:.1} kg over {} sets", summary.total_volume, summary.total_sets);

    let balance = muscle_balance(&workouts, &window, metric);
    if !balance.is_empty() {
        println!();
        println!("  Muscle balance:");
        for item in &balance {
            println!(
                "    {:<10} {} sets, {:.1} kg",
                item.muscle_group.name(),
                item.sets,
                item.volume
            );
        }
    }

    let totals = macro_totals(&entries, &window);
    if !totals.is_empty() {
        println!();
        println!("  Macro portions:");
        for total in &totals {
            println!("    {:<10} {:.1}", total.macro_type.name(), total.portions);
        }
    }
    println!();
    println!("  Calories: {:.0} kcal", total_calories(&entries, &window));

    for (label, metric) in [
        ("Weight", HealthMetric::Weight),
        ("Steps", HealthMetric::Steps),
        ("Sleep", HealthMetric::SleepDuration),
        ("Rest HR", HealthMetric::RestingHeartRate),
    ] {
        let health = health_summary(&logs, &window, metric);
        if let Some(avg) = health.average {
            print!("  {:<8} avg {:.1}", label, avg);
            if let Some((date, max)) = health.max {
                print!(", max {:.1} on {}", max, date);
            }
            println!();
        }
    }

    let logged_days = logs.iter().filter(|l| window.contains_day(l.date)).count();
    if logged_days > 0 {
        let goal_days = days_meeting_step_goal(&logs, &window, config.goals.daily_step_goal);
        println!(
            "  Step goal ({} steps) met on {} of {} day(s)",
            config.goals.daily_step_goal, goal_days, logged_days
        );

        let sleep = health_summary(&logs, &window, HealthMetric::SleepDuration);
        if let Some(avg) = sleep.average {
            if avg < config.goals.sleep_baseline_hours {
                println!(
                    "  Sleep averages below the {:.1} h baseline",
                    config.goals.sleep_baseline_hours
                );
            }
        }
    }

    let pending = pending_entries(&entries);
    if !pending.is_empty() {
        println!();
        println!("  {} pending meal(s) to complete:", pending.len());
        for entry in pending {
            println!("    {} ({})", entry.id, entry.meal_type);
        }
    }

    Ok(())
}

fn cmd_export(journal_path: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let journal = MemoryJournal::load(journal_path)?;

    let logs = export::export_daily_logs(
        &journal.daily_logs(SortOrder::Ascending),
        &out.join("daily_logs.csv"),
    )?;
    let workouts = export::export_workouts(
        &journal.workouts(SortOrder::Ascending),
        &out.join("workouts.csv"),
    )?;
    let meals = export::export_nutrition(
        &journal.entries(SortOrder::Ascending),
        &out.join("nutrition.csv"),
    )?;

    println!("✓ Exported to {}", out.display());
    println!("  {} daily logs, {} workout rows, {} meals", logs, workouts, meals);
    Ok(())
}

// ============================================================================
// Argument parsing helpers
// ============================================================================

fn parse_training_type(s: &str) -> Result<TrainingType> {
    match s.to_lowercase().as_str() {
        "aerobic" | "cardio" => Ok(TrainingType::Aerobic),
        "anaerobic" | "strength" => Ok(TrainingType::Anaerobic),
        other => Err(Error::Validation(format!("unknown training type: {}", other))),
    }
}

fn parse_period(s: &str) -> Result<TimePeriod> {
    match s.to_lowercase().as_str() {
        "day" => Ok(TimePeriod::Day),
        "week" => Ok(TimePeriod::Week),
        "month" => Ok(TimePeriod::Month),
        other => Err(Error::Validation(format!("unknown period: {}", other))),
    }
}

fn parse_muscle_metric(s: &str) -> Result<MuscleMetric> {
    match s.to_lowercase().as_str() {
        "sets" => Ok(MuscleMetric::Sets),
        "volume" => Ok(MuscleMetric::Volume),
        other => Err(Error::Validation(format!("unknown metric: {}", other))),
    }
}

fn parse_nutrition_unit(s: &str) -> Result<NutritionUnit> {
    match s.to_lowercase().as_str() {
        "serving" | "servings" => Ok(NutritionUnit::Serving),
        "grams" | "g" => Ok(NutritionUnit::WeightGrams),
        "calorie" | "calories" | "kcal" => Ok(NutritionUnit::Calorie),
        "portion" | "portions" | "hand" => Ok(NutritionUnit::HandPortion),
        other => Err(Error::Validation(format!("unknown amount unit: {}", other))),
    }
}

fn parse_muscle_group(s: &str) -> Result<MuscleGroup> {
    match s.to_lowercase().as_str() {
        "chest" => Ok(MuscleGroup::Chest),
        "back" => Ok(MuscleGroup::Back),
        "legs" => Ok(MuscleGroup::Legs),
        "shoulders" => Ok(MuscleGroup::Shoulders),
        "arms" => Ok(MuscleGroup::Arms),
        "core" => Ok(MuscleGroup::Core),
        "other" => Ok(MuscleGroup::Other),
        other => Err(Error::Validation(format!("unknown muscle group: {}", other))),
    }
}

fn parse_exercise_type(s: &str) -> Result<ExerciseType> {
    match s.to_lowercase().as_str() {
        "machine" => Ok(ExerciseType::Machine),
        "free_weight" | "free" => Ok(ExerciseType::FreeWeight),
        other => Err(Error::Validation(format!("unknown exercise type: {}", other))),
    }
}

/// Parse `MUSCLE:TYPE:NAME:SETSxWEIGHTxREPS` into an exercise with its
/// sets materialized. Weight is interpreted in `unit` and stored as kg.
fn parse_exercise_spec(spec: &str, unit: WeightUnit) -> Result<ExerciseSet> {
    let parts: Vec<&str> = spec.splitn(4, ':').collect();
    if parts.len() != 4 {
        return Err(Error::Validation(format!(
            "exercise spec must be MUSCLE:TYPE:NAME:SETSxWEIGHTxREPS, got: {}",
            spec
        )));
    }

    let muscle_group = parse_muscle_group(parts[0])?;
    let exercise_type = parse_exercise_type(parts[1])?;
    let name = parts[2].trim();
    if name.is_empty() {
        return Err(Error::Validation("exercise name must not be empty".into()));
    }

    let dims: Vec<&str> = parts[3].split('x').collect();
    if dims.len() != 3 {
        return Err(Error::Validation(format!(
            "set spec must be SETSxWEIGHTxREPS, got: {}",
            parts[3]
        )));
    }
    let count: u32 = dims[0]
        .parse()
        .map_err(|_| Error::Validation(format!("bad set count: {}", dims[0])))?;
    let weight: f64 = dims[1]
        .parse()
        .map_err(|_| Error::Validation(format!("bad weight: {}", dims[1])))?;
    let reps: u32 = dims[2]
        .parse()
        .map_err(|_| Error::Validation(format!("bad rep count: {}", dims[2])))?;

    let mut exercise = ExerciseSet::new(name, exercise_type, muscle_group);
    exercise.repeat_sets(count, unit.to_kg(weight), reps)?;
    Ok(exercise)
}
