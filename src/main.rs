//! treinofit - Weekly workout planner
//!
//! Browse the catalog, build a week, curate workouts as admin.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;

use treinofit::admin::WorkoutDraft;
use treinofit::app::App;
use treinofit::db::Database;
use treinofit::media::{self, MediaTarget};
use treinofit::plan::Day;
use treinofit::tui::TuiApp;
use treinofit::workouts::{MuscleGroup, Workout};

const DEFAULT_DB: &str = "treinofit.db";
const LOG_PATH: &str = "treinofit.log";

#[derive(Parser)]
#[command(name = "treinofit")]
#[command(author, version, about = "Weekly workout planner")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "TREINOFIT_DB", default_value = DEFAULT_DB)]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal UI
    Tui,

    /// Print the workout catalog
    Catalog {
        /// Only these muscle groups (label or slug, e.g. "legs-glute")
        #[arg(short, long)]
        group: Vec<MuscleGroup>,
    },

    /// Manage your weekly plan
    Plan {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        name: String,
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Curate the catalog (admin only)
    Admin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Show the week
    Show,
    /// Schedule a catalog workout on a day (e.g. "segunda" or "monday")
    Add { workout_id: String, day: Day },
    /// Remove one scheduled entry
    Remove { day: Day, planned_id: String },
    /// Empty the whole week
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create or update a workout from a JSON file
    Save {
        file: PathBuf,
        /// Cover image or video to embed
        #[arg(long)]
        cover: Option<PathBuf>,
        /// Exercise media as <index>=<path>, index starting at 1
        #[arg(long = "exercise-media", value_parser = parse_exercise_media)]
        exercise_media: Vec<(usize, PathBuf)>,
    },
    /// Delete a workout from the catalog
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn parse_exercise_media(s: &str) -> Result<(usize, PathBuf), String> {
    let (index, path) = s.split_once('=').ok_or("expected <index>=<path>")?;
    let index: usize = index.parse().map_err(|_| format!("bad exercise index: {}", index))?;
    if index == 0 {
        return Err("exercise index starts at 1".to_string());
    }
    Ok((index - 1, PathBuf::from(path)))
}

fn init_logging(to_file: bool) -> Result<()> {
    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_PATH)
            .with_context(|| format!("opening {}", LOG_PATH))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(interactive)?;

    let db = Database::open(&cli.db)?;
    let mut app = App::new(Rc::new(db));

    match cli.command {
        None | Some(Commands::Tui) => {
            let mut tui = TuiApp::new(app);
            tui.run()?;
        }

        Some(Commands::Catalog { group }) => {
            for group in group {
                app.toggle_filter(group);
            }
            println!("Catalog:");
            println!("{:-<72}", "");
            for w in app.filtered_workouts() {
                print_workout(w);
            }
        }

        Some(Commands::Plan { email, password, name, action }) => {
            app.login(&email, &password, &name)?;
            match action {
                PlanAction::Show => print_plan(&app),
                PlanAction::Add { workout_id, day } => {
                    let workout = app
                        .catalog()
                        .get(&workout_id)
                        .cloned()
                        .with_context(|| format!("no workout with id {}", workout_id))?;
                    app.request_schedule(workout);
                    match app.assign_pending(day) {
                        Some(s) => println!("Scheduled: {} on {} (id: {})", s.workout.name, day, s.planned_id),
                        None => bail!("could not schedule {}", workout_id),
                    }
                }
                PlanAction::Remove { day, planned_id } => {
                    if app.unschedule(day, &planned_id) {
                        println!("Removed {} from {}", planned_id, day);
                    } else {
                        println!("Nothing with id {} on {}", planned_id, day);
                    }
                }
                PlanAction::Clear { yes } => {
                    if !yes {
                        bail!("refusing to clear the week without --yes");
                    }
                    app.request_clear_week();
                    if app.confirm_clear_week() {
                        println!("Week cleared");
                    } else {
                        bail!("week was not cleared");
                    }
                }
            }
        }

        Some(Commands::Admin { email, password, action }) => {
            app.login(&email, &password, "")?;
            if !app.is_admin() {
                bail!("{} is not an administrator", email);
            }
            match action {
                AdminAction::Save { file, cover, exercise_media } => {
                    let json = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading {}", file.display()))?;
                    let workout: Workout = serde_json::from_str(&json)
                        .with_context(|| format!("parsing {}", file.display()))?;
                    let mut draft = app.import_workout(&workout).context("import refused")?;
                    attach_media(&mut draft, cover, exercise_media).await?;
                    match app.save_draft(draft) {
                        Some(outcome) => println!("{:?}: {}", outcome, workout.name),
                        None => bail!("save refused"),
                    }
                }
                AdminAction::Delete { id, yes } => {
                    if !yes {
                        bail!("refusing to delete without --yes");
                    }
                    app.request_delete(&id);
                    if app.confirm_delete() {
                        println!("Deleted {}", id);
                    } else {
                        println!("No workout with id {}", id);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Encode every requested file concurrently. Each task carries its target,
/// so completion order does not matter.
async fn attach_media(
    draft: &mut WorkoutDraft,
    cover: Option<PathBuf>,
    exercise_media: Vec<(usize, PathBuf)>,
) -> Result<()> {
    let mut uploads = JoinSet::new();

    if let Some(path) = cover {
        uploads.spawn(media::upload(MediaTarget::Cover, path));
    }
    for (index, path) in exercise_media {
        let row = draft
            .rows()
            .get(index)
            .map(|r| r.row)
            .with_context(|| format!("workout has no exercise #{}", index + 1))?;
        uploads.spawn(media::upload(MediaTarget::Exercise(row), path));
    }

    while let Some(joined) = uploads.join_next().await {
        let upload = joined??;
        draft.apply_upload(upload);
    }
    Ok(())
}

fn print_workout(w: &Workout) {
    println!(
        "{:14} | {:28} | {:18} | {:>7} | {} exercises",
        w.id,
        w.name,
        w.muscle_group.label(),
        w.duration,
        w.exercises.len()
    );
}

fn print_plan(app: &App) {
    println!("Weekly plan ({} workouts):", app.plan().total());
    println!("{:-<60}", "");
    for (day, list) in app.plan().plan().days() {
        println!("{}:", day);
        for s in list {
            println!("  {:30} | {:>7} | {}", s.workout.name, s.workout.duration, s.planned_id);
        }
    }
}
