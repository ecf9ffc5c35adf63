use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use wordrill::config::Config;
use wordrill::event::{AppEvent, EventHandler};
use wordrill::generator::{Exercise, ExerciseGenerator, ExerciseKind, RngShuffler, Shuffler};
use wordrill::session::timer::format_clock;
use wordrill::session::{
    Advance, ProgressReporter, SessionEngine, SessionError, SessionMode, SessionPhase,
    SessionSummary, Submission,
};
use wordrill::store::word_bank::{DEMO_LIST_ID, demo_list};
use wordrill::store::{JsonStore, WordBank};

#[derive(Parser)]
#[command(name = "wordrill", version, about = "Vocabulary drills in the terminal")]
struct Cli {
    #[arg(short, long, help = "Word list id (defaults to the built-in demo list)")]
    list: Option<String>,

    #[arg(short, long, help = "Take a timed test instead of a learning session")]
    test: bool,

    #[arg(short, long, help = "Import a JSON word list before starting")]
    words: Option<PathBuf>,

    #[arg(short, long, help = "Maximum number of exercises")]
    exercises: Option<usize>,

    #[arg(short, long, help = "Test time limit in seconds")]
    duration: Option<u64>,
}

enum Input {
    Line(String),
    TimeUp(SessionSummary),
    Closed,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(count) = cli.exercises {
        config.learning_exercise_count = count;
        config.test_exercise_count = count;
    }
    if let Some(secs) = cli.duration {
        config.test_duration_secs = secs;
    }
    config.validate();

    let store = JsonStore::with_base_dir(config.data_path())?;
    let imported = match cli.words {
        Some(ref path) => Some(store.import_list(path)?.id),
        None => None,
    };
    let list_id = cli
        .list
        .or(imported)
        .unwrap_or_else(|| DEMO_LIST_ID.to_string());
    if list_id == DEMO_LIST_ID && store.load_list(DEMO_LIST_ID).is_err() {
        store.save_list(&demo_list())?;
    }

    let entries = store.entries(&list_id)?;
    let list_name = store.list_name(&list_id)?;
    let mode = if cli.test {
        SessionMode::Test
    } else {
        SessionMode::Learning
    };

    let generator =
        ExerciseGenerator::with_limits(RngShuffler::from_entropy(), config.generator_limits());
    let mut engine = SessionEngine::new(list_id, mode, entries, generator, store)
        .with_time_limit(Duration::from_secs(config.test_duration_secs));
    let events = EventHandler::new(Duration::from_millis(250));

    run(&mut engine, &list_name, &config, &events)
}

fn run<S: Shuffler, P: ProgressReporter>(
    engine: &mut SessionEngine<S, P>,
    list_name: &str,
    config: &Config,
    events: &EventHandler,
) -> Result<()> {
    loop {
        match engine.phase() {
            SessionPhase::Introducing => {
                print_intro(engine, list_name);
                match read_input(engine, events)? {
                    Input::Line(line) if line.trim() == ":q" => return Ok(()),
                    Input::Line(_) => match engine.start() {
                        Ok(()) => {}
                        Err(SessionError::NoExercisesAvailable) => {
                            println!("This list has no words yet. Add some and try again.");
                            return Ok(());
                        }
                        Err(e) => return Err(e.into()),
                    },
                    Input::TimeUp(_) | Input::Closed => return Ok(()),
                }
            }
            SessionPhase::Presenting => {
                let Some(exercise) = engine.current_exercise().cloned() else {
                    return Ok(());
                };
                print_exercise(engine, &exercise);
                let line = match read_input(engine, events)? {
                    Input::Line(line) => line,
                    Input::TimeUp(summary) => {
                        println!("\nTime is up!");
                        print_summary(&summary);
                        continue;
                    }
                    Input::Closed => {
                        engine.quit()?;
                        return Ok(());
                    }
                };
                if line.trim() == ":q" {
                    if confirm_quit(engine, events)? {
                        engine.quit()?;
                        return Ok(());
                    }
                    continue;
                }
                let answer = resolve_answer(&exercise, &line);
                if let Submission::Recorded(outcome) = engine.submit_answer(&answer)? {
                    if outcome.correct {
                        println!("Correct! +{:.0}", outcome.points);
                    } else {
                        println!("Wrong. The answer was: {}", exercise.correct_answer);
                    }
                }
            }
            SessionPhase::ShowingFeedback => {
                thread::sleep(Duration::from_millis(config.feedback_delay_ms));
                // The countdown may have run out during the pause.
                if let Some(summary) = engine.tick(Instant::now()) {
                    println!("\nTime is up!");
                    print_summary(&summary);
                    continue;
                }
                if let Advance::Finished(summary) = engine.advance()? {
                    print_summary(&summary);
                }
            }
            SessionPhase::Summarizing => {
                if let Some(e) = engine.take_report_error() {
                    eprintln!("Warning: progress was not saved: {e:#}");
                }
                println!("Press r to start again, Enter to exit.");
                match read_input(engine, events)? {
                    Input::Line(line) if line.trim().eq_ignore_ascii_case("r") => {
                        engine.restart()?;
                    }
                    _ => return Ok(()),
                }
            }
            SessionPhase::Idle => return Ok(()),
        }
    }
}

/// Wait for a line, checking the countdown on every tick.
fn read_input<S: Shuffler, P: ProgressReporter>(
    engine: &mut SessionEngine<S, P>,
    events: &EventHandler,
) -> Result<Input> {
    print!("> ");
    io::stdout().flush()?;
    loop {
        match events.next()? {
            AppEvent::Line(line) => return Ok(Input::Line(line)),
            AppEvent::Tick => {
                if let Some(summary) = engine.tick(Instant::now()) {
                    return Ok(Input::TimeUp(summary));
                }
            }
            AppEvent::Eof => return Ok(Input::Closed),
        }
    }
}

fn confirm_quit<S: Shuffler, P: ProgressReporter>(
    engine: &mut SessionEngine<S, P>,
    events: &EventHandler,
) -> Result<bool> {
    println!("Quit this session? Your progress will not be saved. (y/N)");
    Ok(match read_input(engine, events)? {
        Input::Line(line) => line.trim().eq_ignore_ascii_case("y"),
        Input::TimeUp(summary) => {
            println!("\nTime is up!");
            print_summary(&summary);
            false
        }
        Input::Closed => true,
    })
}

/// Multiple-choice answers may be given by option number.
fn resolve_answer(exercise: &Exercise, line: &str) -> String {
    if let Some(ref options) = exercise.options {
        if let Ok(n) = line.trim().parse::<usize>() {
            if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
                return option.clone();
            }
        }
    }
    line.to_string()
}

fn print_intro<S: Shuffler, P: ProgressReporter>(engine: &SessionEngine<S, P>, list_name: &str) {
    let title = match engine.mode() {
        SessionMode::Learning => "Learning mode",
        SessionMode::Test => "Test mode",
    };
    println!("\n{title}: {list_name}");
    println!("{} exercises.", engine.exercises().len());
    if let Some(left) = engine.time_left(Instant::now()) {
        println!("Time limit: {}", format_clock(left));
    } else {
        println!("Consecutive correct answers earn bonus points.");
    }
    println!("Press Enter to begin, :q to leave.");
}

fn print_exercise<S: Shuffler, P: ProgressReporter>(
    engine: &SessionEngine<S, P>,
    exercise: &Exercise,
) {
    let number = engine.current_index() + 1;
    let total = engine.exercises().len();
    let mut header = format!("\n[{number}/{total}] score {:.0}", engine.score());
    if let Some(left) = engine.time_left(Instant::now()) {
        header.push_str(&format!("  time {}", format_clock(left)));
    }
    println!("{header}");

    match exercise.kind {
        ExerciseKind::MultipleChoice => println!("What does \"{}\" mean?", exercise.question),
        ExerciseKind::FillBlank => {
            println!("Give the meaning of the missing word: {}", exercise.question)
        }
        ExerciseKind::Write => println!("Write the word for: {}", exercise.question),
    }
    if let Some(ref options) = exercise.options {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
    }
}

fn print_summary(summary: &SessionSummary) {
    println!("\nSession complete");
    println!(
        "  {}/{} correct ({:.0}%)",
        summary.correct,
        summary.total,
        summary.accuracy()
    );
    println!("  score {}", summary.display_score());
    if let Some(secs) = summary.elapsed_secs {
        println!("  time {}", format_clock(Duration::from_secs_f64(secs)));
    }
}
