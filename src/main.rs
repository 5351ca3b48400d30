use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ukulele::formulas::quality_button_label;
use ukulele::widget::DiatonicWidget;
use ukulele::{
    chord_board, describe_chord, normalize, render_board, AccidentalPreference, ChordKind,
    DisplayMode, FretRange, ScaleKind, UkuleleError, WidgetConfig,
};

#[derive(Parser)]
#[command(name = "ukulele", version, about = "Ukulele chords and diatonic harmony in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a chord's tones and where they sit on the neck
    Chord {
        name: String,
        /// dots, degrees or note-names
        #[arg(long)]
        mode: Option<String>,
        #[arg(long, conflicts_with = "sharp")]
        flat: bool,
        #[arg(long)]
        sharp: bool,
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        to: Option<i32>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show the chords built on each degree of a key
    Diatonic {
        key: String,
        /// major, naturalMinor, harmonicMinor or melodicMinor
        #[arg(long)]
        scale: Option<String>,
        /// Four-note chords instead of triads
        #[arg(long)]
        seventh: bool,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        to: Option<i32>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the chord qualities offered as buttons
    Qualities {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), UkuleleError> {
    match command {
        Command::Chord {
            name,
            mode,
            flat,
            sharp,
            from,
            to,
            config,
        } => {
            let config = load_config(config)?;
            let mode = display_mode(mode, config.display_mode)?;
            let preference = if flat {
                Some(AccidentalPreference::Flat)
            } else if sharp {
                Some(AccidentalPreference::Sharp)
            } else {
                config_preference(&config)
            };
            let range = fret_range(from, to, config.fret_range, FretRange::full()).unwrap_or_default();

            println!("{}", describe_chord(&name, preference)?);
            println!();
            println!("{}", chord_board(&name, range, mode, preference)?);
        }
        Command::Diatonic {
            key,
            scale,
            seventh,
            mode,
            from,
            to,
            config,
        } => {
            let mut config = load_config(config)?;
            if normalize(&key).is_none() {
                return Err(UkuleleError::UnknownNote(key));
            }
            config.key = key;
            if let Some(scale) = scale {
                config.scale = ScaleKind::from_key(&scale).ok_or_else(|| {
                    UkuleleError::ConfigError(format!("unknown scale: {}", scale))
                })?;
            }
            if seventh {
                config.chord_kind = ChordKind::Seventh;
            }
            config.display_mode = display_mode(mode, config.display_mode)?;
            let (start, end) = DiatonicWidget::DEFAULT_RANGE;
            config.fret_range = fret_range(from, to, config.fret_range, FretRange::new(start, end));

            let widget = DiatonicWidget::new(&config);
            println!("{}", widget.status().message());
            for (entry, board) in widget.boards() {
                println!();
                println!("{}  {}", entry.degree_label, entry.chord_label);
                println!("{}", render_board(&board));
            }
        }
        Command::Qualities { config } => {
            let config = load_config(config)?;
            for quality in &config.qualities {
                let key = if quality.is_empty() { "\"\"" } else { quality.as_str() };
                println!("{:<8} {}", key, quality_button_label(quality));
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<WidgetConfig, UkuleleError> {
    match path {
        Some(path) => WidgetConfig::load(&path),
        None => Ok(WidgetConfig::default()),
    }
}

fn display_mode(flag: Option<String>, fallback: DisplayMode) -> Result<DisplayMode, UkuleleError> {
    match flag {
        Some(mode) => DisplayMode::from_str(&mode)
            .ok_or_else(|| UkuleleError::ConfigError(format!("unknown display mode: {}", mode))),
        None => Ok(fallback),
    }
}

// Sharp is the default, so only a flat setting overrides the typed accidental.
fn config_preference(config: &WidgetConfig) -> Option<AccidentalPreference> {
    if config.preference == AccidentalPreference::default() {
        None
    } else {
        Some(config.preference)
    }
}

fn fret_range(
    from: Option<i32>,
    to: Option<i32>,
    configured: Option<FretRange>,
    fallback: FretRange,
) -> Option<FretRange> {
    match (from, to) {
        (None, None) => configured,
        (start, end) => {
            let base = configured.unwrap_or(fallback);
            Some(FretRange::new(
                start.unwrap_or(base.start() as i32),
                end.unwrap_or(base.end() as i32),
            ))
        }
    }
}
