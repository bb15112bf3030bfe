use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use study_core::model::sample::sample_study_set;
use study_core::model::{StudySet, StudySettings, StudySettingsDraft};
use study_services::{TopicSource, load_study_set};

mod screens;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMillis { flag: &'static str, raw: String },
    InvalidRange { raw: String },
    MissingTopic,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMillis { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected milliseconds)")
            }
            ArgsError::InvalidRange { raw } => {
                write!(f, "invalid --tutor-delay-ms value: {raw} (expected <min>..<max>)")
            }
            ArgsError::MissingTopic => write!(f, "generate needs a topic or --file <name>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_millis(raw: &str, flag: &'static str) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidMillis {
            flag,
            raw: raw.to_string(),
        })
}

fn parse_millis_range(raw: &str) -> Result<(Duration, Duration), ArgsError> {
    let invalid = || ArgsError::InvalidRange {
        raw: raw.to_string(),
    };
    let (min, max) = raw.split_once("..").ok_or_else(invalid)?;
    let min = min.trim().parse::<u64>().map_err(|_| invalid())?;
    let max = max.trim().parse::<u64>().map_err(|_| invalid())?;
    Ok((Duration::from_millis(min), Duration::from_millis(max)))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  study [materials|flashcards|quiz|tutor] [options]");
    eprintln!("  study generate (<topic> | --file <name>) [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog <path>              JSON study set (default: built-in sample)");
    eprintln!("  --mark-delay-ms <n>           pause after marking a card studied (default 500)");
    eprintln!("  --tick-ms <n>                 quiz timer period (default 1000)");
    eprintln!("  --tutor-delay-ms <min>..<max> tutor typing delay (default 1000..3000)");
    eprintln!("  --instant                     no simulated pauses");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_CATALOG, STUDY_MARK_DELAY_MS, STUDY_TICK_MS, STUDY_TUTOR_DELAY_MS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Materials,
    Flashcards,
    Quiz,
    Tutor,
    Generate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "materials" | "study" => Some(Self::Materials),
            "flashcards" | "cards" => Some(Self::Flashcards),
            "quiz" => Some(Self::Quiz),
            "tutor" | "chat" => Some(Self::Tutor),
            "generate" => Some(Self::Generate),
            _ => None,
        }
    }
}

struct Args {
    catalog: Option<PathBuf>,
    settings: StudySettingsDraft,
    topic: Option<TopicSource>,
}

impl Args {
    /// Defaults from `STUDY_*` variables; `var` looks one up by name.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        let mut settings = StudySettingsDraft::new();
        if let Some(raw) = var("STUDY_MARK_DELAY_MS") {
            settings.mark_studied_delay = Some(parse_millis(&raw, "STUDY_MARK_DELAY_MS")?);
        }
        if let Some(raw) = var("STUDY_TICK_MS") {
            settings.tick_interval = Some(parse_millis(&raw, "STUDY_TICK_MS")?);
        }
        if let Some(raw) = var("STUDY_TUTOR_DELAY_MS") {
            let (min, max) = parse_millis_range(&raw)?;
            settings.tutor_delay_min = Some(min);
            settings.tutor_delay_max = Some(max);
        }

        Ok(Self {
            catalog: var("STUDY_CATALOG").map(PathBuf::from),
            settings,
            topic: None,
        })
    }

    /// Flags override whatever the environment set.
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_vars(var)?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    parsed.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--mark-delay-ms" => {
                    let value = require_value(args, "--mark-delay-ms")?;
                    parsed.settings.mark_studied_delay =
                        Some(parse_millis(&value, "--mark-delay-ms")?);
                }
                "--tick-ms" => {
                    let value = require_value(args, "--tick-ms")?;
                    parsed.settings.tick_interval = Some(parse_millis(&value, "--tick-ms")?);
                }
                "--tutor-delay-ms" => {
                    let value = require_value(args, "--tutor-delay-ms")?;
                    let (min, max) = parse_millis_range(&value)?;
                    parsed.settings.tutor_delay_min = Some(min);
                    parsed.settings.tutor_delay_max = Some(max);
                }
                "--instant" => {
                    let tick = parsed.settings.tick_interval;
                    parsed.settings = StudySettingsDraft {
                        tick_interval: tick,
                        ..StudySettingsDraft::instant()
                    };
                }
                "--file" if cmd == Command::Generate => {
                    let file_name = require_value(args, "--file")?;
                    parsed.topic = Some(TopicSource::File { file_name });
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if cmd == Command::Generate && !other.starts_with("--") => {
                    parsed.topic = Some(TopicSource::Text(other.to_string()));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Generate && parsed.topic.is_none() {
            return Err(ArgsError::MissingTopic);
        }
        Ok(parsed)
    }
}

fn load_material(catalog: Option<&PathBuf>) -> Result<StudySet, Box<dyn std::error::Error>> {
    match catalog {
        Some(path) => {
            log::info!("loading study set from {}", path.display());
            Ok(load_study_set(path)?)
        }
        None => Ok(sample_study_set()?),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: flashcards when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Flashcards,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Flashcards,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let settings: StudySettings = parsed.settings.validate()?;
    log::debug!("running {cmd:?} with {settings:?}");

    match cmd {
        Command::Materials => {
            let material = load_material(parsed.catalog.as_ref())?;
            screens::materials(&material)
        }
        Command::Flashcards => {
            let material = load_material(parsed.catalog.as_ref())?;
            screens::flashcards(&material, &settings).await
        }
        Command::Quiz => {
            let material = load_material(parsed.catalog.as_ref())?;
            screens::quiz(&material, &settings).await
        }
        Command::Tutor => screens::tutor(&settings).await,
        Command::Generate => match parsed.topic {
            Some(source) => screens::generate(&source, &settings).await,
            None => Err(ArgsError::MissingTopic.into()),
        },
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    fn parse_with(
        cmd: Command,
        argv: &[&str],
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Args, ArgsError> {
        let mut iter = argv.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter, var)
    }

    #[test]
    fn millis_range_parses_and_trims() {
        assert_eq!(
            parse_millis_range(" 250 .. 900 "),
            Ok((Duration::from_millis(250), Duration::from_millis(900)))
        );
        assert_eq!(
            parse_millis_range("1000-3000"),
            Err(ArgsError::InvalidRange {
                raw: "1000-3000".into()
            })
        );
        assert!(parse_millis_range("a..3").is_err());
        assert!(parse_millis_range("1..").is_err());
    }

    #[test]
    fn instant_keeps_tick_interval() {
        let args = parse_with(Command::Quiz, &["--tick-ms", "250", "--instant"], no_vars).unwrap();
        assert_eq!(args.settings.tick_interval, Some(Duration::from_millis(250)));
        assert_eq!(args.settings.mark_studied_delay, Some(Duration::ZERO));
        assert_eq!(args.settings.tutor_delay_max, Some(Duration::ZERO));

        let args = parse_with(Command::Quiz, &["--instant"], no_vars).unwrap();
        assert_eq!(args.settings.tick_interval, None);
    }

    #[test]
    fn flags_override_environment() {
        let vars = |key: &str| match key {
            "STUDY_TICK_MS" => Some("2000".to_string()),
            "STUDY_TUTOR_DELAY_MS" => Some("10..20".to_string()),
            "STUDY_CATALOG" => Some("env.json".to_string()),
            _ => None,
        };

        let args = parse_with(Command::Flashcards, &[], vars).unwrap();
        assert_eq!(args.settings.tick_interval, Some(Duration::from_secs(2)));
        assert_eq!(args.settings.tutor_delay_min, Some(Duration::from_millis(10)));
        assert_eq!(args.catalog, Some(PathBuf::from("env.json")));

        let args = parse_with(
            Command::Flashcards,
            &["--tick-ms", "100", "--catalog", "flag.json"],
            vars,
        )
        .unwrap();
        assert_eq!(args.settings.tick_interval, Some(Duration::from_millis(100)));
        assert_eq!(args.settings.tutor_delay_max, Some(Duration::from_millis(20)));
        assert_eq!(args.catalog, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn bad_environment_value_names_the_variable() {
        let vars = |key: &str| (key == "STUDY_MARK_DELAY_MS").then(|| "soon".to_string());
        let err = parse_with(Command::Flashcards, &[], vars).err();
        assert_eq!(
            err,
            Some(ArgsError::InvalidMillis {
                flag: "STUDY_MARK_DELAY_MS",
                raw: "soon".into()
            })
        );
    }

    #[test]
    fn generate_needs_a_topic() {
        assert_eq!(
            parse_with(Command::Generate, &[], no_vars).err(),
            Some(ArgsError::MissingTopic)
        );

        let args = parse_with(Command::Generate, &["--file", "notes.pdf"], no_vars).unwrap();
        assert_eq!(
            args.topic,
            Some(TopicSource::File {
                file_name: "notes.pdf".into()
            })
        );

        let args = parse_with(Command::Generate, &["Cells"], no_vars).unwrap();
        assert_eq!(args.topic, Some(TopicSource::Text("Cells".into())));
    }

    #[test]
    fn stray_arguments_are_rejected() {
        assert_eq!(
            parse_with(Command::Quiz, &["Cells"], no_vars).err(),
            Some(ArgsError::UnknownArg("Cells".into()))
        );
        assert_eq!(
            parse_with(Command::Quiz, &["--tick-ms"], no_vars).err(),
            Some(ArgsError::MissingValue { flag: "--tick-ms" })
        );
    }

    #[test]
    fn subcommand_names() {
        assert_eq!(Command::from_arg("study"), Some(Command::Materials));
        assert_eq!(Command::from_arg("cards"), Some(Command::Flashcards));
        assert_eq!(Command::from_arg("chat"), Some(Command::Tutor));
        assert_eq!(Command::from_arg("review"), None);
    }
}
