//! shloka - read scripture in the terminal, translated on demand
#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shloka::{Config, Language, Provider, Reader, ResolvedTranslation, Scripture};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Read { file } => shloka::app::run(file.as_deref()),
        Command::Demo => shloka::app::run_demo(),
        Command::Outline { file } => outline(file.as_deref()),
        Command::Translate {
            verse_id,
            language,
            file,
        } => translate_cli(&verse_id, language.as_deref(), file.as_deref()),
        Command::Languages { query } => {
            list_languages(query.as_deref().unwrap_or(""));
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Read {
        file: Option<PathBuf>,
    },
    Demo,
    Outline {
        file: Option<PathBuf>,
    },
    Translate {
        verse_id: String,
        language: Option<String>,
        file: Option<PathBuf>,
    },
    Languages {
        query: Option<String>,
    },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Read { file: None });
    }

    let flag = |names: &[&str]| {
        args.iter()
            .position(|a| names.contains(&a.as_str()))
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "--demo" | "demo" => Ok(Command::Demo),

        "read" => Ok(Command::Read {
            file: args.get(2).map(PathBuf::from),
        }),

        "outline" | "ls" => Ok(Command::Outline {
            file: args.get(2).map(PathBuf::from),
        }),

        "translate" | "tr" => {
            let verse_id = args
                .get(2)
                .filter(|a| !a.starts_with('-'))
                .ok_or_else(|| anyhow::anyhow!("Missing verse id\nExample: shloka translate 1.1.1 --lang fr"))?
                .clone();
            Ok(Command::Translate {
                verse_id,
                language: flag(&["--lang", "-l"]),
                file: flag(&["--file", "-f"]).map(PathBuf::from),
            })
        }

        "languages" | "langs" => Ok(Command::Languages {
            query: args.get(2).cloned(),
        }),

        other if Path::new(other).extension().is_some_and(|e| e == "json") => Ok(Command::Read {
            file: Some(PathBuf::from(other)),
        }),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'shloka --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
📜 shloka - read scripture in the terminal, translated on demand

USAGE:
    shloka [FILE]                      Open a scripture JSON file in the TUI
    shloka [COMMAND]

COMMANDS:
    read [FILE]                        Open the TUI (FILE or configured scripture_path)
    demo                               Open the TUI on built-in sample hymns
    outline [FILE]                     Print the section/subsection/verse tree
    translate <VERSE_ID> [OPTIONS]     Print one verse with its translation
      Options:
        -l, --lang <code>              Target language (default: from config)
        -f, --file <path>              Scripture file (default: config, then demo)
      Examples:
        shloka translate 1.1.1
        shloka translate 10.129.2 --lang fr
    languages [QUERY]                  List languages, optionally filtered

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Tab           Switch panel
    j/k, Enter    Move and select in lists
    n/p           Next/previous verse
    L             Choose language
    R / x         Retry / dismiss a failed translation
    r             Report a problem with the verse
    t             Change theme
    ?             Help

AI TRANSLATION:
    Set GEMINI_API_KEY (or the variable named by provider.api_key_env).

CONFIG:
    {}
"#,
        shloka::LOGO,
        config_path
    );
}

fn print_version() {
    println!("shloka {}", shloka::VERSION);
}

/// Scripture from an explicit file, the configured file, or the demo
fn load_scripture(file: Option<&Path>, config: &Config) -> Result<Scripture> {
    match file.or(config.scripture_path.as_deref()) {
        Some(path) => {
            Scripture::load(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(shloka::demo::rig_veda()?),
    }
}

fn outline(file: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let scripture = load_scripture(file, &config)?;
    let names = scripture.level_names();

    println!("{} ({} verses)", scripture.title(), scripture.verse_count());
    if let Some(description) = scripture.description() {
        println!("{description}");
    }

    for section in scripture.sections() {
        println!("\n{} {}: {}", names.section, section.id, section.title);
        for subsection in &section.subsections {
            let ids: Vec<&str> = subsection.verses.iter().map(|v| v.id.as_str()).collect();
            let verses = if ids.is_empty() {
                "(no verses)".to_string()
            } else {
                ids.join(", ")
            };
            println!("  {} {}: {}", names.subsection, subsection.id, subsection.title);
            println!("    {verses}");
        }
    }

    Ok(())
}

fn translate_cli(verse_id: &str, language: Option<&str>, file: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let scripture = load_scripture(file, &config)?;
    let language = Language::resolve(language.unwrap_or(&config.default_language));
    let provider = Provider::from_config(&config.provider);

    let mut reader = Reader::new(Arc::new(scripture));
    reader.jump_to(verse_id)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let resolved = runtime
        .block_on(reader.translate_current(&provider, &language))
        .context("No verse selected")?
        .with_context(|| format!("Failed to translate {verse_id} into {}", language.name))?;

    if let Some(verse) = reader.current_verse() {
        println!("{} {}\n", reader.scripture().level_names().verse, verse.id);
        for line in &verse.source_lines {
            println!("  {line}");
        }
        if let Some(alternate) = &verse.alternate_script_lines {
            println!();
            for line in alternate {
                println!("  {line}");
            }
        }
    }
    print_translation(&resolved, &language);

    Ok(())
}

fn print_translation(resolved: &ResolvedTranslation, language: &Language) {
    let verified = if resolved.human_verified { ", human verified" } else { "" };
    println!("\n{} ({}{})", language, resolved.source.label(), verified);

    let payload = &resolved.payload;
    let parts = [
        ("Pada", &payload.gloss),
        ("Padartha", &payload.phrase_analysis),
        ("Bhavartha", &payload.purport),
    ];
    for (heading, text) in parts {
        if let Some(text) = text {
            println!("\n{heading}:");
            for line in textwrap::wrap(text, 76) {
                println!("  {line}");
            }
        }
    }
}

fn list_languages(query: &str) {
    let languages = Language::search(query);
    if languages.is_empty() {
        println!("No language matches '{query}'.");
        return;
    }
    for language in languages {
        println!("  {:<4} {}", language.code, language.name);
    }
}
