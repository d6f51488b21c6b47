use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use wortdrill::app::App;
use wortdrill::config::Config;
use wortdrill::event::{AppEvent, EventHandler};
use wortdrill::store::json_store::JsonStore;
use wortdrill::ui;
use wortdrill::vocab::{Language, Vocabulary, WordType};

#[derive(Parser)]
#[command(
    name = "wortdrill",
    version,
    about = "Terminal vocabulary typing drills with spaced repetition"
)]
struct Cli {
    #[arg(short, long, value_parser = parse_language, help = "Target language (de, fr, es, no, en)")]
    lang: Option<Language>,

    #[arg(short, long, value_parser = parse_language, help = "Language translations are shown in")]
    base: Option<Language>,

    #[arg(short, long, help = "Drill every conjugated form of verbs")]
    full: bool,

    #[arg(long, value_parser = parse_word_type, help = "Only drill this word type (noun, verb)")]
    only: Option<WordType>,

    #[arg(short, long, help = "Number of words per session")]
    words: Option<usize>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Type accented letters directly instead of using dead keys")]
    no_dead_keys: bool,

    #[arg(long, help = "Write the current settings back to the config file")]
    save_config: bool,

    #[arg(long, value_name = "PATH", help = "Export progress to a JSON file and exit")]
    export: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Import progress from an export file and exit")]
    import: Option<PathBuf>,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| {
        let known: Vec<String> = Vocabulary::available_languages()
            .iter()
            .map(|l| l.code().to_string())
            .collect();
        format!("unknown language `{code}` (known: {})", known.join(", "))
    })
}

fn parse_word_type(value: &str) -> Result<WordType, String> {
    match value {
        "noun" => Ok(WordType::Noun),
        "verb" => Ok(WordType::Verb),
        other => Err(format!("unknown word type `{other}` (noun, verb)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("reading config file")?;
    apply_overrides(&mut config, &cli);
    config.validate();

    if let Err(e) = init_logging(&config.log_filter) {
        eprintln!("logging disabled: {e:#}");
    }
    select_locale(config.base_language);

    if cli.save_config {
        config.save().context("writing config file")?;
    }

    let store = JsonStore::new().context("opening data directory")?;

    if let Some(path) = cli.export.as_deref() {
        store.export_to(&config, path)?;
        println!("Exported progress to {}", path.display());
        return Ok(());
    }
    if let Some(path) = cli.import.as_deref() {
        let data = store.import_from(path)?;
        println!(
            "Imported {} progress records from {}",
            data.progress.records.len(),
            path.display()
        );
        return Ok(());
    }

    let mut app = App::new(config, Some(store))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(lang) = cli.lang {
        config.target_language = lang;
    }
    if let Some(base) = cli.base {
        config.base_language = base;
    }
    if cli.full {
        config.full_conjugation = true;
    }
    if let Some(only) = cli.only {
        config.word_types = vec![only];
    }
    if let Some(words) = cli.words {
        config.session_size = words;
    }
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }
    if cli.no_dead_keys {
        config.dead_keys = false;
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(filter: &str) -> Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wortdrill");
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("wortdrill.log"))?;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn select_locale(base: Language) {
    let locale = match base {
        Language::Norwegian => "no",
        _ => "en",
    };
    rust_i18n::set_locale(locale);
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Paste(text) => app.handle_paste(&text),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
