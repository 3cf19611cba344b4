//! # CLI Layer
//!
//! This module is **one possible UI client** for wordchain. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Installs the tracing subscriber
//! - Resolves configuration and the local user identity
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API, user and configuration
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::print::{
    print_card_front, print_entries, print_full_entries, print_lookup, print_messages,
    print_settings, print_stats,
};
use super::setup::{Cli, Commands, CoreCommands, DataCommands, MiscCommands, ReviewCommands};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wordchain::api::{
    ListFilter, NewEntry, ReviewGrade, SettingKey, SettingsAction, WordchainApi,
};
use wordchain::config::{self, WordchainConfig};
use wordchain::error::{Result, WordchainError};
use wordchain::identity;
use wordchain::lookup::DictionaryClient;
use wordchain::model::{PartOfSpeech, UserContext};
use wordchain::store::fs::FileRepository;

struct AppContext {
    api: WordchainApi<FileRepository, DictionaryClient>,
    user: UserContext,
    config: WordchainConfig,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = config::config_dir()?;
    let config = WordchainConfig::load(&config_dir)?;
    init_tracing(&config.log_level, cli.verbose);

    let mut ctx = init_context(config)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Add {
                word,
                definition,
                pronunciation,
                pos,
                offline,
                yes,
            } => {
                let draft = NewEntry {
                    word: word.join(" "),
                    pronunciation,
                    part_of_speech: pos.as_deref().map(parse_pos).transpose()?,
                    definition,
                };
                handle_add(&mut ctx, draft, offline, yes).await
            }
            CoreCommands::Lookup { word, json } => handle_lookup(&ctx, word.join(" "), json).await,
            CoreCommands::List { filter, search } => handle_list(&ctx, filter, search),
            CoreCommands::View { indexes } => handle_view(&ctx, indexes),
        },
        Some(Commands::Review(cmd)) => match cmd {
            ReviewCommands::Due => handle_due(&ctx),
            ReviewCommands::Study { reveal } => handle_study(&mut ctx, reveal),
            ReviewCommands::Pass { indexes } => handle_grade(&mut ctx, indexes, ReviewGrade::Pass),
            ReviewCommands::Fail { indexes } => handle_grade(&mut ctx, indexes, ReviewGrade::Fail),
            ReviewCommands::Postpone { indexes } => handle_postpone(&mut ctx, indexes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Delete { indexes } => handle_delete(&mut ctx, indexes),
            DataCommands::Stats => handle_stats(&ctx),
            DataCommands::Export { file } => handle_export(&ctx, file),
            DataCommands::Restore { file } => handle_restore(&mut ctx, file),
            DataCommands::Clear { yes } => handle_clear(&mut ctx, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Settings { key, value } => handle_settings(&mut ctx, key, value),
            MiscCommands::Config { template } => handle_config(&ctx, template),
        },
        None => handle_due(&ctx),
    }
}

fn init_tracing(config_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    // A subscriber may already be set when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(config: WordchainConfig) -> Result<AppContext> {
    let data_dir = config.data_dir()?;
    let mut user = identity::resolve(&data_dir, config.user_id.as_deref())?;

    let repo = FileRepository::new(&data_dir);
    let client = DictionaryClient::from_config(&config.lookup)?;
    let mut api = WordchainApi::new(repo, client);

    let settings = api.settings(&user, SettingsAction::Show)?.settings;
    if let Some(name) = settings.and_then(|s| s.user_name) {
        user = user.with_name(name);
    }
    tracing::debug!(user = %user.id, data_dir = %data_dir.display(), "context ready");

    Ok(AppContext { api, user, config })
}

fn parse_pos(raw: &str) -> Result<PartOfSpeech> {
    raw.parse().map_err(WordchainError::Api)
}

async fn handle_add(ctx: &mut AppContext, draft: NewEntry, offline: bool, yes: bool) -> Result<()> {
    let word = draft.word.trim().to_string();
    let mut draft = draft;

    if !offline {
        match ctx.api.lookup(&ctx.user, &word).await {
            Ok(found) => {
                print_lookup(&word, &found);
                let missing = found.missing_fields();
                if !missing.is_empty() {
                    let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                    eprintln!(
                        "{}",
                        format!("Dictionary did not provide: {}", names.join(", ")).yellow()
                    );
                }
                draft = draft.fill_from(&found);
            }
            Err(e) => {
                eprintln!("{}", format!("Lookup failed: {}", e).yellow());
                if draft.definition.is_none() {
                    eprintln!(
                        "{}",
                        "Enter the entry manually with --definition (and optionally --pronunciation, --pos)."
                            .dimmed()
                    );
                }
            }
        }
    }

    if !yes && !confirm(&format!("Add '{}'?", word))? {
        println!("Nothing added.");
        return Ok(());
    }

    let result = ctx.api.add_entry(&ctx.user, draft)?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_lookup(ctx: &AppContext, word: String, json: bool) -> Result<()> {
    if json {
        let response = ctx.api.lookup_response(&ctx.user, &word).await;
        let out = serde_json::to_string_pretty(&response).map_err(WordchainError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    let found = ctx.api.lookup(&ctx.user, &word).await?;
    print_lookup(word.trim(), &found);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: String, search: Option<String>) -> Result<()> {
    let filter: ListFilter = filter.parse().map_err(WordchainError::Api)?;
    let result = ctx
        .api
        .list_entries(&ctx.user, filter, search.as_deref())?;
    print_entries(&result.listed_entries, ctx.api.today());
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_entries(&ctx.user, &indexes)?;
    print_full_entries(&result.listed_entries, ctx.api.today());
    Ok(())
}

fn handle_due(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.due_entries(&ctx.user)?;
    if !result.listed_entries.is_empty() {
        print_entries(&result.listed_entries, ctx.api.today());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_grade(ctx: &mut AppContext, indexes: Vec<String>, grade: ReviewGrade) -> Result<()> {
    let result = ctx.api.grade_entries(&ctx.user, &indexes, grade)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_postpone(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.postpone_entries(&ctx.user, &indexes)?;
    print_messages(&result.messages);
    Ok(())
}

/// Walks the due queue one card at a time.
///
/// Each card shows the word first; the definition is revealed on Enter unless
/// meanings are not hidden. Answers: p(ass), f(ail), t(omorrow), s(kip), q(uit).
fn handle_study(ctx: &mut AppContext, reveal: bool) -> Result<()> {
    let due = ctx.api.due_entries(&ctx.user)?;
    if due.listed_entries.is_empty() {
        print_messages(&due.messages);
        return Ok(());
    }
    let queue = due.listed_entries;

    let hide = !reveal
        && ctx
            .api
            .settings(&ctx.user, SettingsAction::Show)?
            .settings
            .map(|s| s.hide_meanings_by_default)
            .unwrap_or(true);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = queue.len();
    let mut graded = 0;

    for (n, de) in queue.into_iter().enumerate() {
        println!();
        println!("{}", format!("[{}/{}]", n + 1, total).dimmed());
        print_card_front(de.index, &de.entry);

        if hide {
            prompt("(Enter to reveal) ")?;
            if lines.next().transpose()?.is_none() {
                break;
            }
        }
        println!("{}", de.entry.definition);

        let action = loop {
            prompt("[p]ass [f]ail [t]omorrow [s]kip [q]uit: ")?;
            let Some(line) = lines.next().transpose()? else {
                break "q".to_string();
            };
            let answer = line.trim().to_lowercase();
            if matches!(answer.as_str(), "p" | "f" | "t" | "s" | "q") {
                break answer;
            }
        };

        let result = match action.as_str() {
            "p" => ctx.api.grade_entry(&ctx.user, de.entry.id, ReviewGrade::Pass)?,
            "f" => ctx.api.grade_entry(&ctx.user, de.entry.id, ReviewGrade::Fail)?,
            "t" => ctx
                .api
                .postpone_entries(&ctx.user, &[de.index.to_string()])?,
            "s" => continue,
            _ => break,
        };
        graded += 1;
        print_messages(&result.messages);
    }

    println!();
    println!("{}", format!("Reviewed {} of {} due entries.", graded, total).bold());
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_entries(&ctx.user, &indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats(&ctx.user)?;
    if let Some(stats) = result.stats {
        print_stats(&stats);
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, file: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_backup(&ctx.user)?;
    let Some(backup) = result.backup else {
        return Err(WordchainError::Api("Nothing to export".to_string()));
    };
    let json = backup.to_json()?;

    match file {
        Some(path) => {
            std::fs::write(&path, json).map_err(WordchainError::Io)?;
            print_messages(&result.messages);
            println!("{}", path.display().to_string().dimmed());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, file: PathBuf) -> Result<()> {
    let json = std::fs::read_to_string(&file).map_err(WordchainError::Io)?;
    let result = ctx.api.restore_backup(&ctx.user, &json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete all entries and settings?")? {
        println!("Nothing deleted.");
        return Ok(());
    }
    let result = ctx.api.clear(&ctx.user)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => SettingsAction::Show,
        (Some(key), Some(value)) => {
            let key: SettingKey = key.parse().map_err(WordchainError::Api)?;
            SettingsAction::Set(key, value)
        }
        (Some(key), None) => {
            return Err(WordchainError::Api(format!("Missing value for {}", key)));
        }
    };

    let result = ctx.api.settings(&ctx.user, action)?;
    print_messages(&result.messages);
    if result.messages.is_empty() {
        if let Some(settings) = &result.settings {
            print_settings(settings);
        }
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, template: bool) -> Result<()> {
    if template {
        print!("{}", WordchainConfig::template());
        return Ok(());
    }

    let data_dir = ctx.config.data_dir()?;
    println!(
        "{} = {} ({})",
        "user".dimmed(),
        ctx.user.id,
        ctx.user.display_name()
    );
    println!("{} = {}", "data_dir".dimmed(), data_dir.display());
    println!("{} = {}", "log_level".dimmed(), ctx.config.log_level);
    println!("{} = {}", "lookup.url_template".dimmed(), ctx.config.lookup.url_template);
    println!("{} = {}", "lookup.timeout_secs".dimmed(), ctx.config.lookup.timeout_secs);
    println!("{} = {}", "lookup.max_redirects".dimmed(), ctx.config.lookup.max_redirects);
    println!("{} = {}", "lookup.user_agent".dimmed(), ctx.config.lookup.user_agent);
    match &ctx.config.lookup.rules_file {
        Some(path) => println!("{} = {}", "lookup.rules_file".dimmed(), path.display()),
        None => println!("{} = {}", "lookup.rules_file".dimmed(), "(built-in)"),
    }
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush().map_err(WordchainError::Io)
}

/// Asks a yes/no question on a terminal. Non-interactive input counts as yes.
fn confirm(question: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(true);
    }
    prompt(&format!("{} [Y/n] ", question))?;
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(WordchainError::Io)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}
