use chrono::{Local, NaiveDate, NaiveTime};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use wordchain::api::{CmdMessage, MessageLevel};
use wordchain::commands::stats::Stats;
use wordchain::index::DisplayEntry;
use wordchain::lookup::LookupResult;
use wordchain::model::{Settings, Stage, VocabularyEntry};

const LINE_WIDTH: usize = 100;
const WORD_WIDTH: usize = 18;
const STAGE_WIDTH: usize = 14;
const DUE_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_entries(entries: &[DisplayEntry], today: NaiveDate) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    for de in entries {
        let idx_str = format!("{:>4}. ", de.index);
        let word = pad_to_width(&truncate_to_width(&de.entry.word, WORD_WIDTH), WORD_WIDTH);
        let stage = format!("{:<width$}", de.entry.stage.label(), width = STAGE_WIDTH);
        let due = format!("{:>width$}", format_due(de.entry.next_due, today), width = DUE_WIDTH);

        let fixed = idx_str.width() + WORD_WIDTH + STAGE_WIDTH + DUE_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let definition = truncate_to_width(&single_line(&de.entry.definition), available);
        let padding = available.saturating_sub(definition.width());

        let due_colored = if de.entry.is_due(today) {
            due.yellow()
        } else {
            due.dimmed()
        };

        println!(
            "{}{} {}{}{} {}",
            idx_str,
            word.bold(),
            stage_colored(de.entry.stage, &stage),
            definition,
            " ".repeat(padding),
            due_colored
        );
    }
}

pub(super) fn print_full_entries(entries: &[DisplayEntry], today: NaiveDate) {
    for (i, de) in entries.iter().enumerate() {
        if i > 0 {
            println!("\n--------------------------------\n");
        }
        print_card_front(de.index, &de.entry);
        println!("{}", de.entry.definition);
        println!();
        println!(
            "{} {}  {} {}",
            "stage:".dimmed(),
            stage_colored(de.entry.stage, de.entry.stage.label()),
            "next review:".dimmed(),
            format_due(de.entry.next_due, today)
        );
        if let Some(tested) = de.entry.last_tested {
            println!("{} {}", "last tested:".dimmed(), format_day_ago(tested));
        }
        if let Some(added) = de.entry.added_on {
            println!("{} {}", "added:".dimmed(), format_day_ago(added));
        }
    }
}

/// Word, pronunciation and part of speech; the side shown before the answer.
pub(super) fn print_card_front(index: usize, entry: &VocabularyEntry) {
    let mut header = format!("{} {}", format!("{}.", index).yellow(), entry.word.bold());
    if !entry.pronunciation.is_empty() {
        header.push_str(&format!("  {}", strip_tags(&entry.pronunciation).cyan()));
    }
    if let Some(pos) = entry.part_of_speech {
        header.push_str(&format!("  {}", pos.as_str().italic().dimmed()));
    }
    println!("{}", header);
}

pub(super) fn print_lookup(word: &str, result: &LookupResult) {
    println!("{} {}", word.bold(), format!("({})", result.source).dimmed());
    let pronunciation = strip_tags(&result.pronunciation);
    let fields = [
        ("pronunciation", pronunciation.as_str()),
        (
            "part of speech",
            result.part_of_speech.map(|p| p.as_str()).unwrap_or(""),
        ),
        ("definition", result.definition.as_str()),
    ];
    for (label, value) in fields {
        let value = if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value.to_string()
        };
        println!("  {:<16}{}", format!("{}:", label).dimmed(), value);
    }
}

pub(super) fn print_stats(stats: &Stats) {
    println!("{:<16}{}", "Total", stats.total.to_string().bold());
    println!("{:<16}{}", "Due today", stats.due.to_string().yellow());
    println!("{:<16}{}", "New", stats.new);
    println!("{:<16}{}", "Consolidating", stats.consolidating);
    println!("{:<16}{}", "Long-term", stats.long_term.to_string().green());
    println!("{:<16}{:.0}%", "Mastery", stats.mastery() * 100.0);
}

pub(super) fn print_settings(settings: &Settings) {
    println!(
        "hide-meanings = {}",
        settings.hide_meanings_by_default.to_string().yellow()
    );
    println!(
        "user-name = {}",
        settings
            .user_name
            .as_deref()
            .unwrap_or("(not set)")
            .yellow()
    );
}

fn stage_colored(stage: Stage, text: &str) -> colored::ColoredString {
    match stage {
        Stage::New => text.blue(),
        Stage::Consolidating => text.yellow(),
        Stage::LongTerm => text.green(),
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops markup tags for terminal display; stressed syllables are already uppercase.
pub(super) fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn format_due(next_due: NaiveDate, today: NaiveDate) -> String {
    let days = (next_due - today).num_days();
    match days {
        d if d < 0 => format!("overdue {}d", -d),
        0 => "due today".to_string(),
        1 => "tomorrow".to_string(),
        d => format!("in {}d", d),
    }
}

fn format_day_ago(date: NaiveDate) -> String {
    let midnight = date.and_time(NaiveTime::MIN);
    let now = Local::now().naive_local();
    let elapsed = now.signed_duration_since(midnight);

    let mut formatter = Formatter::new();
    formatter.num_items(1);
    format!(
        "{} ({})",
        date,
        formatter.convert(elapsed.to_std().unwrap_or_default())
    )
}
