use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::Stylize;
use library_catalog::catalog::{AvailabilityState, Record, Statistics};
use unicode_width::UnicodeWidthStr;

const SECTION_WIDTH: usize = 64;

pub fn get_styles() -> Styles {
    let accent = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let failure = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));
    clap::builder::Styles::styled()
        .usage(accent.underline())
        .header(accent.underline())
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(failure)
        .error(failure)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

pub mod colors {
    use crossterm::style::Color;

    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 191,
        b: 0,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 120,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const PAPER: Color = Color::Rgb {
        r: 245,
        g: 240,
        b: 225,
    };
}

pub fn print_success(message: &str) {
    println!(" {} {}", "✓".with(colors::GREEN).bold(), message.with(colors::GREEN));
}

pub fn print_error(message: &str) {
    eprintln!(" {} {}", "✗".with(colors::RED).bold(), message.with(colors::RED));
}

pub fn print_warning(message: &str) {
    println!(" {} {}", "⚠".with(colors::AMBER).bold(), message.with(colors::AMBER));
}

pub fn print_section_header(title: &str) {
    let title_width = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_width + 2) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_width + 2 + left);
    println!();
    println!(
        "{}{} {} {}{}",
        "╭".with(colors::AMBER),
        "─".repeat(left).with(colors::AMBER),
        title.with(colors::AMBER).bold(),
        "─".repeat(right).with(colors::AMBER),
        "╮".with(colors::AMBER),
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        "╰".with(colors::AMBER),
        "─".repeat(SECTION_WIDTH).with(colors::AMBER),
        "╯".with(colors::AMBER),
    );
}

pub fn print_empty(message: &str) {
    println!("  {} {}", "○".with(colors::DIM), message.with(colors::DIM));
}

fn status_marker(record: &Record) -> String {
    match record.state() {
        Some(AvailabilityState::Available) => "●".with(colors::GREEN).to_string(),
        Some(AvailabilityState::CheckedOut) => "●".with(colors::RED).to_string(),
        None => "○".with(colors::DIM).to_string(),
    }
}

/// A record's summary line, prefixed by its id and a coloured status dot.
pub fn print_record(record: &Record, summary: &str) {
    println!(
        "  {} {} {}",
        status_marker(record),
        format!("#{:<5}", record.id).with(colors::DIM),
        summary.with(colors::PAPER)
    );
}

pub fn print_records<'a, I>(records: I, summarize: impl Fn(&Record) -> String)
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut any = false;
    for record in records {
        any = true;
        print_record(record, &summarize(record));
    }
    if !any {
        print_empty("No records.");
    }
}

pub fn print_statistics(stats: &Statistics) {
    println!(
        "  {} {}   {} {}   {} {}   {} {}",
        "Total".with(colors::DIM),
        stats.total.to_string().bold(),
        "Available".with(colors::GREEN),
        stats.available.to_string().bold(),
        "Checked out".with(colors::RED),
        stats.checked_out.to_string().bold(),
        "Unknown".with(colors::DIM),
        stats.unknown().to_string().bold(),
    );
}
