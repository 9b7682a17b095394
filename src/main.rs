use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::get_styles;
use library_catalog::catalog::{
    load_catalog, save_catalog, summarize, AvailabilityState, AvailabilityUpdate, Catalog, Record,
    RecordUpdate, SearchCriteria,
};
use library_catalog::config::{AppConfig, CliConfig, FileConfig};
use library_catalog::memoize::{memoize, Memoize};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// JSON file with the records to start from.
    #[clap(value_parser = parse_path)]
    pub records: Option<PathBuf>,

    /// TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Where to save the records after a change, defaults to the records file.
    #[clap(long, value_parser = parse_path)]
    pub snapshot: Option<PathBuf>,

    /// Do not save the records after each change.
    #[clap(long)]
    pub no_autosave: bool,

    /// Compare text case-sensitively when searching.
    #[clap(long)]
    pub case_sensitive: bool,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Args, Debug)]
struct RecordFields {
    #[clap(long)]
    title: Option<String>,

    #[clap(long)]
    author: Option<String>,

    #[clap(long)]
    year: Option<i32>,

    #[clap(long)]
    category: Option<String>,

    /// One of: available, checked_out.
    #[clap(long)]
    status: Option<String>,

    #[clap(long)]
    location: Option<String>,

    #[clap(long)]
    due_date: Option<String>,
}

impl RecordFields {
    fn into_update(self) -> Result<RecordUpdate, String> {
        let state = match self.status {
            Some(s) => Some(s.parse::<AvailabilityState>()?),
            None => None,
        };
        let availability = AvailabilityUpdate {
            state,
            location: self.location,
            due_date: self.due_date,
        };
        Ok(RecordUpdate {
            title: self.title,
            author: self.author,
            year: self.year,
            category: self.category,
            availability: (!availability.is_empty()).then_some(availability),
        })
    }
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows how many records are available, checked out or unknown.
    Stats,

    /// Lists every record in catalog order.
    List,

    /// Lists the titles of all records.
    Titles,

    /// Finds records matching all the given criteria.
    /// Title and author match substrings, category must match exactly.
    Search {
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        author: Option<String>,
        #[clap(long)]
        category: Option<String>,
        #[clap(long)]
        case_sensitive: bool,
    },

    /// Lists records grouped by category.
    Groups,

    /// Lists records with the given availability state.
    Status { state: String },

    /// Shows every field of a record.
    Show { id: i64 },

    /// Prints the one-line summary of a record.
    Summary { id: i64 },

    /// Appends a new record.
    Add {
        id: i64,
        #[command(flatten)]
        fields: RecordFields,
    },

    /// Fills the missing fields of a record, present fields are kept.
    Update {
        id: i64,
        #[command(flatten)]
        fields: RecordFields,
    },

    /// Writes the records to the snapshot file.
    Save,

    /// Shows the records and snapshot file paths.
    Where,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = ">> ";

type SummaryCache = Memoize<Record, String, fn(&Record) -> String>;

struct Session {
    catalog: Catalog,
    config: AppConfig,
    summaries: SummaryCache,
}

impl Session {
    fn summary(&self, record: &Record) -> String {
        match self.summaries.call(record) {
            Ok(summary) => summary.as_ref().clone(),
            Err(_) => summarize(record),
        }
    }

    fn after_mutation(&self) -> Result<()> {
        cli_style::print_statistics(&self.catalog.statistics());
        if !self.config.autosave {
            return Ok(());
        }
        if let Some(path) = self.config.snapshot_path.as_ref() {
            save_catalog(&self.catalog, path)?;
        }
        Ok(())
    }
}

fn execute_command(line: String, session: &mut Session) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            match cli.command {
                InnerCommand::Stats => {
                    cli_style::print_section_header("Statistics");
                    cli_style::print_statistics(&session.catalog.statistics());
                    cli_style::print_section_footer();
                }
                InnerCommand::List => {
                    cli_style::print_section_header("Records");
                    cli_style::print_records(session.catalog.records(), |r| session.summary(r));
                    cli_style::print_section_footer();
                }
                InnerCommand::Titles => {
                    cli_style::print_section_header("Titles");
                    for title in session.catalog.title_sequence() {
                        println!("  {}", title.unwrap_or("(untitled)"));
                    }
                    cli_style::print_section_footer();
                }
                InnerCommand::Search {
                    title,
                    author,
                    category,
                    case_sensitive,
                } => {
                    let criteria = SearchCriteria {
                        title,
                        author,
                        category,
                    };
                    let case_sensitive = case_sensitive || session.config.case_sensitive;
                    let found = session.catalog.search(&criteria, case_sensitive);
                    cli_style::print_section_header(&format!("{} matches", found.len()));
                    cli_style::print_records(found, |r| session.summary(r));
                    cli_style::print_section_footer();
                }
                InnerCommand::Groups => {
                    for (category, records) in session.catalog.group_by_category() {
                        cli_style::print_section_header(category.unwrap_or("Uncategorized"));
                        cli_style::print_records(records, |r| session.summary(r));
                        cli_style::print_section_footer();
                    }
                    if session.catalog.is_empty() {
                        cli_style::print_empty("No records.");
                    }
                }
                InnerCommand::Status { state } => {
                    if state.parse::<AvailabilityState>().is_err() {
                        cli_style::print_warning(&format!(
                            "Unknown state \"{}\", valid states are: available, checked_out",
                            state
                        ));
                    }
                    let found = session.catalog.filter_by_status_name(&state);
                    cli_style::print_section_header(&state);
                    cli_style::print_records(found, |r| session.summary(r));
                    cli_style::print_section_footer();
                }
                InnerCommand::Show { id } => match session.catalog.get(id) {
                    Some(record) => println!("{:#?}", record),
                    None => cli_style::print_empty(&format!("No record with id {}.", id)),
                },
                InnerCommand::Summary { id } => match session.catalog.get(id) {
                    Some(record) => println!("{}", session.summary(record)),
                    None => cli_style::print_empty(&format!("No record with id {}.", id)),
                },
                InnerCommand::Add { id, fields } => {
                    let updates = match fields.into_update() {
                        Ok(u) => u,
                        Err(err) => return CommandExecutionResult::Error(err),
                    };
                    if session.catalog.get(id).is_some() {
                        cli_style::print_warning(&format!(
                            "A record with id {} already exists, adding anyway.",
                            id
                        ));
                    }
                    let mut record = Record::new(id);
                    record.merge(&updates);
                    session.catalog.add(vec![record]);
                    cli_style::print_success(&format!("Record {} added.", id));
                    if let Err(err) = session.after_mutation() {
                        return CommandExecutionResult::Error(format!("{:#}", err));
                    }
                }
                InnerCommand::Update { id, fields } => {
                    let updates = match fields.into_update() {
                        Ok(u) => u,
                        Err(err) => return CommandExecutionResult::Error(err),
                    };
                    if !session.catalog.update(id, &updates) {
                        cli_style::print_empty(&format!("No record with id {}.", id));
                        return CommandExecutionResult::Ok;
                    }
                    cli_style::print_success(&format!("Record {} updated.", id));
                    if let Err(err) = session.after_mutation() {
                        return CommandExecutionResult::Error(format!("{:#}", err));
                    }
                }
                InnerCommand::Save => match session.config.snapshot_path.as_ref() {
                    Some(path) => {
                        if let Err(err) = save_catalog(&session.catalog, path) {
                            return CommandExecutionResult::Error(format!("{:#}", err));
                        }
                        cli_style::print_success(&format!("Saved to {}", path.display()));
                    }
                    None => {
                        return CommandExecutionResult::Error(
                            "No snapshot path configured, start with --snapshot.".to_string(),
                        )
                    }
                },
                InnerCommand::Where => {
                    let display = |p: Option<&PathBuf>| {
                        p.map(|p| p.display().to_string())
                            .unwrap_or_else(|| "(none)".to_string())
                    };
                    println!("records:  {}", display(session.config.records_path.as_ref()));
                    println!("snapshot: {}", display(session.config.snapshot_path.as_ref()));
                    println!("autosave: {}", session.config.autosave);
                }
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            }
        }

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandHelper { commands_names }
    }
}

impl CommandHelper {
    /// Start of the word under the cursor and its possible completions.
    /// The first word completes to a command name, the argument of
    /// `status` to an availability state.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        let word = &line[start..];
        let preceding: Vec<&str> = line[..start].split_whitespace().collect();

        let options: Vec<&str> = match preceding.as_slice() {
            [] => self.commands_names.iter().map(String::as_str).collect(),
            ["status"] => [AvailabilityState::Available, AvailabilityState::CheckedOut]
                .iter()
                .map(AvailabilityState::as_str)
                .collect(),
            _ => vec![],
        };
        let matches = options
            .into_iter()
            .filter(|o| o.starts_with(word))
            .map(str::to_owned)
            .collect();
        (start, matches)
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging.")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        records_path: cli_args.records,
        snapshot_path: cli_args.snapshot,
        no_autosave: cli_args.no_autosave,
        case_sensitive: cli_args.case_sensitive,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let catalog = match config.records_path.as_ref() {
        Some(path) => load_catalog(path)?,
        None => {
            info!("No records file given, starting with an empty catalog.");
            Catalog::new()
        }
    };

    let mut session = Session {
        catalog,
        config,
        summaries: memoize(summarize as fn(&Record) -> String),
    };

    InnerCli::command().print_long_help()?;

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(CommandHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line.trim().to_string(), &mut session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    info!("Memoized summaries: {:?}", session.summaries);
    Ok(())
}
