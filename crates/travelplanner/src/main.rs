//! `tplan` - CLI for travelplanner
//!
//! This binary provides the command-line interface for planning trips and
//! keeping track of errands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use travelplanner::cli::{
    Cli, Command, ConfigCommand, ContactCommand, ErrandCommand, ListFormat, StatusCommand,
    TipCommand, TripCommand,
};
use travelplanner::contact::{ContactForm, ContactValidator};
use travelplanner::forms::{ErrandForm, TripForm};
use travelplanner::notify::Notifier;
use travelplanner::render::{ErrandFilter, ListView, RenderOptions};
use travelplanner::terminal::{PromptConfirm, TerminalSurface};
use travelplanner::{init_logging, tips, Config, Confirm, KeyValueStore, Planner, SqliteStore};

type TerminalPlanner<C> = Planner<TerminalSurface<io::Stdout, io::Stderr>, C>;

/// Delete confirmation for the terminal: `--yes` or an interactive prompt.
#[derive(Debug)]
enum TerminalConfirm {
    AssumeYes,
    Ask(PromptConfirm<io::StdinLock<'static>, io::Stderr>),
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self {
            Self::AssumeYes => true,
            Self::Ask(prompt_confirm) => prompt_confirm.confirm(prompt),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Trip(cmd) => {
            let yes = matches!(cmd, TripCommand::Delete { yes: true, .. });
            with_planner(&config, cli.quiet, yes, |planner| handle_trip(planner, cmd))
        }
        Command::Errand(cmd) => {
            let yes = matches!(cmd, ErrandCommand::Delete { yes: true, .. });
            with_planner(&config, cli.quiet, yes, |planner| handle_errand(planner, cmd))
        }
        Command::Tip(cmd) => handle_tip(&cmd),
        Command::Contact(cmd) => handle_contact(cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> Result<Rc<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path, config.storage.origin.clone())
        .with_context(|| format!("failed to open planner database at {}", path.display()))?;
    Ok(Rc::new(store))
}

/// Build a planner on the configured store and run `f` on it.
///
/// With `assume_yes` every confirmation is accepted; otherwise the user is
/// asked on the terminal.
fn with_planner(
    config: &Config,
    quiet: bool,
    assume_yes: bool,
    f: impl FnOnce(&mut TerminalPlanner<TerminalConfirm>) -> Result<()>,
) -> Result<()> {
    let store: Rc<dyn KeyValueStore> = open_store(config)?;
    let confirm = if assume_yes {
        TerminalConfirm::AssumeYes
    } else {
        TerminalConfirm::Ask(PromptConfirm::new(io::stdin().lock(), io::stderr()))
    };
    let mut planner = Planner::new(store, TerminalSurface::stdio(quiet), confirm)
        .with_render_options(RenderOptions {
            currency_symbol: config.display.currency_symbol.clone(),
        })
        .with_notifier(Notifier::new(config.notification_duration()));
    planner.initialize();
    f(&mut planner)?;
    if planner.has_unsaved_changes() {
        bail!("changes could not be saved to {}", config.database_path().display());
    }
    Ok(())
}

fn handle_trip<C: Confirm>(planner: &mut TerminalPlanner<C>, cmd: TripCommand) -> Result<()> {
    match cmd {
        TripCommand::Add {
            destination,
            start,
            end,
            budget,
            notes,
        } => {
            let form = TripForm {
                destination,
                start_date: start,
                end_date: end,
                budget: budget.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            let id = planner.submit_trip(&form).map_err(not_saved)?;
            println!("{id}");
        }
        TripCommand::Edit {
            id,
            destination,
            start,
            end,
            budget,
            notes,
        } => {
            let Some(mut form) = planner.edit_trip(&id) else {
                bail!("no trip with id {id}");
            };
            overwrite(&mut form.destination, destination);
            overwrite(&mut form.start_date, start);
            overwrite(&mut form.end_date, end);
            overwrite(&mut form.budget, budget);
            overwrite(&mut form.notes, notes);
            planner.submit_trip_edit(&form).map_err(not_saved)?;
        }
        TripCommand::Delete { id, .. } => {
            if planner.trips().find(&id).is_none() {
                bail!("no trip with id {id}");
            }
            planner.delete_trip(&id);
        }
        TripCommand::List { format } => {
            let json = || serde_json::to_string_pretty(planner.trips().records());
            print_list(&planner.trip_view(), format, json)?;
        }
    }
    Ok(())
}

fn handle_errand<C: Confirm>(planner: &mut TerminalPlanner<C>, cmd: ErrandCommand) -> Result<()> {
    match cmd {
        ErrandCommand::Add {
            title,
            priority,
            description,
            due,
        } => {
            let form = ErrandForm {
                title,
                description: description.unwrap_or_default(),
                priority: travelplanner::Priority::from(priority).to_string(),
                due_date: due.unwrap_or_default(),
            };
            let id = planner.submit_errand(&form).map_err(not_saved)?;
            println!("{id}");
        }
        ErrandCommand::Edit {
            id,
            title,
            priority,
            description,
            due,
        } => {
            let Some(mut form) = planner.edit_errand(&id) else {
                bail!("no errand with id {id}");
            };
            overwrite(&mut form.title, title);
            overwrite(
                &mut form.priority,
                priority.map(|p| travelplanner::Priority::from(p).to_string()),
            );
            overwrite(&mut form.description, description);
            overwrite(&mut form.due_date, due);
            planner.submit_errand_edit(&form).map_err(not_saved)?;
        }
        ErrandCommand::Delete { id, .. } => {
            if planner.errands().find(&id).is_none() {
                bail!("no errand with id {id}");
            }
            planner.delete_errand(&id);
        }
        ErrandCommand::Toggle { id } => {
            if planner.toggle_errand(&id).is_none() {
                bail!("no errand with id {id}");
            }
        }
        ErrandCommand::List { filter, format } => {
            let filter = ErrandFilter::from(filter);
            planner.set_errand_filter(filter);
            let json = || serde_json::to_string_pretty(&filter.apply(planner.errands().records()));
            print_list(&planner.errand_view(), format, json)?;
        }
    }
    Ok(())
}

/// Validation failures were already shown by the surface.
fn not_saved(err: travelplanner::Error) -> anyhow::Error {
    if err.is_validation() {
        anyhow!("nothing was saved")
    } else {
        err.into()
    }
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn print_list(
    view: &ListView,
    format: ListFormat,
    json: impl FnOnce() -> serde_json::Result<String>,
) -> Result<()> {
    match format {
        ListFormat::Plain => print!("{}", view.to_plain()),
        ListFormat::Html => println!("{}", view.to_html()),
        ListFormat::Json => println!("{}", json()?),
    }
    Ok(())
}

fn handle_tip(cmd: &TipCommand) -> Result<()> {
    let date = match &cmd.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    println!("{}", tips::tip_for(date));
    Ok(())
}

fn handle_contact(cmd: ContactCommand) -> Result<()> {
    let validator = ContactValidator::new()?;
    let form = ContactForm {
        name: cmd.name,
        email: cmd.email,
        message: cmd.message,
    };
    let errors = validator.validate(&form);
    if errors.is_empty() {
        println!("Thank you for your message! We'll get back to you soon.");
        return Ok(());
    }
    for error in &errors {
        eprintln!("{}: {}", error.field, error.message);
    }
    bail!("contact form has {} invalid field(s)", errors.len())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> Result<()> {
    let store = open_store(config)?;
    let stats = store.stats()?;
    let keys = store.keys()?;
    let dyn_store: Rc<dyn KeyValueStore> = store.clone();
    let planner = Planner::new(dyn_store, TerminalSurface::stdio(true), |_: &str| false);

    let trips = planner.trips().len();
    let errands = planner.errands().len();
    let pending = planner.errands().pending_count();

    if cmd.json {
        let status = serde_json::json!({
            "trips": trips,
            "errands": errands,
            "pending_errands": pending,
            "completed_errands": errands - pending,
            "database_path": store.path(),
            "origin": store.origin(),
            "stored_keys": keys,
            "item_count": stats.item_count,
            "value_bytes": stats.value_bytes,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tplan status");
        println!("------------");
        println!("Trips:         {trips}");
        println!(
            "Errands:       {errands} ({pending} pending, {} completed)",
            errands - pending
        );
        println!("Database:      {}", store.path().display());
        println!("Origin:        {}", store.origin());
        println!("Stored keys:   {}", keys.join(", "));
        println!("Stored bytes:  {}", stats.value_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Origin:             {}", config.storage.origin);
                println!();
                println!("[Display]");
                println!("  Currency symbol:    {}", config.display.currency_symbol);
                println!();
                println!("[Notifications]");
                println!("  Duration (ms):      {}", config.notifications.duration_ms);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
