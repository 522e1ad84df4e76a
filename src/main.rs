use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use waste_forecast_rs::cli::{Cli, Command};
use waste_forecast_rs::engine::{
    Clock, FixedClock, ForecastPolicy, ItemRegistry, SystemClock, WasteEngine, WasteQuery,
    parse_date,
};
use waste_forecast_rs::error::Result;
use waste_forecast_rs::interface::{
    collect_waste_entry, display_dashboard, display_items, display_plan, display_waste_page,
    prompt_yes_no, to_json, write_dashboard_csv, write_plan_csv,
};
use waste_forecast_rs::models::{Item, Unit, View};
use waste_forecast_rs::state::{
    KitchenStore, load_policy, load_store, save_policy, save_store,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let today = match &cli.today {
        Some(s) => parse_date(s)?,
        None => SystemClock.today(),
    };

    let policy = match &cli.policy {
        Some(path) => load_policy(path)?,
        None => ForecastPolicy::default(),
    };

    match command {
        Command::Dashboard {
            view,
            anchor,
            json,
            csv,
        } => cmd_dashboard(&cli.file, today, &view, anchor.as_deref(), json, csv),
        Command::Plan { target, json, csv } => {
            cmd_plan(&cli.file, today, policy, target.as_deref(), json, csv)
        }
        Command::Items { active_only } => cmd_items(&cli.file, active_only),
        Command::AddItem { name, unit } => cmd_add_item(&cli.file, &name, &unit),
        Command::UpdateItem {
            id,
            name,
            unit,
            active,
        } => cmd_update_item(&cli.file, id, name.as_deref(), unit.as_deref(), active),
        Command::SetActive { id, active } => cmd_set_active(&cli.file, id, active),
        Command::Log => cmd_log(&cli.file, today),
        Command::Waste {
            from,
            to,
            item,
            limit,
            offset,
        } => cmd_waste(&cli.file, from.as_deref(), to.as_deref(), item, limit, offset),
        Command::WritePolicy { path } => {
            save_policy(&path, &policy)?;
            println!("Policy written to {}", path.display());
            Ok(())
        }
    }
}

/// Show the waste dashboard.
fn cmd_dashboard(
    file: &Path,
    today: NaiveDate,
    view: &str,
    anchor: Option<&str>,
    json: bool,
    csv: Option<PathBuf>,
) -> Result<()> {
    // Reject bad input before touching the store
    let view: View = view.parse()?;
    let anchor = anchor.map(parse_date).transpose()?;

    let store = load_store(file)?;
    let engine = WasteEngine::new(&store, &store, FixedClock(today));
    let result = engine.get_dashboard(view, anchor)?;

    if json {
        println!("{}", to_json(&result)?);
    } else {
        display_dashboard(&result);
    }

    if let Some(path) = csv {
        write_dashboard_csv(&result, &path)?;
        eprintln!("Wrote dashboard to {}", path.display());
    }

    Ok(())
}

/// Recommend cook quantities.
fn cmd_plan(
    file: &Path,
    today: NaiveDate,
    policy: ForecastPolicy,
    target: Option<&str>,
    json: bool,
    csv: Option<PathBuf>,
) -> Result<()> {
    let store = load_store(file)?;
    let engine = WasteEngine::new(&store, &store, FixedClock(today)).with_policy(policy)?;
    let result = engine.tomorrow_plan_from_params(target)?;

    if json {
        println!("{}", to_json(&result)?);
    } else {
        display_plan(&result, engine.policy().waste_ratio);
    }

    if let Some(path) = csv {
        write_plan_csv(&result, &path)?;
        eprintln!("Wrote plan to {}", path.display());
    }

    Ok(())
}

/// List registered items.
fn cmd_items(file: &Path, active_only: bool) -> Result<()> {
    let store = load_store(file)?;
    let items = store.list_items(!active_only)?;
    display_items(&items);
    Ok(())
}

/// Register a new item.
fn cmd_add_item(file: &Path, name: &str, unit: &str) -> Result<()> {
    let unit: Unit = unit.parse()?;
    let mut store = load_store(file)?;
    let id = store.add_item(name, unit, true)?;
    save_store(file, &store)?;
    println!("Added item #{} ({}).", id, unit);
    Ok(())
}

/// Change an item's name, unit or active flag.
fn cmd_update_item(
    file: &Path,
    id: u32,
    name: Option<&str>,
    unit: Option<&str>,
    active: Option<bool>,
) -> Result<()> {
    let unit = unit.map(str::parse::<Unit>).transpose()?;
    let mut store = load_store(file)?;
    store.patch_item(id, name, unit, active)?;
    save_store(file, &store)?;

    if let Some(item) = store.get_item(id) {
        let state = if item.active { "active" } else { "inactive" };
        println!("Item #{}: {} ({}), {}.", id, item.name, item.unit, state);
    }
    Ok(())
}

/// Activate or deactivate an item.
fn cmd_set_active(file: &Path, id: u32, active: bool) -> Result<()> {
    let mut store = load_store(file)?;
    store.set_item_active(id, active)?;
    save_store(file, &store)?;
    let state = if active { "active" } else { "inactive" };
    println!("Item #{} is now {}.", id, state);
    Ok(())
}

/// Record waste entries interactively.
fn cmd_log(file: &Path, today: NaiveDate) -> Result<()> {
    let mut store: KitchenStore = load_store(file)?;
    let items = store.list_items(false)?;

    if items.is_empty() {
        println!("No active items. Use 'add-item' first.");
        return Ok(());
    }

    let mut recorded = 0;
    let outcome = log_entries(&mut store, &items, today, &mut recorded);

    // Keep whatever was entered before a prompt failed
    if recorded > 0 {
        save_store(file, &store)?;
        println!("Recorded {} entries. State saved.", recorded);
    }

    outcome
}

fn log_entries(
    store: &mut KitchenStore,
    items: &[Item],
    today: NaiveDate,
    recorded: &mut usize,
) -> Result<()> {
    while let Some(entry) = collect_waste_entry(items, today)? {
        store.record_waste(entry)?;
        *recorded += 1;

        if !prompt_yes_no("Log another entry?", true)? {
            break;
        }
    }
    Ok(())
}

/// List waste records, newest first.
fn cmd_waste(
    file: &Path,
    from: Option<&str>,
    to: Option<&str>,
    item: Option<u32>,
    limit: usize,
    offset: usize,
) -> Result<()> {
    let store = load_store(file)?;
    let query = WasteQuery {
        start_date: from.map(parse_date).transpose()?,
        end_date: to.map(parse_date).transpose()?,
        item_id: item,
    };

    let (rows, total) = store.page_waste(&query, limit, offset)?;
    display_waste_page(&rows, total, offset, store.items());
    Ok(())
}
