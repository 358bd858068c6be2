//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use internlink_cache::FileCache;
use internlink_engine::{ListSnapshot, ListingEngine};
use internlink_model::{ApplyAction, HospitalRecord, states};
use internlink_store::RestHospitalStore;

use crate::cli::{Cli, IdArgs, ListArgs, ShowArgs};

/// Backend used when neither --base-url nor INTERNLINK_API_URL is set.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

type Engine = ListingEngine<RestHospitalStore, FileCache>;

pub async fn run_list(cli: &Cli, args: &ListArgs) -> Result<()> {
    let mut engine = build_engine(cli)?;
    engine.load_initial().await;

    if !args.offline {
        let snapshot = engine.refresh().await;
        warn_on_error(&snapshot);
    }

    if let Some(search) = &args.search {
        engine.set_search_query(search.clone());
    }
    if let Some(profession) = &args.profession {
        engine.set_profession_filter(profession.clone());
    }
    if let Some(state) = &args.state {
        engine.set_state_filter(state.clone());
    }
    if let Some(salary) = &args.salary {
        engine.set_salary_range_filter(salary.clone());
    }

    let snapshot = engine.snapshot();
    if snapshot.filtered_hospitals.is_empty() {
        println!("No postings match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Id", "Name", "State", "Professions", "Salary", "Deadline", "Apply",
    ]);
    apply_table_style(&mut table);
    for hospital in &snapshot.filtered_hospitals {
        table.add_row(vec![
            hospital.id.clone(),
            hospital.name.clone(),
            hospital.state.clone(),
            hospital.professions_text(),
            hospital.salary_range.clone(),
            hospital.deadline.clone(),
            describe_action(&hospital.apply_action()).to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} postings",
        snapshot.filtered_hospitals.len(),
        snapshot.hospitals.len()
    );
    Ok(())
}

pub async fn run_show(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let mut engine = build_engine(cli)?;
    engine.load_initial().await;

    if !args.offline {
        let snapshot = engine.refresh().await;
        warn_on_error(&snapshot);
    }

    let snapshot = engine.snapshot();
    let Some(hospital) = snapshot.hospitals.iter().find(|h| h.id == args.id) else {
        bail!("no posting with id '{}'", args.id);
    };

    print_detail(hospital, &snapshot);
    Ok(())
}

pub async fn run_apply(cli: &Cli, args: &IdArgs, applied: bool) -> Result<()> {
    let mut engine = build_engine(cli)?;
    engine.load_initial().await;

    let snapshot = if applied {
        engine.mark_applied(&args.id).await
    } else {
        engine.unmark_applied(&args.id).await
    };

    if let Some(error) = snapshot.error {
        bail!("{error}");
    }
    if applied {
        println!("Marked '{}' as applied.", args.id);
    } else {
        println!("Removed the applied mark from '{}'.", args.id);
    }
    Ok(())
}

pub async fn run_applied(cli: &Cli) -> Result<()> {
    let mut engine = build_engine(cli)?;
    let snapshot = engine.load_initial().await;

    if snapshot.applied_hospitals.is_empty() {
        println!("You have not marked any postings as applied.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "State", "Deadline"]);
    apply_table_style(&mut table);
    for hospital in &snapshot.applied_hospitals {
        table.add_row(vec![
            hospital.id.clone(),
            hospital.name.clone(),
            hospital.state.clone(),
            hospital.deadline.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn run_professions(cli: &Cli) -> Result<()> {
    let mut engine = build_engine(cli)?;
    let snapshot = engine.load_initial().await;

    let professions = engine.available_professions();
    if professions.is_empty() {
        println!("No cached postings yet. Run 'internlink list' first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Profession", "Postings"]);
    apply_table_style(&mut table);
    for profession in professions {
        let count = snapshot
            .hospitals
            .iter()
            .filter(|h| h.professions.iter().any(|p| p.trim() == profession))
            .count();
        table.add_row(vec![profession, count.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub async fn run_states(cli: &Cli) -> Result<()> {
    let mut engine = build_engine(cli)?;
    let snapshot = engine.load_initial().await;

    let mut table = Table::new();
    table.set_header(vec!["State", "Cached postings"]);
    apply_table_style(&mut table);
    for state in states::NIGERIAN_STATES {
        let count = snapshot
            .hospitals
            .iter()
            .filter(|h| h.state == state)
            .count();
        table.add_row(vec![state.to_string(), count.to_string()]);
    }
    println!("{table}");
    Ok(())
}

// =============================================================================
// WIRING
// =============================================================================

fn build_engine(cli: &Cli) -> Result<Engine> {
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("INTERNLINK_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let store =
        RestHospitalStore::new(base_url.as_str()).context("failed to build the backend client")?;
    let cache_path = cache_path(cli)?;
    debug!(%base_url, cache = %cache_path.display(), "engine configured");
    Ok(ListingEngine::new(store, FileCache::new(cache_path)))
}

fn cache_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.cache_dir {
        return Ok(dir.join("hospitals.ilc"));
    }
    let dirs = directories::ProjectDirs::from("ng", "InternLink", "internlink")
        .context("could not determine a cache directory; pass --cache-dir")?;
    Ok(dirs.cache_dir().join("hospitals.ilc"))
}

fn warn_on_error(snapshot: &ListSnapshot) {
    if let Some(error) = &snapshot.error {
        eprintln!("warning: {error} (showing cached data)");
    }
}

fn describe_action(action: &ApplyAction) -> &'static str {
    match action {
        ApplyAction::Online { url: Some(_) } => "Online",
        ApplyAction::Online { url: None } => "Online (link unavailable)",
        ApplyAction::InPerson { address: Some(_) } => "In person",
        ApplyAction::InPerson { address: None } => "In person (no address)",
    }
}

fn print_detail(hospital: &HospitalRecord, snapshot: &ListSnapshot) {
    println!("{}", hospital.name);
    println!("  Id:          {}", hospital.id);
    println!("  State:       {}", hospital.state);
    println!("  Professions: {}", hospital.professions_text());
    println!("  Salary:      {}", hospital.salary_range);
    println!("  Deadline:    {}", hospital.deadline);
    if let Some(salaries) = &hospital.profession_salaries {
        println!("  Per profession:");
        for (profession, salary) in salaries {
            println!("    {profession}: {salary}");
        }
    }
    match hospital.apply_action() {
        ApplyAction::Online { url: Some(url) } => println!("  Apply online: {url}"),
        ApplyAction::Online { url: None } => {
            println!("  Apply online (no link on file yet)");
        }
        ApplyAction::InPerson {
            address: Some(address),
        } => println!("  Apply in person: {address}"),
        ApplyAction::InPerson { address: None } => {
            println!("  Apply in person (no address on file yet)");
        }
    }
    let applied = snapshot.applied_hospitals.iter().any(|h| h.id == hospital.id);
    if applied {
        println!("  You have marked this posting as applied.");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
