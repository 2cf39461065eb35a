use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use numera_core::{
    Date, LetterSystem, auspicious_dates, compatibility, compute_analysis, current_challenge,
    current_life_period, current_pinnacle, level_description, number_title, personal_day,
    personal_month, personal_year, relationship_number, universal_day, universal_month,
    universal_year,
};
use numera_store::{AnalysisRecord, Profile, Store};

#[derive(Parser)]
#[command(name = "numera", about = "Numerology profiles, analyses, and compatibility")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a profile
    Add {
        /// First name
        first_name: String,

        /// Last name
        last_name: String,

        /// Birth date (YYYY-MM-DD)
        birth_date: Date,

        /// Middle name
        #[arg(long)]
        middle: Option<String>,

        /// Mark this profile as the primary one
        #[arg(long)]
        primary: bool,
    },

    /// List all profiles
    List,

    /// Remove a profile and its cached results
    Remove {
        /// Profile id
        id: i64,
    },

    /// Compute (and cache) the full analysis for a profile
    Analysis {
        /// Profile id (defaults to the primary profile)
        id: Option<i64>,

        /// Letter system: pythagorean or chaldean
        #[arg(long, default_value = "pythagorean")]
        system: String,
    },

    /// Show personal and universal cycles for a profile
    Cycles {
        /// Profile id (defaults to the primary profile)
        id: Option<i64>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<Date>,
    },

    /// Compatibility between two profiles
    Compat {
        /// First profile id
        id1: i64,

        /// Second profile id
        id2: i64,

        /// Letter system: pythagorean or chaldean
        #[arg(long, default_value = "pythagorean")]
        system: String,
    },

    /// Auspicious dates for a pair of profiles in a year
    Dates {
        /// First profile id
        id1: i64,

        /// Second profile id
        id2: i64,

        /// Year to scan (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Export all profiles to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import profiles from a JSON file
    Import {
        /// Input file path
        path: PathBuf,
    },
}

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NUMERA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".numera")
}

fn open_store() -> Result<Store> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Store::open(&dir.join("numera.db")).context("failed to open database")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Add {
            first_name,
            last_name,
            birth_date,
            middle,
            primary,
        } => cmd_add(first_name, middle.as_deref(), last_name, *birth_date, *primary),
        Commands::List => cmd_list(),
        Commands::Remove { id } => cmd_remove(*id),
        Commands::Analysis { id, system } => cmd_analysis(*id, system),
        Commands::Cycles { id, date } => cmd_cycles(*id, *date),
        Commands::Compat { id1, id2, system } => cmd_compat(*id1, *id2, system),
        Commands::Dates { id1, id2, year } => cmd_dates(*id1, *id2, *year),
        Commands::Export { path } => cmd_export(path),
        Commands::Import { path } => cmd_import(path),
    }
}

fn today() -> Date {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Date::from_unix_secs(secs)
}

fn parse_system(s: &str) -> Result<LetterSystem> {
    LetterSystem::parse(s)
        .ok_or_else(|| anyhow::anyhow!("unknown system '{s}': expected pythagorean or chaldean"))
}

fn get_profile(store: &Store, id: i64) -> Result<Profile> {
    store
        .get_profile(id)?
        .with_context(|| format!("no profile with id {id}"))
}

/// Resolve an explicit id, falling back to the primary profile.
fn resolve_profile(store: &Store, id: Option<i64>) -> Result<Profile> {
    match id {
        Some(id) => get_profile(store, id),
        None => match store.primary_profile()? {
            Some(profile) => Ok(profile),
            None => bail!("no profile id given and no primary profile set"),
        },
    }
}

fn cmd_add(
    first_name: &str,
    middle: Option<&str>,
    last_name: &str,
    birth_date: Date,
    primary: bool,
) -> Result<()> {
    let store = open_store()?;
    let id = store
        .add_profile(first_name, middle, last_name, birth_date, primary)
        .context("failed to add profile")?;

    println!("added profile {id}: {first_name} {last_name} ({birth_date})");
    Ok(())
}

fn cmd_list() -> Result<()> {
    let store = open_store()?;
    let profiles = store.list_profiles().context("failed to list profiles")?;

    if profiles.is_empty() {
        println!("(no profiles)");
        return Ok(());
    }

    for p in &profiles {
        let marker = if p.is_primary { " *" } else { "" };
        println!("{:>4}  {}  {}{marker}", p.id, p.birth_date, p.display_name());
    }
    Ok(())
}

fn cmd_remove(id: i64) -> Result<()> {
    let store = open_store()?;
    if store.remove_profile(id).context("failed to remove profile")? {
        println!("removed profile {id}");
    } else {
        bail!("no profile with id {id}");
    }
    Ok(())
}

fn cmd_analysis(id: Option<i64>, system: &str) -> Result<()> {
    let system = parse_system(system)?;
    let store = open_store()?;
    let profile = resolve_profile(&store, id)?;

    let record = match store.load_analysis(profile.id, system)? {
        Some(record) => record,
        None => {
            let analysis = compute_analysis(
                &profile.full_name(),
                &profile.first_name,
                profile.birth_date,
                system,
            );
            store
                .save_analysis(profile.id, &analysis)
                .context("failed to cache analysis")?;
            store
                .load_analysis(profile.id, system)?
                .context("analysis vanished after save")?
        }
    };

    print_analysis(&profile, &record);
    Ok(())
}

fn master_mark(is_master: bool) -> &'static str {
    if is_master { " (master)" } else { "" }
}

fn debt_mark(debt: Option<u32>) -> String {
    match debt {
        Some(d) => format!(" [karmic debt {d}]"),
        None => String::new(),
    }
}

fn print_analysis(profile: &Profile, r: &AnalysisRecord) {
    println!("{} (born {})", profile.full_name(), profile.birth_date);
    println!("system: {}", r.system.as_str());
    println!();
    println!(
        "life path:         {}  {}{}{}",
        r.life_path,
        number_title(r.life_path),
        master_mark(r.life_path_master),
        debt_mark(r.life_path_karmic_debt),
    );
    println!(
        "expression:        {}  {}{}{}",
        r.expression,
        number_title(r.expression),
        master_mark(r.expression_master),
        debt_mark(r.expression_karmic_debt),
    );
    println!(
        "soul urge:         {}  {}{}{}",
        r.soul_urge,
        number_title(r.soul_urge),
        master_mark(r.soul_urge_master),
        debt_mark(r.soul_urge_karmic_debt),
    );
    println!(
        "personality:       {}  {}{}{}",
        r.personality,
        number_title(r.personality),
        master_mark(r.personality_master),
        debt_mark(r.personality_karmic_debt),
    );
    println!(
        "birthday:          {}{}",
        r.birthday,
        master_mark(r.birthday_master)
    );
    println!(
        "maturity:          {}{}",
        r.maturity,
        master_mark(r.maturity_master)
    );
    println!("balance:           {}", r.balance);
    match r.hidden_passion {
        Some(n) => println!("hidden passion:    {n}"),
        None => println!("hidden passion:    (none)"),
    }
    println!("subconscious self: {}", r.subconscious_self);
    if let Some(c) = r.cornerstone {
        println!("cornerstone:       {c}");
    }
    if let Some(c) = r.capstone {
        println!("capstone:          {c}");
    }
    if let Some(v) = r.first_vowel {
        println!("first vowel:       {v}");
    }
    if r.karmic_lessons.is_empty() {
        println!("karmic lessons:    (none)");
    } else {
        let lessons: Vec<String> = r.karmic_lessons.iter().map(|n| n.to_string()).collect();
        println!("karmic lessons:    {}", lessons.join(", "));
    }

    println!();
    println!("pinnacles:");
    for p in &r.pinnacles {
        println!("  {}. {} {}", p.period_index, p.number, age_span(p.start_age, p.end_age));
    }
    println!("challenges:");
    for c in &r.challenges {
        println!("  {}. {} {}", c.period_index, c.number, age_span(c.start_age, c.end_age));
    }
    println!("life periods:");
    for lp in &r.life_periods {
        println!(
            "  {}. {} {} ({})",
            lp.period_index,
            lp.number,
            age_span(lp.start_age, lp.end_age),
            lp.source.as_str(),
        );
    }
}

fn age_span(start: u32, end: Option<u32>) -> String {
    match end {
        Some(end) => format!("(ages {start}-{end})"),
        None => format!("(ages {start}+)"),
    }
}

fn cmd_cycles(id: Option<i64>, date: Option<Date>) -> Result<()> {
    let store = open_store()?;
    let profile = resolve_profile(&store, id)?;
    let date = date.unwrap_or_else(today);

    let py = personal_year(profile.birth_date, date.year());
    let pm = personal_month(py, date.month());
    let pd = personal_day(pm, date.day());

    println!("{} on {}", profile.display_name(), date);
    println!();
    println!("personal year:  {py}");
    println!("personal month: {pm}");
    println!("personal day:   {pd}");
    println!("universal year:  {}", universal_year(date.year()));
    println!("universal month: {}", universal_month(date.year(), date.month()));
    println!("universal day:   {}", universal_day(date));

    if let Some(p) = current_pinnacle(profile.birth_date, date) {
        println!();
        println!("pinnacle:    {} {}", p.number, age_span(p.start_age, p.end_age));
    }
    if let Some(c) = current_challenge(profile.birth_date, date) {
        println!("challenge:   {} {}", c.number, age_span(c.start_age, c.end_age));
    }
    if let Some(lp) = current_life_period(profile.birth_date, date) {
        println!("life period: {} {}", lp.number, age_span(lp.start_age, lp.end_age));
    }

    Ok(())
}

fn cmd_compat(id1: i64, id2: i64, system: &str) -> Result<()> {
    let system = parse_system(system)?;
    let store = open_store()?;
    let p1 = get_profile(&store, id1)?;
    let p2 = get_profile(&store, id2)?;

    let result = match store.load_compatibility(p1.id, p2.id, system)? {
        Some(result) => result,
        None => {
            let result = compatibility(
                &p1.full_name(),
                p1.birth_date,
                &p2.full_name(),
                p2.birth_date,
                system,
            );
            store
                .save_compatibility(p1.id, p2.id, system, &result)
                .context("failed to cache compatibility")?;
            result
        }
    };

    println!("{}  ×  {}", p1.display_name(), p2.display_name());
    println!();
    println!(
        "overall: {} {} ({})",
        result.overall_score,
        result.level.as_str(),
        level_description(result.level),
    );
    println!();
    for aspect in [
        &result.life_path,
        &result.expression,
        &result.soul_urge,
        &result.personality,
        &result.birthday,
    ] {
        println!(
            "{:<12} {:>3}  ({} vs {})",
            aspect.aspect, aspect.score, aspect.number1, aspect.number2
        );
    }

    if !result.shared_numbers.is_empty() {
        let shared: Vec<String> = result.shared_numbers.iter().map(|n| n.to_string()).collect();
        println!();
        println!("shared numbers: {}", shared.join(", "));
    }
    if !result.complementary_aspects.is_empty() {
        println!();
        println!("strengths:");
        for line in &result.complementary_aspects {
            println!("  - {line}");
        }
    }
    if !result.challenges.is_empty() {
        println!();
        println!("challenges:");
        for line in &result.challenges {
            println!("  - {line}");
        }
    }

    println!();
    println!(
        "relationship number: {}",
        relationship_number(p1.birth_date, p2.birth_date)
    );
    Ok(())
}

fn cmd_dates(id1: i64, id2: i64, year: Option<i32>) -> Result<()> {
    let store = open_store()?;
    let p1 = get_profile(&store, id1)?;
    let p2 = get_profile(&store, id2)?;
    let year = year.unwrap_or_else(|| today().year());

    let dates = auspicious_dates(p1.birth_date, p2.birth_date, year);
    if dates.is_empty() {
        println!("no auspicious dates found in {year}");
        return Ok(());
    }

    println!(
        "auspicious dates in {year} for {} and {}:",
        p1.display_name(),
        p2.display_name()
    );
    for entry in &dates {
        println!("  {}  {}", entry.date, entry.score);
    }
    Ok(())
}

fn cmd_export(path: &std::path::Path) -> Result<()> {
    let store = open_store()?;
    store
        .export_json_file(path)
        .context("failed to export profiles")?;
    let count = store.list_profiles()?.len();
    println!("exported {count} profiles to {}", path.display());
    Ok(())
}

fn cmd_import(path: &std::path::Path) -> Result<()> {
    let store = open_store()?;
    let count = store
        .import_json_file(path)
        .context("failed to import profiles")?;
    println!("imported {count} profiles from {}", path.display());
    Ok(())
}
