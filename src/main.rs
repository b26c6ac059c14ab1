// Calendar Layout
// Command line host: lays out a JSON appointment file for a day, week or month

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use calendar_layout::models::period::{Granularity, NavAction};
use calendar_layout::services::calendar::CalendarView;
use calendar_layout::services::labels::EnglishLabels;
use calendar_layout::services::report::render_text;
use calendar_layout::services::settings::{default_config_path, SettingsService};
use calendar_layout::services::source::JsonFileSource;

#[derive(Parser, Debug)]
#[command(
    name = "calendar-layout",
    version,
    about = "Lay out appointments for a day, week or month view"
)]
struct Cli {
    /// JSON file holding an array of appointments
    #[arg(short, long)]
    appointments: PathBuf,

    /// TOML settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View granularity: day, week or month
    #[arg(long, value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Granularity>()))]
    view: Option<Granularity>,

    /// Anchor date (YYYY-MM-DD), today when omitted
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Periods to move from the anchor; negative moves back
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    steps: i32,

    /// Print the layout as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::info!("Starting calendar layout for {}", cli.appointments.display());

    let config_path = cli
        .config
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| anyhow!("no settings file given and no config directory available"))?;
    let settings = SettingsService::new(config_path).get()?;

    let source = JsonFileSource::new(&cli.appointments);
    let mut view = CalendarView::from_settings(&settings, source)?;

    // Navigation limits are not fatal: render whatever period the view ended up on
    if let Some(granularity) = cli.view {
        if let Err(err) = view.navigate(NavAction::SetGranularity(granularity)) {
            log::warn!("Ignoring --view {}: {}", granularity, err);
        }
    }
    if let Some(date) = cli.date {
        if let Err(err) = view.navigate(NavAction::GoTo(date)) {
            log::warn!("Ignoring --date {}: {}", date, err);
        }
    }

    let taken = view.step_by(cli.steps);
    if taken != cli.steps {
        log::warn!(
            "Stopped after {} of {} step(s) at the navigation limit",
            taken,
            cli.steps
        );
    }

    let layout = view.render()?;

    if cli.json {
        let json = serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
        println!("{}", json);
    } else {
        print!(
            "{}",
            render_text(&layout, &EnglishLabels, settings.pixels_per_hour)
        );
    }

    if !layout.diagnostics.is_empty() {
        log::warn!(
            "{} appointment(s) could not be laid out",
            layout.diagnostics.len()
        );
    }

    Ok(())
}
