mod scoring_rules;

use std::fs::{self, File};
use std::path::Path;

use adminkit::config::GridConfig;
use adminkit::error::ConfigError;
use adminkit::form::SubmitOutcome;
use adminkit::table::SortDirection;
use simplelog::{Config, LevelFilter, WriteLogger};

use scoring_rules::{PageError, RuleStore, ScoringRulesPage, sample_rows};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Page(#[from] PageError),
}

fn load_grid_config(path: Option<&Path>) -> Result<GridConfig, DemoError> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    let json = fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
        path: path.display().to_string(),
        source,
    })?;
    let config = GridConfig::from_json(&json)?;
    log::debug!(
        "Loaded grid config: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );
    Ok(config)
}

async fn run(config_path: Option<&Path>) -> Result<(), DemoError> {
    let grid = load_grid_config(config_path)?;
    let mut page = ScoringRulesPage::new(grid, RuleStore::new(sample_rows()))?;

    let columns = page.columns().clone();
    page.state_mut()
        .set_sort(&columns, "ruleName", SortDirection::Ascending)
        .map_err(PageError::from)?;
    println!("{}", page.render_grid().await);

    page.state_mut().set_global_filter("abil");
    println!("{}", page.render_grid().await);
    page.state_mut().set_global_filter("");

    // Edit: numbers show as plain text.
    if page.edit_rule("r-101").await? {
        print!("{}", page.render_form());
        page.session().cancel().map_err(PageError::from)?;
    }

    // Add: first attempt is missing required fields.
    page.add_rule()?;
    if let SubmitOutcome::Invalid(result) = page.save().await? {
        println!("\n{} field(s) need attention", result.len());
        print!("{}", page.render_form());
    }

    let session = page.session();
    session.update_field("ruleName", "Thin file penalty").map_err(PageError::from)?;
    session.update_field("parameterDataType", "E").map_err(PageError::from)?;
    session.update_field("points", "1250").map_err(PageError::from)?;
    session.blur_field("points").map_err(PageError::from)?;
    session.update_field("contactPhone", "3255550100").map_err(PageError::from)?;
    session.update_field("startDate", "2025-01-01").map_err(PageError::from)?;
    print!("\n{}", page.render_form());

    match page.save().await? {
        SubmitOutcome::Committed(record) => println!("\nSaved rule {}", record.id()),
        SubmitOutcome::Invalid(result) => println!("\nStill invalid: {:?}", result.first_error()),
        SubmitOutcome::AlreadySaving => println!("\nSave already in progress"),
    }

    println!("\n{}", page.render_grid().await);
    Ok(())
}

#[tokio::main]
async fn main() {
    let log_file = File::create("adminkit-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let config_path = std::env::args().nth(1);
    if let Err(e) = run(config_path.as_deref().map(Path::new)).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
