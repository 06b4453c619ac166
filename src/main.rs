use chrono::Local;
use clap::Parser;
use color_eyre::eyre;

use crate::app::App;
use crate::cli::Args;
use crate::history::SearchHistory;

pub mod app;
pub mod cli;
pub mod criteria;
pub mod form;
pub mod history;
pub mod logging;
pub mod widgets;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let _log_guard = logging::init(args.log_file.clone())?;

    let history = if args.no_history {
        SearchHistory::default()
    } else {
        history::load_history().await.unwrap_or_else(|err| {
            tracing::warn!(%err, "could not load search history, starting empty");
            SearchHistory::default()
        })
    };

    let today = Local::now().date_naive();
    tracing::info!(%today, searches = history.searches.len(), "starting");

    let terminal = ratatui::init();
    let result = App::new(today, history).run(terminal).await;
    ratatui::restore();
    let app = result?;

    if !args.no_history {
        if let Err(err) = history::save_history(&app.history).await {
            tracing::error!(%err, "could not save search history");
        }
    }

    if args.print {
        for criteria in &app.submitted {
            println!("{}", serde_json::to_string(criteria)?);
        }
    }

    Ok(())
}
