use crate::{commands::Commands, error::CliError};
use browser::{
    orchestrator::{FetchMode, FetchOrchestrator, Stage},
    resolver::SourceResolver,
    schema::SchemaLoader,
    window::apply_window,
};
use clap::Parser;
use connectors::{
    api::{
        client::{DEFAULT_BASE_URL, HttpTableService},
        service::TableService,
    },
    sample,
};
use model::query::window::{QueryWindow, SortDirection};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "tablescope", version = "0.1.0", about = "Database table browser")]
struct Cli {
    #[arg(long, help = "Backend API base URL (defaults to TABLESCOPE_API_URL)")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .api_url
        .or_else(|| std::env::var("TABLESCOPE_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let service: Arc<dyn TableService> = Arc::new(HttpTableService::new(base_url));

    match cli.command {
        Commands::Tables { source } => list_tables(service, &source).await?,
        Commands::Columns { source, table } => show_columns(service, &source, &table).await?,
        Commands::Browse {
            source,
            table,
            page,
            page_size,
            sort,
            order,
            json,
        } => {
            let window = build_window(page, page_size, sort, order)?;
            browse(service, &source, &table, window, json).await?;
        }
    }

    Ok(())
}

fn build_window(
    page: usize,
    page_size: usize,
    sort: Option<String>,
    order: Option<String>,
) -> Result<QueryWindow, CliError> {
    let mut window = QueryWindow::default().page(page).page_size(page_size);
    if let Some(field) = sort {
        let direction = match order.as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(CliError::InvalidSortDirection(other.to_string())),
        };
        window = window.sorted_by(field, direction);
    }
    Ok(window)
}

async fn list_tables(service: Arc<dyn TableService>, source_id: &str) -> Result<(), CliError> {
    let resolver = SourceResolver::new(service.clone());
    let descriptor = resolver.resolve(source_id).await?;

    let names: Vec<String> = if descriptor.is_synthetic {
        sample::table_names().into_iter().map(str::to_string).collect()
    } else {
        let schema = service.schema(source_id).await?;
        schema.tables.into_iter().map(|t| t.name).collect()
    };

    println!(
        "Tables on {} ({}):",
        descriptor.display_name, descriptor.engine_kind
    );
    for name in names {
        println!("  {name}");
    }
    Ok(())
}

async fn show_columns(
    service: Arc<dyn TableService>,
    source_id: &str,
    table: &str,
) -> Result<(), CliError> {
    let resolver = SourceResolver::new(service.clone());
    let descriptor = resolver.resolve(source_id).await?;
    let loader = SchemaLoader::new(service);
    let columns = loader.load(&descriptor, table).await?;
    output::print_columns(&columns);
    Ok(())
}

async fn browse(
    service: Arc<dyn TableService>,
    source_id: &str,
    table: &str,
    window: QueryWindow,
    as_json: bool,
) -> Result<(), CliError> {
    info!("Browsing {table} on source '{source_id}'");
    let orchestrator = FetchOrchestrator::with_window(service, source_id, table, window.clone());
    orchestrator.start().await;

    let state = orchestrator.snapshot().await;
    if state.stage != Stage::Ready {
        return Err(CliError::Pipeline(state.error.unwrap_or_else(|| {
            format!("pipeline stopped while {}", state.stage)
        })));
    }
    let page = state
        .page
        .ok_or_else(|| CliError::Pipeline("no row page produced".to_string()))?;

    // Synthetic sources return the full row set; windowing happens here.
    let page = match state.pagination_mode {
        FetchMode::Client => apply_window(&page.rows, &window, &state.descriptors),
        FetchMode::Server => page,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&page.rows)?);
    } else {
        output::print_rows(&state.descriptors, &page);
        output::print_page_summary(&page, window.page_index, &state.pagination_mode.to_string());
    }
    Ok(())
}
