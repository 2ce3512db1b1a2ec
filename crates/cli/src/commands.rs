use clap::Subcommand;
use model::query::window::DEFAULT_PAGE_SIZE;

#[derive(Subcommand)]
pub enum Commands {
    /// List tables available on a source
    Tables {
        #[arg(help = "Source connection id")]
        source: String,
    },
    /// Show the adapted column layout for a table
    Columns {
        #[arg(help = "Source connection id")]
        source: String,

        #[arg(help = "Table name")]
        table: String,
    },
    /// Fetch and print one page of rows
    Browse {
        #[arg(help = "Source connection id")]
        source: String,

        #[arg(help = "Table name")]
        table: String,

        #[arg(long, default_value_t = 0, help = "0-based page index")]
        page: usize,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, help = "Rows per page")]
        page_size: usize,

        #[arg(long, help = "Column to sort by")]
        sort: Option<String>,

        #[arg(long, help = "Sort direction: asc or desc")]
        order: Option<String>,

        #[arg(long, help = "If set, prints the page as JSON instead of a table")]
        json: bool,
    },
}
