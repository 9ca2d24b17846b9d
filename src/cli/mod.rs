// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spoonsearch")]
#[command(about = "Spoonsearch - Recipe search over the Spoonacular API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search for recipes by keyword
    Search {
        /// Search query
        query: String,

        /// Filter by cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Result page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Find recipes by available ingredients
    Fridge {
        /// Ingredient list, separated by commas
        ingredients: String,

        /// Maximum number of recipes to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show full details for a recipe
    Show {
        /// Recipe ID
        recipe_id: i64,
    },
}
