use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging;
use crate::services::pokemon_client::{detail_result, list_result};
use crate::services::queries::parse_pokemon_id;
use crate::services::PokemonClient;
use crate::tui;
use crate::tui::search::filter_by_name;
use crate::types::{Pokemon, PokemonDetail};

/// Browse the first-generation Pokédex from the terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GraphQL endpoint (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (default: ~/.pokedex/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Write logs to this file (required for logs in the TUI)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// List Pokémon
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,

        /// Send the filter to the server instead of filtering locally
        #[arg(long, requires = "search")]
        server_search: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one Pokémon's details
    Show {
        /// Pokédex number
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        // Reject a bad id before any setup
        if let Some(Commands::Show { id, .. }) = &self.command {
            parse_pokemon_id(id)?;
        }

        let interactive = matches!(self.command, None | Some(Commands::Tui));
        logging::init(
            self.debug,
            logging::target_for(interactive, self.log_file.as_deref()),
        )?;

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        }
        .with_endpoint(self.endpoint.clone())?;
        tracing::debug!(endpoint = %config.endpoint, "using endpoint");
        let client = PokemonClient::from_config(&config)?;

        match self.command {
            None | Some(Commands::Tui) => tui::run(client),
            Some(Commands::List {
                search,
                server_search,
                json,
            }) => run_list(&client, search.as_deref(), server_search, json),
            Some(Commands::Show { id, json }) => run_show(&client, &id, json),
        }
    }
}

fn run_list(
    client: &PokemonClient,
    search: Option<&str>,
    server_search: bool,
    json: bool,
) -> anyhow::Result<()> {
    let handle = match search {
        Some(term) if server_search => client.list_matching_handle(term)?,
        _ => client.list_handle()?,
    };
    let result = list_result(handle.wait());
    if let Some(err) = result.error {
        return Err(err.into());
    }

    let rows: Vec<&Pokemon> = match search {
        Some(term) if !server_search => filter_by_name(&result.data, term),
        _ => result.data.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No Pokémon found");
    } else {
        for pokemon in rows {
            println!("{}", format_summary_line(pokemon));
        }
    }
    Ok(())
}

fn run_show(client: &PokemonClient, id: &str, json: bool) -> anyhow::Result<()> {
    let id = parse_pokemon_id(id)?;
    let result = detail_result(client.detail_handle(id)?.wait());
    if let Some(err) = result.error {
        return Err(err.into());
    }
    let Some(detail) = result.data else {
        anyhow::bail!("no data for pokemon #{}", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", format_detail(id, &detail));
    }
    Ok(())
}

/// One list row: `#001  Bulbasaur  Grass / Poison`
pub fn format_summary_line(pokemon: &Pokemon) -> String {
    let types = if pokemon.types.is_empty() {
        "—".to_string()
    } else {
        pokemon.types.join(" / ")
    };
    format!(
        "{:<6}{:<16}{}",
        format!("#{:0>3}", pokemon.id),
        pokemon.display_name(),
        types
    )
}

/// Multi-line detail block for the pokemon numbered `id`
pub fn format_detail(id: i64, detail: &PokemonDetail) -> String {
    let mut out = format!(
        "{}\n",
        tui::widgets::detail_popup::detail_title(detail.summary.name.as_deref(), id)
    );
    for (label, value) in tui::widgets::detail_popup::detail_rows(detail) {
        out.push_str(&format!("  {:<14}{}\n", label, value));
    }
    out
}
