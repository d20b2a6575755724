use clap::{Parser, Subcommand};

mod cli_commands;

/// Inspect and convert simple geometries between WKT and JSON mappings
#[derive(Parser)]
#[command(name = "geoif", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a WKT string and print some details about the geometry
    Show { wkt: String },
    /// Print the JSON mapping of a WKT geometry
    ToJson {
        wkt: String,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Build a geometry from a JSON mapping and print it as WKT
    FromJson { json: String },
    /// Print the distinct vertices of a JSON geometry as a MultiPoint
    Unique {
        json: String,
        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Show { wkt } => cli_commands::parse_show_detail(wkt),
        Command::ToJson { wkt, pretty } => cli_commands::wkt_to_json(wkt, pretty),
        Command::FromJson { json } => cli_commands::json_to_wkt(json),
        Command::Unique { json, output } => cli_commands::unique_vertices(json, output),
    };

    if let Err(msg) = result {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}
