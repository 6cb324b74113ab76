//! kvwire CLI Client
//!
//! Command-line interface for driving a RESP-speaking store through the
//! kvwire client, plus an export mode that writes the encoded commands to a
//! bulk-load file instead of the socket.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use kvwire::{AutocompleteItem, Client, CommandResult, Config, ExportFile};

/// kvwire CLI
#[derive(Parser, Debug)]
#[command(name = "kvwire-cli")]
#[command(about = "CLI for RESP-speaking key-value stores")]
#[command(version)]
struct Args {
    /// Server hostname or IP
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Prefix applied to every key and index name
    #[arg(short, long, default_value = "")]
    key_prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Add members to a set
    SetAdd {
        /// The set key
        key: String,

        /// Members to add
        members: Vec<String>,
    },

    /// Add one member to a sorted collection
    SortedSetAdd {
        /// The collection key
        key: String,

        /// The member's score
        score: i64,

        /// The member
        member: String,
    },

    /// Intersect sets (index join)
    Intersect {
        /// Keys of the sets to intersect
        sets: Vec<String>,
    },

    /// Union sets
    Union {
        /// Keys of the sets to union
        sets: Vec<String>,
    },

    /// Index a key reference under an index leaf
    IndexAdd {
        /// Index name, e.g. index:lead:firstname
        index_name: String,

        /// Index leaf, e.g. dhanya
        index_leaf: String,

        /// The key reference to index
        key_reference: String,
    },

    /// Remove an index entry
    IndexRemove {
        index_name: String,
        index_leaf: String,
        key_reference: String,
    },

    /// Add a value to an autocomplete index
    SearchAdd {
        /// The autocomplete index
        index: String,

        /// The searchable value
        value: String,

        /// The id attached to the value
        id: String,
    },

    /// Prefix-search an autocomplete index (case-insensitive)
    Search {
        /// The autocomplete index
        index: String,

        /// The search prefix
        query: String,
    },

    /// Check that the server answers the liveness handshake
    Ping,

    /// Append a `set` command to a bulk-load export file
    Export {
        /// Destination file (append mode)
        file: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kvwire=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .host(args.host)
        .port(args.port)
        .key_prefix(args.key_prefix)
        .build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> kvwire::Result<()> {
    // Export needs no connection; everything else does.
    match command {
        Commands::Export { file, key, value } => {
            let export = ExportFile::new(&file);
            export.set(&key, &value)?;
            println!("appended set {} to {}", key, file);
            Ok(())
        }
        command => {
            let client = Client::connect(config)?;
            run_connected(&client, command)
        }
    }
}

fn run_connected(client: &Client, command: Commands) -> kvwire::Result<()> {
    match command {
        Commands::Get { key } => match client.get(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Commands::Set { key, value } => {
            print_result(client.set(&key, &value)?);
        }
        Commands::SetAdd { key, members } => {
            let members: Vec<&str> = members.iter().map(String::as_str).collect();
            print_result(client.set_add(&key, &members)?);
        }
        Commands::SortedSetAdd { key, score, member } => {
            print_result(client.sorted_set_add(&key, score, &member)?);
        }
        Commands::Intersect { sets } => {
            let sets: Vec<&str> = sets.iter().map(String::as_str).collect();
            for member in client.set_intersect(&sets)? {
                println!("{}", member);
            }
        }
        Commands::Union { sets } => {
            let sets: Vec<&str> = sets.iter().map(String::as_str).collect();
            for member in client.set_union(&sets)? {
                println!("{}", member);
            }
        }
        Commands::IndexAdd {
            index_name,
            index_leaf,
            key_reference,
        } => {
            client.add_index(&index_name, &index_leaf, &key_reference)?;
            println!("indexed {} under {}:{}", key_reference, index_name, index_leaf);
        }
        Commands::IndexRemove {
            index_name,
            index_leaf,
            key_reference,
        } => {
            client.remove_index(&index_name, &index_leaf, &key_reference)?;
            println!("removed {} from {}:{}", key_reference, index_name, index_leaf);
        }
        Commands::SearchAdd { index, value, id } => {
            print_result(client.autocomplete_add(&index, &[AutocompleteItem::new(value, id)])?);
        }
        Commands::Search { index, query } => {
            for item in client.autocomplete_search(&index, &query)? {
                println!("{}|{}", item.value, item.id);
            }
        }
        Commands::Ping => {
            // Connecting already ran the handshake.
            println!("PONG");
        }
        Commands::Export { .. } => unreachable!("handled before connecting"),
    }

    Ok(())
}

fn print_result(result: CommandResult) {
    if result.success {
        match result.records_affected {
            Some(count) => println!("OK ({} affected)", count),
            None => println!("OK"),
        }
    } else {
        println!(
            "command failed: {}",
            result.error_message.unwrap_or_default()
        );
    }
}
