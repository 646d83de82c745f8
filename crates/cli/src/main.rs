mod error_presentation;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use error_presentation::{
    CONNECT_CONTEXT, CliError, CliResult, IDENTIFIER_CONTEXT, SHOW_CONTEXT, STATEMENT_CONTEXT,
    render_runtime_error,
};
use stratus_core::{
    AnyObjectIdentifier, COMMENT_COLUMN, Client, ConnectionConfig, IN_MEMORY_DATABASE,
    OWNER_COLUMN, ObjectIdentifier, ObjectType, Row, Scope, ShowRequest, row_identifier,
};
use stratus_testkit::{NonExistenceCheck, TestResult, load_scenarios_from_path, run_scenarios};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Inspect a local warehouse catalog and run acceptance scenarios", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Catalog database file, or `:memory:` for a throwaway catalog.
    #[arg(long, global = true, env = "STRATUS_DATABASE", default_value = IN_MEMORY_DATABASE)]
    database: String,
    /// Role new objects are owned by.
    #[arg(long, global = true)]
    role: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List objects of one kind.
    Show {
        object_type: ObjectType,
        /// Case-insensitive name pattern with `%` and `_` wildcards.
        #[arg(long)]
        like: Option<String>,
        /// Restrict the listing to one database.
        #[arg(long, conflicts_with = "in_schema")]
        in_database: Option<String>,
        /// Restrict the listing to one schema (`db.schema`).
        #[arg(long)]
        in_schema: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Run one statement and print the rows it returns.
    Exec { sql: String },
    /// Succeed only if the object does not exist.
    AssertAbsent {
        object_type: ObjectType,
        /// Fully qualified identifier, e.g. `db.schema.name`.
        id: String,
    },
    /// Run every scenario in a YAML file.
    Run { path: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let client = connect(&cli.connection)?;

    match cli.command {
        Command::Show {
            object_type,
            like,
            in_database,
            in_schema,
            limit,
        } => {
            let mut request = ShowRequest::new(object_type);
            if let Some(pattern) = like {
                request = request.like(pattern);
            }
            if let Some(scope) = parse_scope(in_database.as_deref(), in_schema.as_deref())? {
                request = request.in_scope(scope);
            }
            if let Some(limit) = limit {
                request = request.limit(limit);
            }
            show(&client, object_type, &request)
        }
        Command::Exec { sql } => {
            let rows = client
                .query(&sql)
                .map_err(CliError::core(STATEMENT_CONTEXT))?;
            for row in &rows {
                println!("{}", render_columns(row));
            }
            Ok(())
        }
        Command::AssertAbsent { object_type, id } => {
            let id = AnyObjectIdentifier::parse(object_type.scope(), &id)
                .map_err(|error| CliError::core(IDENTIFIER_CONTEXT)(error.into()))?;
            NonExistenceCheck::new(object_type, id.clone(), |id: &AnyObjectIdentifier| {
                client.show_row_by_id(object_type, id)
            })
            .check()?;
            println!("{object_type} {} does not exist", id.fully_qualified_name());
            Ok(())
        }
        Command::Run { path } => run_scenario_file(&client, &path),
    }
}

fn connect(args: &ConnectionArgs) -> CliResult<Client> {
    let mut config = ConnectionConfig::new(args.database.clone());
    config.role = args.role.clone();
    info!(database = %config.database, role = config.role_or_default(), "opening catalog");
    stratus_local::client(&config).map_err(CliError::core(CONNECT_CONTEXT))
}

fn parse_scope(in_database: Option<&str>, in_schema: Option<&str>) -> CliResult<Option<Scope>> {
    let identifier = |error: stratus_core::IdentifierError| {
        CliError::core(IDENTIFIER_CONTEXT)(error.into())
    };

    Ok(match (in_database, in_schema) {
        (Some(database), _) => Some(Scope::Database(database.parse().map_err(identifier)?)),
        (None, Some(schema)) => Some(Scope::Schema(schema.parse().map_err(identifier)?)),
        (None, None) => None,
    })
}

fn show(client: &Client, object_type: ObjectType, request: &ShowRequest) -> CliResult<()> {
    let rows = client
        .show_rows(request)
        .map_err(CliError::core(SHOW_CONTEXT))?;
    for row in &rows {
        let id = row_identifier(object_type, row)
            .map_err(|error| CliError::core(SHOW_CONTEXT)(error.into()))?;
        println!(
            "{}\t{}\t{}",
            id.fully_qualified_name(),
            row.get(OWNER_COLUMN).unwrap_or_default(),
            row.get(COMMENT_COLUMN).unwrap_or_default()
        );
    }
    Ok(())
}

fn render_columns(row: &Row) -> String {
    row.columns()
        .map(|(column, value)| format!("{column}={}", value.unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\t")
}

fn run_scenario_file(client: &Client, path: &Path) -> CliResult<()> {
    let scenarios = load_scenarios_from_path(path)?;
    let results = run_scenarios(Some(client), &scenarios);

    let mut failed = 0;
    for (name, result) in &results {
        match result {
            TestResult::Passed => println!("PASS {name}"),
            TestResult::Skipped(reason) => println!("SKIP {name}: {reason}"),
            TestResult::Failed(message) => {
                failed += 1;
                println!("FAIL {name}: {message}");
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ScenariosFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}
