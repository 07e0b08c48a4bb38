use anyhow::Context;
use clap::Parser;
use findfiles::cli::Cli;
use findfiles::corpus::index_directory;
use findfiles::{Query, QueryError, QueryResult};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    findfiles::tracing::init(tracing::Level::INFO);
    let cli = Cli::parse();

    let root = cli.root_path();
    let index = index_directory(&root, &cli.walk_options())
        .with_context(|| format!("Failed to index {}", root.display()))?;

    let text = cli.query_text();
    tracing::debug!("Query text: '{}'", text);

    let results = Query::parse_str(&text)
        .map_err(QueryError::from)
        .and_then(|query| {
            if cli.explain {
                println!("Query: {}", query);
            }
            index.query(&query)
        });

    let mut results = match results {
        Ok(results) => results,
        Err(e) => {
            println!("ERROR: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(limit) = cli.limit {
        results.truncate(limit);
    }
    print_results(&results, cli.json)?;

    Ok(ExitCode::SUCCESS)
}

fn print_results(results: &[QueryResult], json: bool) -> anyhow::Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        println!("{}", rendered);
    } else {
        for result in results {
            println!("File: {}, Score: {:.6}", result.path, result.score);
        }
    }
    Ok(())
}
