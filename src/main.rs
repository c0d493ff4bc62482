use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use servicesuggest::{LabelEvent, LabelWatcher, SharedIndex, SuggestConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Autocomplete suggestions for marketplace services", long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label file to index (overrides config file)
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Maximum suggestions per query (overrides config file)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Rebuild the index when the label file changes
    #[arg(short, long)]
    watch: bool,

    /// Prefixes to complete; reads one per line from stdin when absent
    queries: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config =
        SuggestConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(labels) = args.labels {
        config.labels_path = Some(labels);
    }
    if let Some(limit) = args.limit {
        config.max_suggestions = limit;
    }
    if args.watch {
        config.watch = true;
    }
    config.validate()?;

    let labels = config.label_set().context("failed to load labels")?;
    let index = Arc::new(SharedIndex::from_labels(&labels));
    info!(
        "indexed {} labels from {}",
        labels.len(),
        config
            .labels_path
            .as_ref()
            .map_or("built-in catalog".to_string(), |p| p.display().to_string())
    );

    let mut stdout = tokio::io::stdout();

    if !args.queries.is_empty() {
        for query in &args.queries {
            print_suggestions(&mut stdout, &index, query, config.max_suggestions).await?;
        }
        return Ok(());
    }

    let (tx, mut rx) = mpsc::channel(16);
    let _watcher = match (&config.labels_path, config.watch) {
        (Some(path), true) => {
            let mut watcher = LabelWatcher::new(tx)?;
            watcher
                .watch(path)
                .with_context(|| format!("failed to watch {}", path.display()))?;
            info!("watching {} for changes", path.display());
            Some(watcher)
        }
        _ => None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(query) => {
                        print_suggestions(&mut stdout, &index, &query, config.max_suggestions).await?
                    }
                    None => break,
                }
            }
            Some(LabelEvent::Changed(path)) = rx.recv() => {
                if let Err(e) = index.reload_from_file(&path) {
                    debug!("still serving generation {}: {}", index.generation(), e);
                }
            }
        }
    }

    Ok(())
}

async fn print_suggestions<W: AsyncWrite + Unpin>(
    out: &mut W,
    index: &SharedIndex,
    query: &str,
    limit: usize,
) -> Result<()> {
    let suggestions = index.suggest(query, limit);
    debug!("{:?}: {} suggestions", query, suggestions.len());

    let mut buf = String::new();
    for suggestion in suggestions {
        buf.push_str(&suggestion);
        buf.push('\n');
    }
    buf.push('\n');

    out.write_all(buf.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
