//! Knowledge base commands.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use console::{Style, style};

use agentfactory_client::{
    CreateKnowledgeBaseRequest, Document, ListOptions, MetadataValue, QueryOptions, SearchResult,
};

use super::{Context, truncate};

/// Arguments for the kb command.
#[derive(Args, Debug)]
pub struct KbArgs {
    #[command(subcommand)]
    pub command: KbCommand,
}

#[derive(Subcommand, Debug)]
pub enum KbCommand {
    /// Create a knowledge base
    Create {
        /// Name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show a knowledge base
    Get {
        /// Knowledge base ID
        id: String,
    },

    /// List knowledge bases
    List {
        /// Maximum knowledge bases to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search a knowledge base
    Query {
        /// Knowledge base ID
        id: String,

        /// Search text
        query: String,

        /// Maximum results
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Add a document to a knowledge base
    AddDoc {
        /// Knowledge base ID
        id: String,

        /// Document text
        content: String,

        /// Metadata entries as key=value
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,
    },
}

/// Run the kb command.
pub async fn run(args: KbArgs, ctx: &Context) -> Result<()> {
    let kbs = ctx.client.knowledge_bases();

    match args.command {
        KbCommand::Create { name, description } => {
            let mut request = CreateKnowledgeBaseRequest::new(name);
            request.description = description;
            let kb = kbs
                .create(request)
                .await
                .context("error creating knowledge base")?;
            if ctx.json_output {
                ctx.print_json(&kb)?;
            } else {
                println!("Knowledge base created: {}", kb.id);
            }
        }
        KbCommand::Get { id } => {
            let kb = kbs.get(&id).await.context("error getting knowledge base")?;
            if ctx.json_output {
                ctx.print_json(&kb)?;
            } else {
                println!("Knowledge base: {} ({})", style(&kb.name).bold(), kb.id);
                println!("  documents: {}", kb.document_count);
            }
        }
        KbCommand::List { limit } => {
            let listed = kbs
                .list(limit.map(ListOptions::limit))
                .await
                .context("error listing knowledge bases")?;
            if ctx.json_output {
                ctx.print_json(&listed)?;
            } else {
                println!("Found {} knowledge bases:", listed.len());
                for kb in &listed {
                    println!("- {} ({})", kb.name, kb.id);
                }
            }
        }
        KbCommand::Query { id, query, limit } => {
            let results = kbs
                .query(&id, &query, Some(QueryOptions::limit(limit)))
                .await
                .context("error querying knowledge base")?;
            if ctx.json_output {
                ctx.print_json(&results)?;
            } else {
                print_results(&results);
            }
        }
        KbCommand::AddDoc {
            id,
            content,
            metadata,
        } => {
            let mut document = Document::new(content);
            for entry in &metadata {
                let (key, value) = parse_metadata(entry)?;
                document.metadata.insert(key, value);
            }

            let stored = kbs
                .documents(&id)
                .add(&document)
                .await
                .context("error adding document")?;
            if ctx.json_output {
                ctx.print_json(&stored)?;
            } else {
                println!("Document added to knowledge base ({})", stored.id);
            }
        }
    }

    Ok(())
}

pub(crate) fn print_results(results: &[SearchResult]) {
    let dim = Style::new().dim();
    println!("Found {} results:", results.len());
    for result in results {
        println!(
            "- {}: {} {}",
            result.title,
            truncate(&result.snippet, 70),
            dim.apply_to(format!("({:.2})", result.score))
        );
    }
}

/// Parse `key=value`, typing the value as bool, integer, finite float or string.
fn parse_metadata(entry: &str) -> Result<(String, MetadataValue)> {
    let Some((key, raw)) = entry.split_once('=') else {
        bail!("metadata entry '{}' must be key=value", entry);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("metadata entry '{}' has an empty key", entry);
    }

    let value = if let Ok(b) = raw.parse::<bool>() {
        MetadataValue::Bool(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        MetadataValue::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>()
        && f.is_finite()
    {
        MetadataValue::Float(f)
    } else {
        MetadataValue::String(raw.to_string())
    };

    Ok((key.to_string(), value))
}
