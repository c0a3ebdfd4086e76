mod config;
mod record;

use std::path::PathBuf;

use canopy_tree::{
    Ancestor, TreeError, TreeNode, Visitor, build_forest_indexed, build_tree, count_children,
    count_children_by, find_nodes, find_values, flatten_with, visit,
};
use canopy_view::{Render, ViewTree};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use thiserror::Error;
use tracing::info;

pub use crate::config::{ConfigError, RecordSource, Records};
pub use crate::record::{NodeRole, Record, RenumberedRecord, sample_records};

#[derive(Parser, Debug)]
#[command(name = "canopy", version, about = "Rebuild and query trees from flat records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Records file (.toml or .json); defaults to the built-in sample.
    #[arg(long = "records", global = true, env = "CANOPY_RECORDS")]
    pub records_path: Option<PathBuf>,

    #[arg(long = "log", global = true, default_value = "info")]
    pub log: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw every tree in the records
    Show {
        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Log each node with its ancestors, in pre-order
    Walk {
        /// Log whole nodes instead of values.
        #[arg(long)]
        nodes: bool,
    },
    /// Find nodes with a role
    Find {
        #[arg(long, value_enum)]
        role: NodeRole,

        /// Draw each matching subtree.
        #[arg(long)]
        nodes: bool,
    },
    /// Count descendants of the root
    Count {
        /// Only count through nodes with this role.
        #[arg(long, value_enum)]
        role: Option<NodeRole>,
    },
    /// Assign new ids by role and reparent under them
    Renumber {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("failed to output JSON: {0}")]
    Json(#[source] serde_json::Error),
}

pub fn get_records(cli: &Cli) -> Result<Records, AppError> {
    let records = match &cli.records_path {
        Some(path) => Records::load(path)?,
        None => Records::sample(),
    };
    info!(source = %records.source, records = records.len(), "using records");
    Ok(records)
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let records = get_records(&cli)?;
    match cli.command {
        Command::Show { json } => show(&records.records, json),
        Command::Walk { nodes } => {
            let tree = record_tree(&records.records)?;
            walk(&tree, nodes);
            Ok(())
        }
        Command::Find { role, nodes } => {
            let tree = record_tree(&records.records)?;
            find(&tree, role, nodes);
            Ok(())
        }
        Command::Count { role } => {
            let tree = record_tree(&records.records)?;
            let count = match role {
                None => count_children(&tree),
                Some(role) => count_children_by(&tree, |record| record.role == role),
            };
            info!(?role, count, "counted descendants");
            println!("{count}");
            Ok(())
        }
        Command::Renumber { json } => {
            let tree = record_tree(&records.records)?;
            let renumbered = renumber(&tree);
            if json {
                let output = serde_json::to_string_pretty(&renumbered).map_err(AppError::Json)?;
                println!("{output}");
            } else {
                print_renumbered(&renumbered);
            }
            Ok(())
        }
    }
}

/// The tree hanging off the first record without a parent.
pub fn record_tree(records: &[Record]) -> Result<TreeNode<Record>, TreeError> {
    build_tree(records, &None, Record::key, Record::parent_key, Record::clone)
}

fn show(records: &[Record], json: bool) -> Result<(), AppError> {
    let forest = build_forest_indexed(records, &None, Record::key, Record::parent_key, Record::clone);
    if forest.is_empty() {
        return Err(TreeError::NoRoot.into());
    }

    if json {
        let output = serde_json::to_string_pretty(&forest).map_err(AppError::Json)?;
        println!("{output}");
        return Ok(());
    }

    for tree in &forest {
        print!("{}", ViewTree::from(tree));
    }
    Ok(())
}

fn walk(tree: &TreeNode<Record>, nodes: bool) {
    if nodes {
        let mut visitor = |node: &TreeNode<Record>, ancestors: &[&TreeNode<Record>], index: usize| {
            info!(
                index,
                depth = ancestors.len(),
                children = node.children.len(),
                parent = ancestors.last().map(|parent| parent.value.id),
                "{}",
                node.value.render()
            );
        };
        visit(tree, Visitor::Node(&mut visitor));
    } else {
        let mut visitor = |record: &Record, ancestors: &[&Record], index: usize| {
            let ancestors: Vec<&str> = ancestors.iter().map(|a| a.role.label()).collect();
            info!(index, role = record.role.label(), ?ancestors, "{}", record.name);
        };
        visit(tree, Visitor::Value(&mut visitor));
    }
}

fn find(tree: &TreeNode<Record>, role: NodeRole, nodes: bool) {
    if nodes {
        let found = find_nodes(tree, |record| record.role == role);
        info!(%role, found = found.len(), "found nodes");
        for node in found {
            print!("{}", ViewTree::from(node));
        }
    } else {
        let found = find_values(tree, |record| record.role == role);
        info!(%role, found = found.len(), "found values");
        for record in found {
            println!("{}", record.render());
        }
    }
}

/// Give every record a new id derived from its role and sibling index, and
/// point it at its parent's new id.
pub fn renumber(tree: &TreeNode<Record>) -> Vec<RenumberedRecord> {
    flatten_with(tree, |record, ancestors: &[Ancestor<'_, Record, u64>], index| {
        let id = record.role.renumber(record.id, index);
        let parent_id = ancestors.last().map(|parent| *parent.state);
        (
            id,
            RenumberedRecord {
                id,
                parent_id,
                name: record.name.clone(),
                role: record.role,
            },
        )
    })
}

fn print_renumbered(records: &[RenumberedRecord]) {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
        .set_header(vec!["id", "parent", "name", "role"]);

    for record in records {
        let RenumberedRecord {
            id,
            parent_id,
            name,
            role,
        } = record;
        table.add_row(vec![
            id.to_string(),
            parent_id.map(|id| id.to_string()).unwrap_or_default(),
            name.clone(),
            role.to_string(),
        ]);
    }

    println!("{table}")
}
