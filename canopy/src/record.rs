use std::fmt::Display;

use canopy_view::Render;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum NodeRole {
    Root,
    SuperNode,
    ExtendedNode,
    SimpleNode,
}

impl NodeRole {
    pub fn label(&self) -> &'static str {
        match self {
            NodeRole::Root => "I'm Root",
            NodeRole::SuperNode => "I'm Super",
            NodeRole::ExtendedNode => "I'm Extended",
            NodeRole::SimpleNode => "I'm Simple",
        }
    }

    /// New id for a record with this role, from its old id and its index
    /// among its siblings.
    pub fn renumber(&self, id: u32, index: usize) -> u64 {
        let id = u64::from(id);
        let index = index as u64;
        match self {
            NodeRole::Root => 0,
            NodeRole::SuperNode => id * 10 + index,
            NodeRole::ExtendedNode => id * 100 + index,
            NodeRole::SimpleNode => id * 1000 + index,
        }
    }
}

impl Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Root => write!(f, "Root"),
            NodeRole::SuperNode => write!(f, "SuperNode"),
            NodeRole::ExtendedNode => write!(f, "ExtendedNode"),
            NodeRole::SimpleNode => write!(f, "SimpleNode"),
        }
    }
}

/// One row of the flat input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    #[serde(default)]
    pub parent_id: Option<u32>,
    pub name: String,
    pub role: NodeRole,
}

impl Record {
    pub fn new(id: u32, parent_id: Option<u32>, name: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            role,
        }
    }

    /// Key under which this record is a parent; roots hang off `None`.
    pub fn key(&self) -> Option<u32> {
        Some(self.id)
    }

    pub fn parent_key(&self) -> Option<u32> {
        self.parent_id
    }
}

impl Render for Record {
    fn render(&self) -> String {
        format!("{} #{} ({})", self.name, self.id, self.role.label())
    }
}

/// Output row of renumbering: the record under its new id and new parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenumberedRecord {
    pub id: u64,
    pub parent_id: Option<u64>,
    pub name: String,
    pub role: NodeRole,
}

pub fn sample_records() -> Vec<Record> {
    use NodeRole::*;

    vec![
        Record::new(1, None, "root", Root),
        Record::new(2, Some(1), "child 1", ExtendedNode),
        Record::new(3, Some(1), "child 2", SimpleNode),
        Record::new(4, Some(2), "child 1.1", SimpleNode),
        Record::new(5, Some(2), "child 1.2", ExtendedNode),
        Record::new(6, Some(3), "child 2.1", SimpleNode),
        Record::new(9, Some(4), "child 1.1.2", ExtendedNode),
        Record::new(8, Some(4), "child 1.1.1", SimpleNode),
        Record::new(7, Some(3), "child 2.2", SuperNode),
        Record::new(10, Some(4), "child 1.1.3", SimpleNode),
        Record::new(11, Some(4), "child 1.1.4", SimpleNode),
    ]
}
