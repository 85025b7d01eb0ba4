//! Knowledge-graph collaborator interface.
//!
//! The bot never builds or queries a graph itself; an implementation backed by a retrieval
//! library can be handed to [`crate::assembly::build_dispatcher`] to enable `/ask`.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;

/// Retrieval strategy for [`GraphMemory::query`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
    Naive,
    Local,
    Global,
    #[default]
    Hybrid,
    Mix,
    Bypass,
}

impl QueryMode {
    pub const ALL: [QueryMode; 6] = [
        QueryMode::Naive,
        QueryMode::Local,
        QueryMode::Global,
        QueryMode::Hybrid,
        QueryMode::Mix,
        QueryMode::Bypass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Naive => "naive",
            QueryMode::Local => "local",
            QueryMode::Global => "global",
            QueryMode::Hybrid => "hybrid",
            QueryMode::Mix => "mix",
            QueryMode::Bypass => "bypass",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        QueryMode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| anyhow::anyhow!("Invalid query mode: {}", s))
    }
}

/// Named knowledge graphs that can absorb text and answer questions.
#[async_trait]
pub trait GraphMemory: Send + Sync {
    /// Adds `text` to graph `graph_id`, creating it when missing. True when the text was stored.
    async fn save(&self, graph_id: &str, text: &str) -> Result<bool>;

    async fn query(&self, graph_id: &str, question: &str, mode: QueryMode) -> Result<String>;

    async fn list_graphs(&self) -> Result<Vec<String>>;

    /// True when a graph was removed; false when it did not exist.
    async fn delete_graph(&self, graph_id: &str) -> Result<bool>;
}
