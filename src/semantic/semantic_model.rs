//! Read-only registry of data sources.
//!
//! `SemanticModel` is built once per compilation session and never mutated
//! afterwards, so it can be shared across threads and queried concurrently.
//!
//! # Example
//!
//! ```ignore
//! use semlayer::model::{DataSource, Identifier};
//! use semlayer::semantic::SemanticModel;
//!
//! let model = SemanticModel::new(vec![
//!     DataSource::new("users").with_identifier(Identifier::primary("user")),
//!     DataSource::new("orders").with_identifier(Identifier::foreign("user")),
//! ])?;
//! let reachable = model.reachable_data_sources(&"users".into())?;
//! ```

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::model::{DataSource, DataSourceReference, Identifier, IdentifierReference};

use super::error::{SemanticError, SemanticResult};

/// Lookup interface the join core consumes.
///
/// Mirrors what the model layer exposes; implemented by [`SemanticModel`].
pub trait DataSourceSemantics {
    /// Resolve a data source. Unknown references are an error.
    fn get_by_reference(&self, reference: &DataSourceReference) -> SemanticResult<&DataSource>;

    /// Every data source declaring an identifier with this name, in model order.
    fn data_sources_for_identifier(&self, identifier: &IdentifierReference) -> Vec<&DataSource>;

    /// The identifier as declared in the given data source, if it declares it.
    fn identifier_in_data_source(
        &self,
        data_source: &DataSourceReference,
        identifier: &IdentifierReference,
    ) -> SemanticResult<Option<&Identifier>> {
        Ok(self.get_by_reference(data_source)?.identifier(identifier))
    }
}

/// Graph of data sources connected by shared identifiers.
///
/// Nodes are data sources in model order; an undirected edge connects two
/// data sources for every identifier name they both declare. Edges carry no
/// legality information: whether a join is safe is decided by
/// [`crate::semantic::join::JoinLegality`].
#[derive(Debug, Clone)]
pub struct SemanticModel {
    graph: UnGraph<DataSource, IdentifierReference>,
    node_indices: HashMap<String, NodeIndex>,
    identifier_index: HashMap<String, Vec<NodeIndex>>,
}

impl SemanticModel {
    /// Build the registry from pre-validated data sources.
    pub fn new(data_sources: Vec<DataSource>) -> SemanticResult<Self> {
        let mut graph = UnGraph::with_capacity(data_sources.len(), 0);
        let mut node_indices = HashMap::new();
        let mut identifier_index: HashMap<String, Vec<NodeIndex>> = HashMap::new();

        for data_source in data_sources {
            if node_indices.contains_key(&data_source.name) {
                return Err(SemanticError::DuplicateDataSource(data_source.name));
            }
            let name = data_source.name.clone();
            let identifier_names: Vec<String> = data_source
                .identifiers
                .iter()
                .map(|i| i.name.clone())
                .collect();

            let idx = graph.add_node(data_source);
            node_indices.insert(name, idx);

            for identifier_name in identifier_names {
                let owners = identifier_index.entry(identifier_name.clone()).or_default();
                // A data source declaring the same name twice still counts once
                if owners.last() == Some(&idx) {
                    continue;
                }
                for &other in owners.iter() {
                    graph.add_edge(other, idx, IdentifierReference::new(identifier_name.clone()));
                }
                owners.push(idx);
            }
        }

        Ok(Self {
            graph,
            node_indices,
            identifier_index,
        })
    }

    /// All data sources in model order.
    pub fn data_sources(&self) -> impl Iterator<Item = &DataSource> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Identifiers two data sources have in common.
    pub fn shared_identifiers(
        &self,
        left: &DataSourceReference,
        right: &DataSourceReference,
    ) -> SemanticResult<Vec<IdentifierReference>> {
        let left_idx = self.index_of(left)?;
        let right_idx = self.index_of(right)?;
        let mut shared: Vec<IdentifierReference> = self
            .graph
            .edges_connecting(left_idx, right_idx)
            .map(|e| e.weight().clone())
            .collect();
        shared.sort();
        Ok(shared)
    }

    /// Data sources connected to `origin` through shared identifiers, at any
    /// depth, regardless of join legality. The origin itself is excluded.
    ///
    /// Every data source the join resolver can reach is in this set.
    pub fn reachable_data_sources(&self, origin: &DataSourceReference) -> SemanticResult<Vec<&str>> {
        let origin_idx = self.index_of(origin)?;
        let mut bfs = Bfs::new(&self.graph, origin_idx);

        let mut reachable = vec![];
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != origin_idx {
                reachable.push(self.graph[idx].name.as_str());
            }
        }
        Ok(reachable)
    }

    fn index_of(&self, reference: &DataSourceReference) -> SemanticResult<NodeIndex> {
        self.node_indices
            .get(reference.name())
            .copied()
            .ok_or_else(|| SemanticError::UnknownDataSource(reference.data_source_name.clone()))
    }
}

impl DataSourceSemantics for SemanticModel {
    fn get_by_reference(&self, reference: &DataSourceReference) -> SemanticResult<&DataSource> {
        let idx = self.index_of(reference)?;
        Ok(&self.graph[idx])
    }

    fn data_sources_for_identifier(&self, identifier: &IdentifierReference) -> Vec<&DataSource> {
        self.identifier_index
            .get(identifier.name())
            .map(|owners| owners.iter().map(|&idx| &self.graph[idx]).collect())
            .unwrap_or_default()
    }
}
