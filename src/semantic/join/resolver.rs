//! Hop-bounded search for every data source that can join to an origin.
//!
//! A candidate is kept when it can legally join the current tail in, i.e.
//! with the candidate as the left side of the join and the tail as the right
//! side. The search walks depth-first from the origin. At each level the tail of
//! the current path is expanded through its identifiers in declaration
//! order, then through the registry's data sources for each identifier in
//! model order. The first path found to a target is kept; later paths to
//! the same target are never considered, even if shorter. Callers must not
//! assume the returned paths are minimal.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{DataSource, DataSourceReference};
use crate::semantic::error::SemanticResult;
use crate::semantic::semantic_model::DataSourceSemantics;

use super::{DataSourceIdentifierJoin, DataSourceJoinValidator, DataSourceLink, JoinHops};

/// Resolver result keyed by target data source name.
pub type JoinableDataSources = HashMap<String, DataSourceLink>;

impl<'a, S: DataSourceSemantics + ?Sized> DataSourceJoinValidator<'a, S> {
    /// Every data source that can join to `origin` within `hops`, with the
    /// path used to reach it.
    ///
    /// An unknown origin is an error. A data source with no legal path is
    /// simply absent from the result.
    pub fn joinable_data_sources(
        &self,
        origin: &DataSourceReference,
        hops: JoinHops,
    ) -> SemanticResult<JoinableDataSources> {
        let origin_data_source = self.semantics.get_by_reference(origin)?;
        self.expand(origin_data_source, &[], JoinableDataSources::new(), hops.budget())
    }

    /// Expand one level from the tail of `current_path`, then recurse into
    /// every path discovered at this level while hops remain.
    ///
    /// `known` is the accumulator; it is threaded through each call and
    /// handed back so the caller sees every link found below it.
    fn expand(
        &self,
        origin: &DataSource,
        current_path: &[DataSourceIdentifierJoin],
        mut known: JoinableDataSources,
        hops_remaining: usize,
    ) -> SemanticResult<JoinableDataSources> {
        let tail = match current_path.last() {
            Some(step) => self
                .semantics
                .get_by_reference(&step.right_data_source_reference)?,
            None => origin,
        };
        let tail_reference = tail.reference();
        debug!(
            origin = %origin.name,
            tail = %tail.name,
            hops_remaining,
            "expanding joinable data sources"
        );

        let mut discovered: Vec<Vec<DataSourceIdentifierJoin>> = vec![];
        for identifier in &tail.identifiers {
            let identifier_reference = identifier.reference();

            for candidate in self.semantics.data_sources_for_identifier(&identifier_reference) {
                if candidate.name == origin.name || known.contains_key(&candidate.name) {
                    debug!(candidate = %candidate.name, "already known, skipping");
                    continue;
                }

                let candidate_reference = candidate.reference();
                let Some(join_type) = self.valid_join_type(
                    &candidate_reference,
                    &tail_reference,
                    &identifier_reference,
                )?
                else {
                    continue;
                };

                let mut join_path = current_path.to_vec();
                join_path.push(DataSourceIdentifierJoin {
                    right_data_source_reference: candidate_reference,
                    identifier_reference: identifier_reference.clone(),
                    join_type,
                });
                debug!(
                    candidate = %candidate.name,
                    identifier = %identifier_reference,
                    hops = join_path.len(),
                    "joined"
                );

                let link = DataSourceLink {
                    left_data_source_reference: origin.reference(),
                    join_path: join_path.clone(),
                    discovery_rank: known.len(),
                };
                known.insert(candidate.name.clone(), link);
                discovered.push(join_path);
            }
        }

        let hops_remaining = hops_remaining.saturating_sub(1);
        if hops_remaining == 0 {
            debug!(tail = %tail.name, "hop budget exhausted");
            return Ok(known);
        }

        for join_path in discovered {
            known = self.expand(origin, &join_path, known, hops_remaining)?;
        }
        Ok(known)
    }
}
