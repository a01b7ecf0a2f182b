//! Narrower-term expansion for classification search.
//!
//! Documents are only ever classified with leaf concepts, so a search for
//! "documents about X" must first walk X down to the leaves. The walk is
//! level by level with one batched fetch per level: each level's frontier is
//! replaced wholesale by the union of its narrower ids, and the walk settles
//! on the first frontier that yields no narrower terms at all. A frontier
//! member without children is dropped once any sibling still has them.
//!
//! SKOS allows polyhierarchy, so a shared descendant is legal and must not
//! trip a cycle check. The guard is a depth cap instead: taxonomies here are
//! a handful of levels deep, and a walk that is still widening after
//! [`MAX_NARROWER_DEPTH`] levels can only be chasing a broader/narrower loop.

use std::collections::HashSet;

use tracing::{debug, instrument};

use apollo_core::{Error, Result, MAX_NARROWER_DEPTH};

use crate::concepts::ConceptFetcher;

/// Expand `roots` to the frontier of their narrower closure.
#[instrument(skip(fetcher, roots), fields(roots = roots.len()))]
pub async fn narrower_closure<F>(fetcher: &F, roots: &[String]) -> Result<Vec<String>>
where
    F: ConceptFetcher + ?Sized,
{
    let mut frontier = dedup_preserving_order(roots);
    if frontier.is_empty() {
        return Ok(frontier);
    }

    for depth in 0..MAX_NARROWER_DEPTH {
        let records = fetcher.fetch_by_ids(&frontier).await?;

        let mut seen = HashSet::new();
        let mut next = Vec::new();
        for record in &records {
            for id in &record.narrower {
                if seen.insert(id.clone()) {
                    next.push(id.clone());
                }
            }
        }

        if next.is_empty() {
            debug!(depth, frontier = frontier.len(), "Narrower expansion settled");
            return Ok(frontier);
        }
        frontier = next;
    }

    Err(Error::CycleDetected {
        depth: MAX_NARROWER_DEPTH,
    })
}

fn dedup_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
