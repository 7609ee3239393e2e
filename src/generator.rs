//! Missing-key generation across the languages of a generation group.
//!
//! Documents that share a `generator.id` form a group. For each group the
//! baseline language's document is blanked into a skeleton, every other
//! language's document is merged onto it, and the result is handed to a
//! [`Persist`] collaborator addressed by the target document's origin.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{
    Error,
    PersistError,
};
use crate::input::{
    RawRecord,
    document_value,
};
use crate::store::{
    Store,
    deep_merge,
    skeleton,
};
use crate::types::{
    GroupId,
    Origin,
};

/// Receives generated documents.
pub trait Persist {
    /// Write `document` to the place identified by `origin`.
    fn persist(&mut self, origin: &Origin, document: &Value) -> Result<(), PersistError>;
}

impl<F> Persist for F
where
    F: FnMut(&Origin, &Value) -> Result<(), PersistError>,
{
    fn persist(&mut self, origin: &Origin, document: &Value) -> Result<(), PersistError> {
        self(origin, document)
    }
}

/// Keeps generated documents in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub documents: Vec<(Origin, Value)>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persist for MemorySink {
    fn persist(&mut self, origin: &Origin, document: &Value) -> Result<(), PersistError> {
        self.documents.push((origin.clone(), document.clone()));
        Ok(())
    }
}

/// Records of one generation group, keyed by language.
#[derive(Debug, Default)]
struct Group<'a> {
    /// First record per language, in arrival order
    members: Vec<&'a RawRecord>,
}

impl<'a> Group<'a> {
    fn member(&self, code: &str) -> Option<&'a RawRecord> {
        self.members.iter().copied().find(|record| record.code == code)
    }

    fn add(&mut self, record: &'a RawRecord) {
        if let Some(existing) = self.member(&record.code) {
            tracing::warn!(
                code = %record.code,
                origin = %record.origin,
                first = %existing.origin,
                "Duplicate document in generation group, skipping"
            );
            return;
        }
        self.members.push(record);
    }
}

/// Index `records` by generation group, keeping groups in order of first appearance.
fn index_groups(records: &[RawRecord]) -> Vec<(&GroupId, Group<'_>)> {
    let mut positions: HashMap<&GroupId, usize> = HashMap::new();
    let mut groups: Vec<(&GroupId, Group<'_>)> = Vec::new();

    for record in records {
        let Some(meta) = &record.generation else {
            continue;
        };
        let position = *positions.entry(&meta.id).or_insert_with(|| {
            groups.push((&meta.id, Group::default()));
            groups.len() - 1
        });
        if let Some((_, group)) = groups.get_mut(position) {
            group.add(record);
        }
    }

    groups
}

/// Generate missing keys for every language sharing a group with `baseline`.
///
/// Returns the number of documents handed to `sink`.
///
/// # Errors
/// `Error::Persist` when the sink fails. Generation stops at the first failure.
pub fn generate<P>(store: &Store, baseline: &str, sink: &mut P) -> Result<usize, Error>
where
    P: Persist + ?Sized,
{
    let mut emitted = 0;

    for (id, group) in index_groups(store.records()) {
        let Some(base) = group.member(baseline) else {
            continue;
        };
        if base.generation.as_ref().is_some_and(|meta| meta.ignore) {
            tracing::debug!(group = %id, baseline, "Baseline document is ignored, skipping group");
            continue;
        }

        let targets: Vec<&RawRecord> = group
            .members
            .iter()
            .copied()
            .filter(|record| record.code != baseline)
            .filter(|record| record.generation.as_ref().is_some_and(|meta| !meta.ignore))
            .collect();
        if targets.is_empty() {
            tracing::debug!(group = %id, baseline, "No target documents in group");
            continue;
        }

        let base_skeleton = skeleton(&base.body);
        for target in targets {
            let mut body = base_skeleton.clone();
            deep_merge(&mut body, target.body.clone());

            let document = document_value(&target.code, &body, target.generation.as_ref());
            tracing::debug!(
                group = %id,
                code = %target.code,
                origin = %target.origin,
                "Writing generated document"
            );
            sink.persist(&target.origin, &document)
                .map_err(|source| Error::Persist { origin: target.origin.clone(), source })?;
            emitted += 1;
        }
    }

    Ok(emitted)
}
