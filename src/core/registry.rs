//! Global store of extracted records, keyed by qualified name.
//!
//! Files are merged in whatever order workers finish. When two files produce
//! the same qualified name, the record from the input listed first is kept,
//! so the outcome does not depend on scheduling.

use std::collections::HashMap;

use crate::core::extract::FileAnalysis;
use crate::core::model::{ClassParent, RecordId, TypeRecord, TypeReference};
use crate::issues::Issue;

/// Position of a record in the input: (input index, position within the file).
type Origin = (usize, usize);

/// A qualified name produced more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub name: String,
    /// Input index of the record that was kept.
    pub kept: usize,
    /// Input index of the record that was dropped.
    pub dropped: usize,
}

#[derive(Debug, Default)]
pub struct TypeRegistry {
    records: Vec<TypeRecord>,
    origins: Vec<Origin>,
    by_name: HashMap<String, RecordId>,
    issues: Vec<Issue>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.origins.clear();
        self.by_name.clear();
        self.issues.clear();
    }

    /// Merge the results of input number `input`.
    pub fn merge(&mut self, input: usize, analysis: FileAnalysis) -> Vec<Collision> {
        self.issues.extend(analysis.issues);

        analysis
            .records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| self.insert((input, position), record))
            .collect()
    }

    fn insert(&mut self, origin: Origin, record: TypeRecord) -> Option<Collision> {
        let name = record.pretty_name().to_string();

        let Some(&id) = self.by_name.get(&name) else {
            let id = RecordId(self.records.len());
            self.records.push(record);
            self.origins.push(origin);
            self.by_name.insert(name, id);
            return None;
        };

        let existing = self.origins[id.0];
        if origin < existing {
            self.records[id.0] = record;
            self.origins[id.0] = origin;
            Some(Collision {
                name,
                kept: origin.0,
                dropped: existing.0,
            })
        } else {
            Some(Collision {
                name,
                kept: existing.0,
                dropped: origin.0,
            })
        }
    }

    pub fn push_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Put records (and issues) in input order. Ids change, so call this
    /// before resolving references.
    pub fn sort_by_input(&mut self) {
        let mut entries: Vec<(Origin, TypeRecord)> = self
            .origins
            .drain(..)
            .zip(self.records.drain(..))
            .collect();
        entries.sort_by_key(|(origin, _)| *origin);

        self.by_name.clear();
        for (index, (origin, record)) in entries.into_iter().enumerate() {
            self.by_name
                .insert(record.pretty_name().to_string(), RecordId(index));
            self.origins.push(origin);
            self.records.push(record);
        }

        self.issues
            .sort_by(|a, b| a.source_file.cmp(&b.source_file).then(a.line.cmp(&b.line)));
    }

    pub fn lookup(&self, name: &str) -> Option<RecordId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: RecordId) -> Option<&TypeRecord> {
        self.records.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&TypeRecord> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Record a reference points at, by its resolved id or else by name.
    pub fn resolve_reference(&self, reference: &TypeReference) -> Option<&TypeRecord> {
        match reference.resolved() {
            Some(id) => self.get(id),
            None => self.find(reference.name()),
        }
    }

    /// Registered record of a class parent.
    pub fn parent_record(&self, parent: &ClassParent) -> Option<&TypeRecord> {
        self.resolve_reference(&parent.type_ref)
    }

    pub fn records(&self) -> &[TypeRecord] {
        &self.records
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Records for in-place reference binding, together with the name index.
    pub(crate) fn records_and_index(&mut self) -> (&mut [TypeRecord], &HashMap<String, RecordId>) {
        (&mut self.records, &self.by_name)
    }

    pub fn into_parts(self) -> (Vec<TypeRecord>, Vec<Issue>) {
        (self.records, self.issues)
    }
}
