//! Parallel object/profile bookkeeping for one descriptor kind.
//!
//! `objects[i]` and `profiles[i]` always describe the same scene object; every
//! mutation pushes or pops both sequences together.

use std::marker::PhantomData;

use serde::Serialize;
use shared::{parse_batch, subdivide, BoxDescriptor, ClauseError, ProfileError};

use crate::scene::{ObjectId, Placeable, SceneGraph};

/// Outcome of appending a batch
#[derive(Debug, Clone, Default)]
pub struct AppendReport {
    /// Handles of the objects added, in batch order
    pub added: Vec<ObjectId>,
    /// Clauses that were skipped
    pub failures: Vec<ClauseError>,
}

impl AppendReport {
    pub fn to_json(&self) -> serde_json::Value {
        #[derive(Serialize)]
        struct Failure<'a> {
            index: usize,
            clause: &'a str,
            error: String,
        }

        let failures: Vec<Failure> = self
            .failures
            .iter()
            .map(|f| Failure {
                index: f.index,
                clause: &f.clause,
                error: f.error.to_string(),
            })
            .collect();
        serde_json::json!({
            "added": self.added.len(),
            "ids": self.added,
            "failures": failures,
        })
    }
}

/// Ordered registry of live objects and their canonical profiles
#[derive(Debug)]
pub struct Registry<T> {
    objects: Vec<ObjectId>,
    profiles: Vec<String>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            profiles: Vec::new(),
            _kind: PhantomData,
        }
    }
}

impl<T: Placeable> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// (handle, canonical profile) pairs in order
    pub fn entries(&self) -> impl Iterator<Item = (&ObjectId, &str)> {
        self.objects
            .iter()
            .zip(self.profiles.iter().map(String::as_str))
    }

    /// Parse a batch and add every well-formed clause to the scene and the registry.
    /// Malformed clauses are logged and skipped.
    pub fn append<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, text: &str) -> AppendReport {
        let batch = parse_batch::<T>(text);
        for failure in &batch.failures {
            tracing::warn!("Skipping {} {failure}", T::KIND);
        }

        let mut added = Vec::with_capacity(batch.items.len());
        for item in &batch.items {
            let id = item.place(scene);
            self.objects.push(id.clone());
            self.profiles.push(item.profile().to_string());
            added.push(id);
        }

        tracing::debug!(
            "Added {} {}(s), skipped {}, total {}",
            added.len(),
            T::KIND,
            batch.failures.len(),
            self.len()
        );

        AppendReport {
            added,
            failures: batch.failures,
        }
    }

    /// Remove the most recently added entry. No-op on an empty registry.
    pub fn remove_last<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> Option<ObjectId> {
        let id = self.objects.pop()?;
        self.profiles.pop();
        if !scene.remove(&id) {
            tracing::warn!("{} {id} was already gone from the scene", T::KIND);
        }
        Some(id)
    }

    /// Remove every entry, last first. Returns how many were removed.
    pub fn remove_all<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> usize {
        let mut removed = 0;
        while self.remove_last(scene).is_some() {
            removed += 1;
        }
        if removed > 0 {
            tracing::debug!("Removed all {removed} {}(s)", T::KIND);
        }
        removed
    }

    /// Canonical profiles joined with `;`
    pub fn export(&self) -> String {
        self.profiles.join(";")
    }
}

impl Registry<BoxDescriptor> {
    /// Replace every box with its 8 octants.
    ///
    /// The refined batch is derived before anything is removed, so an error leaves
    /// the registry untouched.
    pub fn refine<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
    ) -> Result<AppendReport, ProfileError> {
        let refined = subdivide(&self.profiles)?;
        self.remove_all(scene);
        let report = self.append(scene, &refined);
        tracing::info!("Refined boxes: now {}", self.len());
        Ok(report)
    }
}
