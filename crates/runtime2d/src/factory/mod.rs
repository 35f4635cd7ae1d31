//! Object factory: construction from text records, cloning, id
//! assignment, and the per-frame deferred add/delete queues.
//!
//! The factory is an explicitly constructed service owned by the
//! driver, not a singleton. It is the only place ids are assigned and
//! the only legal path for creating or destroying objects from inside
//! an update pass: scripts queue, the driver flushes once per frame.

pub(crate) mod parse;

use crate::core::Registries;
use crate::level::Level;
use crate::object::{
    Component, ComponentKind, Fields, GameObject, ObjectKey, ParseError,
};
use crate::scene::SceneError;
use log::{debug, trace, warn};
use parse::{LineCursor, RECORD_END};
use std::path::Path;

/// Component kinds carried over by [`Factory::clone_object`]. Bindings
/// that would make two objects fight over the same script state
/// (Logic, Controller, combat, inventory, lifetime) start fresh on the
/// clone instead.
const CLONABLE: &[ComponentKind] = &[
    ComponentKind::Transform,
    ComponentKind::RigidBody,
    ComponentKind::Collision,
    ComponentKind::Renderer,
    ComponentKind::Animate,
    ComponentKind::Lighting,
    ComponentKind::UiText,
    ComponentKind::LogicTargets,
];

/// Object construction and deferred lifecycle service.
pub struct Factory {
    next_id: u32,
    pending_add: Vec<GameObject>,
    pending_delete: Vec<ObjectKey>,
}

impl Factory {
    /// Create a factory with a fresh id counter.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending_add: Vec::new(),
            pending_delete: Vec::new(),
        }
    }

    /// Reset the id counter. Called only on explicit new-level
    /// boundaries (the scene codec does this before a load).
    pub fn reset_ids(&mut self) {
        self.next_id = 1;
    }

    /// The id the next constructed object will receive.
    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }

    fn assign_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Roll the counter back for a destroyed id, so the common
    /// delete-then-recreate pattern reuses it. Only the most recently
    /// assigned id rolls back; destroying an older object leaves the
    /// counter alone, keeping live ids unique.
    fn recycle_id(&mut self, id: u32) {
        if id + 1 == self.next_id {
            self.next_id = id;
        }
    }

    /// Parse one entity record from the cursor.
    ///
    /// Field order is fixed: Name, Tag, Layer, Active, then any subset
    /// of component blocks in any order, then `###`. Every failure
    /// below the Name line is recovered locally with defaults and a
    /// log line; an unreadable Name fails the whole record.
    pub(crate) fn parse_object(
        &mut self,
        cursor: &mut LineCursor<'_>,
        registries: &mut Registries,
    ) -> Result<GameObject, ParseError> {
        let name = cursor.expect_key("Name")?;
        let mut object = GameObject::new(name);

        match Self::header_value(cursor, "Tag") {
            Some(tag) => object.tag = tag,
            None => warn!("object '{}': missing Tag field, defaulting to empty", object.name),
        }
        match Self::header_value(cursor, "Layer") {
            Some(layer) => object.layer = layer,
            None => warn!(
                "object '{}': missing Layer field, defaulting to empty",
                object.name
            ),
        }
        match Self::header_value(cursor, "Active").as_deref() {
            Some("0") => object.set_active(false),
            Some("1") => object.set_active(true),
            Some(other) => {
                warn!(
                    "object '{}': bad Active value '{other}', defaulting to active",
                    object.name
                );
            }
            None => warn!(
                "object '{}': missing Active field, defaulting to active",
                object.name
            ),
        }

        if !object.tag.is_empty() {
            registries.tags.add(&object.tag);
        }
        if !object.layer.is_empty() {
            registries.layers.add(&object.layer);
        }

        while let Some(line) = cursor.peek_line() {
            if line == "{" {
                cursor.next_line();
                self.parse_component_block(cursor, &mut object)?;
            } else if line == RECORD_END {
                cursor.next_line();
                break;
            } else if line.starts_with("Name:") {
                // Missing terminator; don't eat the next record.
                warn!(
                    "object '{}': record not terminated with {RECORD_END}",
                    object.name
                );
                break;
            } else {
                warn!(
                    "line {}: unexpected '{line}' in record for '{}', skipped",
                    cursor.line_no(),
                    object.name
                );
                cursor.next_line();
            }
        }

        object.set_id(self.assign_id());
        trace!("constructed object '{}' with id {}", object.name, object.id());
        Ok(object)
    }

    /// A header line consumed only when its key matches; a mismatch
    /// leaves the line for the block loop.
    fn header_value(cursor: &mut LineCursor<'_>, key: &str) -> Option<String> {
        let line = cursor.peek_line()?;
        let (k, v) = line.split_once(':')?;
        if k.trim() != key {
            return None;
        }
        cursor.next_line();
        Some(v.trim().to_owned())
    }

    /// Parse one `{ Component: <Kind> ... }` block. Unknown kinds,
    /// unparseable fields, and duplicate kinds are all recovered here;
    /// only a record that ends mid-block propagates an error.
    fn parse_component_block(
        &mut self,
        cursor: &mut LineCursor<'_>,
        object: &mut GameObject,
    ) -> Result<(), ParseError> {
        let (key, kind_name) = cursor.next_kv()?;
        if key != "Component" {
            warn!(
                "line {}: component block missing 'Component:' line, block skipped",
                cursor.line_no()
            );
            Self::skip_block(cursor)?;
            return Ok(());
        }
        let kind = match ComponentKind::from_name(kind_name) {
            Some(kind) => kind,
            None => {
                warn!(
                    "object '{}': unknown component kind '{kind_name}', block skipped",
                    object.name
                );
                Self::skip_block(cursor)?;
                return Ok(());
            }
        };

        let mut fields = Fields::new();
        loop {
            let line = cursor.next_line().ok_or(ParseError::UnexpectedEnd)?;
            if line == "}" {
                break;
            }
            match line.split_once(':') {
                Some((k, v)) => fields.insert(k.trim(), v.trim()),
                None => warn!(
                    "line {}: malformed field line '{line}' in {kind} block, skipped",
                    cursor.line_no()
                ),
            }
        }

        let mut component = Component::new(kind);
        if let Err(error) = component.read_fields(&fields) {
            warn!(
                "object '{}': {kind} component failed to parse ({error}); using defaults",
                object.name
            );
        }
        if !object.add_component(component) {
            warn!(
                "object '{}': duplicate {kind} block ignored",
                object.name
            );
        }
        Ok(())
    }

    fn skip_block(cursor: &mut LineCursor<'_>) -> Result<(), ParseError> {
        loop {
            let line = cursor.next_line().ok_or(ParseError::UnexpectedEnd)?;
            if line == "}" {
                return Ok(());
            }
        }
    }

    /// Parse every record remaining in the cursor and add the results
    /// to the level. Broken records are skipped with a log line.
    pub(crate) fn parse_all(
        &mut self,
        cursor: &mut LineCursor<'_>,
        level: &mut Level,
        registries: &mut Registries,
    ) -> Vec<ObjectKey> {
        let mut keys = Vec::new();
        while !cursor.at_end() {
            match self.parse_object(cursor, registries) {
                Ok(object) => keys.push(level.add_object(object)),
                Err(error) => {
                    warn!(
                        "skipping unreadable object record near line {}: {error}",
                        cursor.line_no()
                    );
                    cursor.skip_record();
                }
            }
        }
        keys
    }

    /// Construct one record from text. Convenience over
    /// [`parse_object`](Self::parse_object) for callers holding a
    /// string rather than a file.
    pub fn object_from_str(
        &mut self,
        text: &str,
        registries: &mut Registries,
    ) -> Result<GameObject, ParseError> {
        let mut cursor = LineCursor::new(text);
        self.parse_object(&mut cursor, registries)
    }

    /// Parse every object record in a file and add them to the level.
    /// This is the file-backed spawn path used by external
    /// collaborators; an unopenable file is a structural failure.
    pub fn add_objects_from_file(
        &mut self,
        path: impl AsRef<Path>,
        level: &mut Level,
        registries: &mut Registries,
    ) -> Result<Vec<ObjectKey>, SceneError> {
        let text = std::fs::read_to_string(path)?;
        let mut cursor = LineCursor::new(&text);
        Ok(self.parse_all(&mut cursor, level, registries))
    }

    /// Field-by-field clone of a live object.
    ///
    /// Copies name (suffixed `_clone`), tag, layer, and active flag,
    /// then deep-copies each [`CLONABLE`] component through
    /// `copy_from`. The clone gets a fresh id as if freshly parsed and
    /// is returned unattached; callers insert it directly or hand it
    /// to [`queue_add`](Self::queue_add).
    pub fn clone_object(&mut self, source: ObjectKey, level: &Level) -> Option<GameObject> {
        let Some(original) = level.object(source) else {
            debug!("clone_object: stale source key, ignored");
            return None;
        };
        let mut clone = GameObject::new(format!("{}_clone", original.name));
        clone.tag = original.tag.clone();
        clone.layer = original.layer.clone();
        clone.set_active(original.active_flag());

        for &kind in CLONABLE {
            if let Some(component) = original.component(kind) {
                let mut fresh = Component::new(kind);
                fresh.copy_from(component);
                clone.add_component(fresh);
            }
        }

        clone.set_id(self.assign_id());
        Some(clone)
    }

    /// Queue an object for insertion at the next flush. Objects built
    /// by hand (id still zero) get their id here, so the id exists
    /// before the object becomes visible.
    pub fn queue_add(&mut self, mut object: GameObject) {
        if object.id() == 0 {
            object.set_id(self.assign_id());
        }
        self.pending_add.push(object);
    }

    /// Queue a live object for destruction at the next flush.
    pub fn queue_delete(&mut self, key: ObjectKey) {
        self.pending_delete.push(key);
    }

    /// Number of queued additions and deletions.
    pub fn pending(&self) -> (usize, usize) {
        (self.pending_add.len(), self.pending_delete.len())
    }

    /// Apply both queues to the level: all deletions first, then all
    /// additions, then clear. Called once per frame before scripts
    /// run, so no script ever observes a half-flushed queue.
    pub fn flush(&mut self, level: &mut Level) {
        let deletions = std::mem::take(&mut self.pending_delete);
        let deleted = deletions.len();
        for key in deletions {
            let mut ids = level.destroy(key);
            // Highest id first so a contiguous most-recent run rolls
            // the counter all the way back.
            ids.sort_unstable_by(|a, b| b.cmp(a));
            for id in ids {
                self.recycle_id(id);
            }
        }

        let additions = std::mem::take(&mut self.pending_add);
        let added = additions.len();
        for object in additions {
            level.add_object(object);
        }

        if deleted + added > 0 {
            trace!("flush: {deleted} deleted, {added} added");
        }
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}
