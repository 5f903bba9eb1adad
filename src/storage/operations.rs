//! Storage operations
//!
//! Derives directory semantics from the flat object listing: existence
//! state, immediate children and subtree removal.

use log::info;
use std::collections::BTreeMap;
use std::io;

use crate::navigate::FsPath;
use crate::storage::object_store::ObjectStore;
use crate::storage::results::{FileStatus, PathState};

/// Existence state of `path`.
///
/// An object at the path's key is a file. A marker object, or any object
/// below the path's prefix, makes it a directory. The root always is one.
pub fn path_state<S: ObjectStore + ?Sized>(store: &S, path: &FsPath) -> io::Result<PathState> {
    if path.is_root() {
        return Ok(PathState::Directory);
    }

    if store.get(&path.object_key())?.is_some() {
        return Ok(PathState::File);
    }

    if store.get(&path.marker_key())?.is_some() || !store.list(&path.marker_key())?.is_empty() {
        return Ok(PathState::Directory);
    }

    Ok(PathState::Absent)
}

/// Size of the file object at `path`, if it is one
pub fn file_len<S: ObjectStore + ?Sized>(store: &S, path: &FsPath) -> io::Result<Option<u64>> {
    Ok(store
        .get(&path.object_key())?
        .map(|bytes| bytes.len() as u64))
}

/// Immediate children of a directory, sorted by name.
///
/// Directories implied only by deeper keys are reported too.
pub fn list_children<S: ObjectStore + ?Sized>(
    store: &S,
    dir: &FsPath,
) -> io::Result<Vec<FileStatus>> {
    let prefix = dir.marker_key();
    let mut children: BTreeMap<String, FileStatus> = BTreeMap::new();

    for object in store.list(&prefix)? {
        let rest = &object.key[prefix.len()..];
        if rest.is_empty() {
            // The directory's own marker.
            continue;
        }

        match rest.split_once('/') {
            Some((name, _)) if !name.is_empty() => {
                children.insert(name.to_string(), FileStatus::directory(dir.child(name)));
            }
            Some(_) => {}
            None => {
                children
                    .entry(rest.to_string())
                    .or_insert_with(|| FileStatus::file(dir.child(rest), object.size));
            }
        }
    }

    Ok(children.into_values().collect())
}

/// Whether the directory holds anything besides its own marker
pub fn has_children<S: ObjectStore + ?Sized>(store: &S, dir: &FsPath) -> io::Result<bool> {
    let prefix = dir.marker_key();
    Ok(store.list(&prefix)?.iter().any(|o| o.key != prefix))
}

/// Removes every object under a directory, marker included. Returns the
/// number of objects deleted.
pub fn delete_tree<S: ObjectStore + ?Sized>(store: &S, dir: &FsPath) -> io::Result<usize> {
    let mut deleted = 0;
    for object in store.list(&dir.marker_key())? {
        if store.delete(&object.key)? {
            deleted += 1;
        }
    }

    info!("Deleted {} object(s) under {}", deleted, dir);
    Ok(deleted)
}
