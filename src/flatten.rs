// ABOUTME: Flattens a nested deployment file tree into downloadable entries
// ABOUTME: Depth-first in source order, slash-joined paths, uid-less files dropped

use crate::model::{FlatEntry, TreeEntry};

pub fn flatten(entries: &[TreeEntry]) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    flatten_into(entries, "", &mut out);
    out
}

fn flatten_into(entries: &[TreeEntry], prefix: &str, out: &mut Vec<FlatEntry>) {
    for entry in entries {
        let path = join(prefix, entry.name());
        match entry {
            TreeEntry::Directory { children, .. } => flatten_into(children, &path, out),
            TreeEntry::File {
                content_id: Some(uid),
                ..
            } if !uid.is_empty() => out.push(FlatEntry {
                path,
                content_id: uid.clone(),
            }),
            TreeEntry::File { .. } => {}
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
