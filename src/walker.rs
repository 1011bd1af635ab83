//! Depth-first tree traversal.
//!
//! Walks a root path with `walkdir` in contents-first order: every child of
//! a directory is visited before the directory itself, and the root is
//! visited last. Children come in directory enumeration order; nothing is
//! sorted.
//!
//! Errors below the root (a subdirectory that cannot be listed, an entry
//! that disappears mid-walk) are handed to [`Visitor::skipped`] and the walk
//! continues with the siblings. Under [`ErrorPolicy::Strict`] the first such
//! error ends the walk instead. An unreadable or missing root is always fatal.

use std::borrow::Cow;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{FindError, Result};

/// One filesystem entry reached by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Path as reached from the root, i.e. the root joined with each segment.
    pub path: PathBuf,
    /// Final path segment, or the whole path when it has none (e.g. `.`).
    pub name: OsString,
    pub is_dir: bool,
    /// Distance from the root; the root is 0.
    pub depth: usize,
}

impl Node {
    fn from_entry(entry: &walkdir::DirEntry) -> Self {
        Self {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_os_string(),
            is_dir: entry.file_type().is_dir(),
            depth: entry.depth(),
        }
    }

    pub fn base_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}

/// What to do when an entry below the root cannot be traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report the error to the visitor and keep walking.
    #[default]
    Continue,
    /// Stop the walk and return the error.
    Strict,
}

/// Receives nodes and per-node errors from [`walk`].
pub trait Visitor {
    /// Called once per node, children before their parent.
    fn visit(&mut self, node: &Node) -> Result<()>;

    /// Called for an entry that could not be traversed.
    fn skipped(&mut self, error: FindError);
}

/// Walks `root`, handing every node to `visitor`.
///
/// Returns the number of nodes visited. Visitor errors stop the walk.
pub fn walk(root: &Path, policy: ErrorPolicy, visitor: &mut impl Visitor) -> Result<usize> {
    let mut visited = 0;

    for entry in WalkDir::new(root).contents_first(true) {
        match entry {
            Ok(entry) => {
                visitor.visit(&Node::from_entry(&entry))?;
                visited += 1;
            }
            Err(err) if err.depth() == 0 => {
                return Err(FindError::file_system(root, io::Error::from(err)));
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let error = FindError::entry("traverse", path, io::Error::from(err));
                if policy == ErrorPolicy::Strict {
                    return Err(error);
                }
                debug!(%error, "skipping entry");
                visitor.skipped(error);
            }
        }
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Default)]
    struct Recorder {
        nodes: Vec<Node>,
        errors: Vec<FindError>,
    }

    impl Visitor for Recorder {
        fn visit(&mut self, node: &Node) -> Result<()> {
            self.nodes.push(node.clone());
            Ok(())
        }

        fn skipped(&mut self, error: FindError) {
            self.errors.push(error);
        }
    }

    /// A tree with one subdirectory that cannot be listed. Permissions are
    /// restored on drop so the temp dir can be removed.
    #[cfg(unix)]
    struct LockedTree {
        dir: tempfile::TempDir,
        locked: PathBuf,
    }

    #[cfg(unix)]
    impl LockedTree {
        /// Returns `None` when the process can list the locked directory
        /// anyway, e.g. when running as root.
        fn new() -> Option<Self> {
            use std::os::unix::fs::PermissionsExt;

            let dir = tempfile::tempdir().unwrap();
            let root = dir.path();
            fs::write(root.join("a.txt"), "").unwrap();
            fs::create_dir_all(root.join("open")).unwrap();
            fs::write(root.join("open/b.txt"), "").unwrap();
            let locked = root.join("locked");
            fs::create_dir(&locked).unwrap();
            fs::write(locked.join("hidden.txt"), "").unwrap();
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

            let tree = Self { dir, locked };
            if fs::read_dir(&tree.locked).is_ok() {
                return None;
            }
            Some(tree)
        }
    }

    #[cfg(unix)]
    impl Drop for LockedTree {
        fn drop(&mut self) {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.locked, fs::Permissions::from_mode(0o755));
        }
    }

    fn position(rec: &Recorder, path: &Path) -> usize {
        rec.nodes.iter().position(|n| n.path == path).unwrap()
    }

    #[test]
    fn visits_every_entry_including_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/b.txt"), "").unwrap();

        let mut rec = Recorder::default();
        let count = walk(root, ErrorPolicy::Continue, &mut rec).unwrap();

        assert_eq!(count, 4);
        let mut names: Vec<_> = rec.nodes.iter().map(|n| n.path.clone()).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                root.to_path_buf(),
                root.join("a.txt"),
                root.join("sub"),
                root.join("sub/b.txt"),
            ]
        );
        assert!(rec.errors.is_empty());
    }

    #[test]
    fn children_come_before_their_parent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/deeper/leaf.txt"), "").unwrap();

        let mut rec = Recorder::default();
        walk(root, ErrorPolicy::Continue, &mut rec).unwrap();

        let leaf = position(&rec, &root.join("sub/deeper/leaf.txt"));
        let deeper = position(&rec, &root.join("sub/deeper"));
        let sub = position(&rec, &root.join("sub"));
        assert!(leaf < deeper && deeper < sub);
        assert_eq!(rec.nodes.last().map(|n| n.depth), Some(0));
    }

    #[test]
    fn file_root_is_a_single_node() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, "x").unwrap();

        let mut rec = Recorder::default();
        walk(&file, ErrorPolicy::Continue, &mut rec).unwrap();

        assert_eq!(rec.nodes.len(), 1);
        assert_eq!(rec.nodes[0].base_name(), "only.txt");
        assert!(!rec.nodes[0].is_dir);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = Recorder::default();
        let err = walk(&dir.path().join("nope"), ErrorPolicy::Continue, &mut rec).unwrap_err();
        assert!(matches!(err, FindError::FileSystem { .. }));
        assert!(rec.nodes.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_directory_is_skipped_and_siblings_visited() {
        let Some(tree) = LockedTree::new() else {
            return;
        };
        let root = tree.dir.path();

        let mut rec = Recorder::default();
        walk(root, ErrorPolicy::Continue, &mut rec).unwrap();

        assert_eq!(rec.errors.len(), 1);
        assert!(rec.errors[0].is_per_entry());
        assert_eq!(rec.errors[0].path(), Some(tree.locked.as_path()));
        let paths: Vec<_> = rec.nodes.iter().map(|n| n.path.clone()).collect();
        assert!(paths.contains(&root.join("a.txt")));
        assert!(paths.contains(&root.join("open/b.txt")));
        assert!(!paths.contains(&tree.locked.join("hidden.txt")));
        assert_eq!(rec.nodes.last().map(|n| n.depth), Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn strict_policy_stops_at_unlistable_directory() {
        let Some(tree) = LockedTree::new() else {
            return;
        };

        let mut rec = Recorder::default();
        let err = walk(tree.dir.path(), ErrorPolicy::Strict, &mut rec).unwrap_err();

        assert!(matches!(err, FindError::Entry { action: "traverse", .. }));
        assert_eq!(err.path(), Some(tree.locked.as_path()));
        assert!(rec.errors.is_empty());
        assert!(!rec.nodes.iter().any(|n| n.depth == 0));
    }

    #[test]
    fn dot_root_keeps_its_name() {
        let node = Node {
            path: PathBuf::from("."),
            name: OsString::from("."),
            is_dir: true,
            depth: 0,
        };
        assert_eq!(node.base_name(), ".");
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        struct Failing(usize);
        impl Visitor for Failing {
            fn visit(&mut self, _node: &Node) -> Result<()> {
                self.0 += 1;
                Err(FindError::Output(io::Error::other("closed")))
            }
            fn skipped(&mut self, _error: FindError) {}
        }

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::write(dir.path().join("b"), "").unwrap();

        let mut failing = Failing(0);
        assert!(walk(dir.path(), ErrorPolicy::Continue, &mut failing).is_err());
        assert_eq!(failing.0, 1);
    }
}
