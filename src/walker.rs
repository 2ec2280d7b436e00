use crate::errors::Error;
use ignore::{DirEntry, WalkBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazily enumerates the regular files under `root`.
///
/// Every call starts a fresh traversal. Hidden files and `.gitignore` rules are
/// not consulted, symbolic links are never followed, and any entry below the
/// root whose name is in `excluded` is pruned together with its subtree.
/// Entries that cannot be read are logged at debug level and skipped.
pub fn walk(
    root: &Path,
    recursive: bool,
    excluded: &BTreeSet<String>,
) -> impl Iterator<Item = PathBuf> + use<> {
    let excluded = excluded.clone();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(if recursive { None } else { Some(1) })
        .filter_entry(move |entry| !is_excluded(entry, &excluded));

    builder.build().filter_map(|entry| match entry {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            is_file.then(|| entry.into_path())
        }
        Err(err) => {
            debug!(error = %Error::from(err), "skipping entry");
            None
        }
    })
}

fn is_excluded(entry: &DirEntry, excluded: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(set: &[&str]) -> BTreeSet<String> {
        set.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(root: &Path, recursive: bool, excluded: &BTreeSet<String>) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walk(root, recursive, excluded)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("etc/nginx")).unwrap();
        fs::create_dir_all(root.join("deep/a/b/node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("top.conf"), "x").unwrap();
        fs::write(root.join(".hidden.conf"), "x").unwrap();
        fs::write(root.join("etc/nginx/site.conf"), "x").unwrap();
        fs::write(root.join("deep/a/b/node_modules/pkg/index.conf"), "x").unwrap();
        fs::write(root.join(".git/config"), "x").unwrap();
        temp_dir
    }

    #[test]
    fn test_recursive_walk_is_exhaustive() {
        let temp_dir = fixture();
        let files = sorted(temp_dir.path(), true, &BTreeSet::new());
        assert_eq!(files.len(), 5);
        assert!(files.contains(&PathBuf::from(".hidden.conf")));
    }

    #[test]
    fn test_excluded_names_prune_at_any_depth() {
        let temp_dir = fixture();
        let excluded = names(&[".git", "node_modules"]);
        let files = sorted(temp_dir.path(), true, &excluded);
        assert_eq!(
            files,
            vec![
                PathBuf::from(".hidden.conf"),
                PathBuf::from("etc/nginx/site.conf"),
                PathBuf::from("top.conf"),
            ]
        );
    }

    #[test]
    fn test_exclusion_matches_whole_names_only() {
        let temp_dir = fixture();
        let files = sorted(temp_dir.path(), true, &names(&["nginx-old", "git"]));
        assert!(files.contains(&PathBuf::from("etc/nginx/site.conf")));
        assert!(files.contains(&PathBuf::from(".git/config")));
    }

    #[test]
    fn test_non_recursive_walk_stays_at_top_level() {
        let temp_dir = fixture();
        let files = sorted(temp_dir.path(), false, &BTreeSet::new());
        assert_eq!(
            files,
            vec![PathBuf::from(".hidden.conf"), PathBuf::from("top.conf")]
        );
    }

    #[test]
    fn test_root_named_like_exclusion_is_still_walked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("node_modules");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "x").unwrap();

        let files = sorted(&root, true, &names(&["node_modules"]));
        assert_eq!(files, vec![PathBuf::from("a.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), root.join("dangling.txt")).unwrap();

        let files = sorted(root, true, &BTreeSet::new());
        assert_eq!(files, vec![PathBuf::from("real.txt")]);
    }
}
