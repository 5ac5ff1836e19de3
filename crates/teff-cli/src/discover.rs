use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Collect every `*.root` file under `root`, sorted for a stable run order.
pub(crate) fn find_root_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dir_for_root_files(root, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk_dir_for_root_files(root: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let rd = fs::read_dir(root).with_context(|| format!("scanning {}", root.display()))?;
    for entry in rd {
        let entry = entry.with_context(|| format!("listing {}", root.display()))?;
        let ft = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;

        // Avoid symlink loops when scanning arbitrary storage trees.
        if ft.is_symlink() {
            continue;
        }

        let path = entry.path();
        if ft.is_dir() {
            walk_dir_for_root_files(&path, out)?;
            continue;
        }

        if ft.is_file()
            && let Some(ext) = path.extension().and_then(|s| s.to_str())
            && ext.eq_ignore_ascii_case("root")
        {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir().join(format!("teff-cli-{}-{}-{}", name, std::process::id(), nanos))
    }

    fn rm_rf(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[test]
    fn finds_nested_root_files_sorted() {
        let root = tmp_dir("find1");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("b/run2")).unwrap();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::write(root.join("b/run2/events_2.root"), b"").unwrap();
        std::fs::write(root.join("a/events_1.root"), b"").unwrap();
        std::fs::write(root.join("a/notes.txt"), b"").unwrap();

        let found = find_root_files(&root).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("a/events_1.root"));
        assert!(found[1].ends_with("b/run2/events_2.root"));

        rm_rf(&root);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let root = tmp_dir("find2");
        rm_rf(&root);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("Events.ROOT"), b"").unwrap();

        let found = find_root_files(&root).unwrap();
        assert_eq!(found.len(), 1);

        rm_rf(&root);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let root = tmp_dir("find3");
        rm_rf(&root);
        let err = find_root_files(&root).unwrap_err();
        assert!(format!("{err:#}").contains("scanning"));
    }
}
