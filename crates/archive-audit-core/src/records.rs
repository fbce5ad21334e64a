use crate::model::{ArchiveId, FolderTree, RecordLink};
use crate::observer::AuditObserver;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordResolution {
    /// One entry per (record link, parent path), duplicates retained.
    pub file_paths: Vec<String>,
    pub orphan_records: usize,
}

impl RecordResolution {
    pub fn has_structure_errors(&self) -> bool {
        self.orphan_records > 0
    }
}

/// Expand every record link into `<parent path>/<record name>` for each
/// resolved path of its parent folder.
///
/// `tree` must already be resolved. A link to a folder that was never loaded
/// counts as an orphan. A link to a folder with no resolved paths emits
/// nothing and is not counted again; the folder side already flagged it.
pub fn resolve_record_paths(
    tree: &FolderTree,
    records: &[RecordLink],
    archive_id: ArchiveId,
    observer: &dyn AuditObserver,
) -> RecordResolution {
    let mut resolution = RecordResolution::default();

    for record in records {
        match tree.get(record.parent_folder_id) {
            Some(parent) => {
                resolution.file_paths.extend(
                    parent
                        .resolved_paths
                        .iter()
                        .map(|path| format!("{}/{}", path, record.name)),
                );
            }
            None => {
                resolution.orphan_records += 1;
                observer.on_orphan_record(archive_id, record.record_id, record.parent_folder_id);
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Folder;
    use crate::observer::SilentObserver;

    fn link(record_id: i64, name: &str, parent: i64) -> RecordLink {
        RecordLink {
            record_id,
            name: name.to_string(),
            parent_folder_id: parent,
        }
    }

    fn folder_with_paths(id: i64, name: &str, paths: &[&str]) -> Folder {
        let mut folder = Folder::new(id, name);
        folder.resolved_paths = paths.iter().map(|p| p.to_string()).collect();
        folder
    }

    #[test]
    fn test_file_path_fans_out_over_parent_paths() {
        let mut tree = FolderTree::new();
        tree.insert(folder_with_paths(1, "shared", &["/a", "/b"]));

        let resolution = resolve_record_paths(&tree, &[link(10, "doc.txt", 1)], 1, &SilentObserver);
        assert_eq!(
            resolution.file_paths,
            vec!["/a/doc.txt".to_string(), "/b/doc.txt".to_string()]
        );
        assert!(!resolution.has_structure_errors());
    }

    #[test]
    fn test_orphan_record_emits_nothing_and_flags() {
        let mut tree = FolderTree::new();
        tree.insert(folder_with_paths(1, "Home", &["/Home"]));

        let records = [link(10, "orphan.txt", 42), link(11, "kept.txt", 1)];
        let resolution = resolve_record_paths(&tree, &records, 1, &SilentObserver);
        assert_eq!(resolution.file_paths, vec!["/Home/kept.txt".to_string()]);
        assert_eq!(resolution.orphan_records, 1);
        assert!(resolution.has_structure_errors());
    }

    #[test]
    fn test_unresolved_parent_is_not_an_orphan() {
        let mut tree = FolderTree::new();
        tree.insert(folder_with_paths(1, "lost", &[]));

        let resolution = resolve_record_paths(&tree, &[link(10, "a.txt", 1)], 1, &SilentObserver);
        assert!(resolution.file_paths.is_empty());
        assert!(!resolution.has_structure_errors());
    }
}
