use crate::model::{ArchiveId, Folder, FolderId, FolderTree};
use crate::observer::AuditObserver;
use ahash::AHashSet;

/// Outcome of walking one parent chain up to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Resolved(String),
    Dangling { missing_id: FolderId },
    Cyclic { repeated_id: FolderId },
    TooDeep,
}

/// Every folder path produced for an archive, plus the structural failures
/// met on the way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderResolution {
    /// One entry per (folder, resolved chain), duplicates retained.
    pub folder_paths: Vec<String>,
    pub dangling_references: usize,
    pub cyclic_chains: usize,
}

impl FolderResolution {
    pub fn has_structure_errors(&self) -> bool {
        self.dangling_references > 0 || self.cyclic_chains > 0
    }
}

/// Resolve every folder of `tree` to its absolute paths.
///
/// A root resolves to `/<name>`. Every direct parent link then adds one
/// more path, in link order, so a root with a stray parent link keeps its
/// root path. Above the direct parent only the first parent
/// of each ancestor is followed, so a folder yields at most one path per
/// link. A chain that hits a missing folder, revisits a folder, or grows past
/// `max_depth` ancestors is dropped and counted.
pub fn resolve_folder_paths(
    tree: &mut FolderTree,
    archive_id: ArchiveId,
    max_depth: usize,
    observer: &dyn AuditObserver,
) -> FolderResolution {
    let mut resolution = FolderResolution::default();

    for position in 0..tree.len() {
        let folder = tree.folder_at(position);
        let mut paths = Vec::with_capacity(folder.parent_ids.len().max(1));

        if folder.is_root() {
            paths.push(format!("/{}", folder.name));
        }

        for &parent_id in &folder.parent_ids {
            match walk_chain(tree, folder, parent_id, max_depth) {
                ChainOutcome::Resolved(path) => paths.push(path),
                ChainOutcome::Dangling { missing_id } => {
                    resolution.dangling_references += 1;
                    observer.on_dangling_reference(archive_id, folder.id, missing_id);
                }
                ChainOutcome::Cyclic { repeated_id } => {
                    resolution.cyclic_chains += 1;
                    observer.on_cyclic_chain(archive_id, folder.id, repeated_id);
                }
                ChainOutcome::TooDeep => {
                    resolution.cyclic_chains += 1;
                    observer.on_walk_depth_exceeded(archive_id, folder.id, max_depth);
                }
            }
        }

        resolution.folder_paths.extend(paths.iter().cloned());
        tree.set_resolved_paths(position, paths);
    }

    resolution
}

/// Walk from `folder` through `parent_id` to a root, following the first
/// parent of every ancestor that is not itself a root.
pub fn walk_chain(
    tree: &FolderTree,
    folder: &Folder,
    parent_id: FolderId,
    max_depth: usize,
) -> ChainOutcome {
    let mut segments: Vec<&str> = vec![folder.name.as_str()];
    let mut visited: AHashSet<FolderId> = AHashSet::new();
    visited.insert(folder.id);

    let mut cursor = Some(parent_id);
    while let Some(id) = cursor {
        let Some(parent) = tree.get(id) else {
            return ChainOutcome::Dangling { missing_id: id };
        };
        if !visited.insert(id) {
            return ChainOutcome::Cyclic { repeated_id: id };
        }
        // `segments` holds the folder plus every ancestor pushed so far.
        if segments.len() > max_depth {
            return ChainOutcome::TooDeep;
        }
        segments.push(parent.name.as_str());
        cursor = if parent.is_root() {
            None
        } else {
            parent.parent_ids.first().copied()
        };
    }

    let mut path = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
    for segment in segments.iter().rev() {
        path.push('/');
        path.push_str(segment);
    }
    ChainOutcome::Resolved(path)
}
