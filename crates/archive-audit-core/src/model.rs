use ahash::AHashMap;

pub type ArchiveId = i64;
pub type FolderId = i64;
pub type RecordId = i64;

/// One folder of an archive, built from every link row that names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    /// Direct parents, one per link row, in load order. Empty for an archive root.
    pub parent_ids: Vec<FolderId>,
    /// Set when at least one link row placed this folder at the archive top.
    pub has_root_link: bool,
    /// One absolute path per successfully resolved parent chain.
    pub resolved_paths: Vec<String>,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            has_root_link: false,
            resolved_paths: Vec::new(),
        }
    }

    /// A folder with no parents, or with any root link, sits at the top of
    /// the archive. Ancestor walks stop here.
    pub fn is_root(&self) -> bool {
        self.has_root_link || self.parent_ids.is_empty()
    }
}

/// A record placed under one parent folder. A record linked into several
/// folders shows up as several links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLink {
    pub record_id: RecordId,
    pub name: String,
    pub parent_folder_id: FolderId,
}

/// Folders of a single archive keyed by id, iterated in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct FolderTree {
    folders: Vec<Folder>,
    index: AHashMap<FolderId, usize>,
}

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one folder-link edge. The first edge for an id creates the folder;
    /// later edges only append their parent. A `None` parent marks a root link.
    pub fn insert_link(&mut self, id: FolderId, name: &str, parent_id: Option<FolderId>) {
        let position = match self.index.get(&id) {
            Some(&position) => position,
            None => {
                self.folders.push(Folder::new(id, name));
                self.index.insert(id, self.folders.len() - 1);
                self.folders.len() - 1
            }
        };
        match parent_id {
            Some(parent_id) => self.folders[position].parent_ids.push(parent_id),
            None => self.folders[position].has_root_link = true,
        }
    }

    /// Insert a fully formed folder, replacing any folder with the same id.
    pub fn insert(&mut self, folder: Folder) {
        match self.index.get(&folder.id) {
            Some(&position) => self.folders[position] = folder,
            None => {
                self.index.insert(folder.id, self.folders.len());
                self.folders.push(folder);
            }
        }
    }

    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.index.get(&id).map(|&position| &self.folders[position])
    }

    pub fn contains(&self, id: FolderId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Folder> {
        self.folders.iter()
    }

    pub(crate) fn folder_at(&self, position: usize) -> &Folder {
        &self.folders[position]
    }

    pub(crate) fn set_resolved_paths(&mut self, position: usize, paths: Vec<String>) {
        self.folders[position].resolved_paths = paths;
    }
}
