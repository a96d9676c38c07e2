use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::vec;

/// A tree of text sources: interior nodes are traversed, leaves are read line by line.
pub trait CorpusTree {
    type Node;
    type Lines: Iterator<Item = io::Result<String>>;

    fn children(&self, node: &Self::Node) -> io::Result<Vec<Self::Node>>;
    fn is_leaf(&self, node: &Self::Node) -> bool;
    fn open(&self, node: &Self::Node) -> io::Result<Self::Lines>;
}

/// Walks the tree depth-first and returns every leaf under `root`.
///
/// A leaf root is returned as-is. Children are visited in the order the tree
/// reports them.
pub fn collect_leaves<T>(tree: &T, root: T::Node) -> io::Result<Vec<T::Node>>
where
    T: CorpusTree + ?Sized,
    T::Node: std::fmt::Debug,
{
    let mut leaves = Vec::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if tree.is_leaf(&node) {
            leaves.push(node);
            continue;
        }
        log::debug!("corpus directory {:?}", node);
        let mut children = tree.children(&node)?;
        children.reverse();
        pending.extend(children);
    }
    Ok(leaves)
}

/// Returns true for lines that carry no content: empty lines and document
/// boundary markers.
pub fn is_skipped(line: &str, skip_prefixes: &[String]) -> bool {
    line.is_empty() || skip_prefixes.iter().any(|p| line.starts_with(p.as_str()))
}

/// Filesystem corpus rooted anywhere on disk. Directories are interior nodes.
#[derive(Clone, Debug, Default)]
pub struct FsCorpus;

impl CorpusTree for FsCorpus {
    type Node = PathBuf;
    type Lines = FileLines;

    /// Symlinked directories below the root are not descended into.
    /// Symlinked files are read.
    fn children(&self, node: &PathBuf) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(node)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_symlink() && path.is_dir() {
                log::debug!("skipping symlinked directory {}", path.display());
                continue;
            }
            entries.push(path);
        }
        entries.sort();
        Ok(entries)
    }

    fn is_leaf(&self, node: &PathBuf) -> bool {
        !node.is_dir()
    }

    fn open(&self, node: &PathBuf) -> io::Result<FileLines> {
        let file = File::open(node)?;
        Ok(FileLines {
            reader: BufReader::new(file),
            buf: Vec::new(),
        })
    }
}

/// Line iterator over a file. Invalid UTF-8 is replaced rather than rejected.
pub struct FileLines {
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl Iterator for FileLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut line = String::from_utf8_lossy(&self.buf).into_owned();
                trim_line(&mut line);
                Some(Ok(line))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

fn trim_line(line: &mut String) {
    while line.ends_with(['\r', '\n']) {
        line.pop();
    }
}

/// In-memory corpus keyed by relative path. Interior nodes are implied by the
/// path components of the stored documents.
#[derive(Clone, Debug, Default)]
pub struct MemoryCorpus {
    documents: BTreeMap<PathBuf, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(
        mut self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> io::Result<Self> {
        self.insert(path, text)?;
        Ok(self)
    }

    /// Stores a document, replacing any document at the same path.
    ///
    /// A path cannot be both a document and a directory: inserting `a` next to
    /// `a/b` (or the reverse) fails with `InvalidInput`, as does the empty path.
    pub fn insert(
        &mut self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> io::Result<()> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "corpus document path must not be empty",
            ));
        }
        let clash = self.documents.keys().find(|existing| {
            existing.as_path() != path.as_path()
                && (existing.starts_with(&path) || path.starts_with(existing))
        });
        if let Some(existing) = clash {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "corpus document {} overlaps {}",
                    path.display(),
                    existing.display()
                ),
            ));
        }
        self.documents.insert(path, text.into());
        Ok(())
    }

    pub fn root(&self) -> PathBuf {
        PathBuf::new()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl CorpusTree for MemoryCorpus {
    type Node = PathBuf;
    type Lines = vec::IntoIter<io::Result<String>>;

    fn children(&self, node: &PathBuf) -> io::Result<Vec<PathBuf>> {
        let depth = node.components().count();
        let mut children: Vec<PathBuf> = self
            .documents
            .keys()
            .filter(|path| path.starts_with(node) && path.as_path() != node.as_path())
            .map(|path| path.components().take(depth + 1).collect::<PathBuf>())
            .collect();
        children.dedup();
        // An empty corpus is an empty root directory, not a missing one.
        if children.is_empty() && !node.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no corpus entry at {}", node.display()),
            ));
        }
        Ok(children)
    }

    fn is_leaf(&self, node: &PathBuf) -> bool {
        self.documents.contains_key(node)
    }

    fn open(&self, node: &PathBuf) -> io::Result<Self::Lines> {
        let text = self.documents.get(node).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no corpus document at {}", node.display()),
            )
        })?;
        let lines: Vec<io::Result<String>> = text.lines().map(|l| Ok(l.to_owned())).collect();
        Ok(lines.into_iter())
    }
}
