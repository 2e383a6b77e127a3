//! The document session: one open NBT file.
//!
//! A [`Document`] owns the canonical tree for a file plus the bits of
//! state an editor shell needs around it: the file path, whether the
//! bytes on disk were compressed, and a modification counter that gates
//! the "unsaved changes" prompt. Edits go through the document so the
//! counter cannot drift from the tree.
//!
//! The session is single-threaded and synchronous. Nothing here locks:
//! a document belongs to one editor session and is driven from one
//! logical actor at a time.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibEncoder;
use flate2::Compression;
use log::debug;

use crate::edit::{self, Step};
use crate::error::Result;
use crate::{de, ser, Compound, Tag, Value};

/// An open document: root tree, file identity, compression flag and
/// modification counter.
pub struct Document {
    path: PathBuf,
    compressed: bool,
    revision: u64,
    root: Compound,
}

impl Document {
    /// Open the file at `path`, auto-detecting compression. A failed
    /// open produces no document and leaves any current one untouched.
    pub fn open(path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Document::from_bytes(path, &bytes)
    }

    /// Decode `bytes` as the content of `path`, for callers that do
    /// their own file IO.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<Document> {
        let path = path.as_ref();
        let (root, compressed) = de::from_bytes_auto(bytes)?;
        debug!(
            "opened {} ({} bytes, compressed: {})",
            path.display(),
            bytes.len(),
            compressed
        );
        Ok(Document {
            path: path.to_owned(),
            compressed,
            revision: 0,
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was compressed when opened. Saves reproduce
    /// this: a compressed document is written back zlib-wrapped.
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn root(&self) -> &Compound {
        &self.root
    }

    /// How many edits have been applied since open or the last save.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_modified(&self) -> bool {
        self.revision > 0
    }

    /// Count an edit the session did not mediate, e.g. a frontend that
    /// swapped in state of its own.
    pub fn mark_modified(&mut self) {
        self.revision += 1;
    }

    /// The exact bytes a save would write: the encoded tree, zlib
    /// wrapped when the document was opened compressed.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let plain = ser::to_bytes(&self.root)?;
        if !self.compressed {
            return Ok(plain);
        }
        let mut out = vec![];
        let mut encoder = ZlibEncoder::new(plain.as_slice(), Compression::default());
        encoder.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Write the document back to its own path. Returns the number of
    /// bytes written and resets the modification counter.
    pub fn save(&mut self) -> Result<usize> {
        let path = self.path.clone();
        self.save_to(&path)
    }

    /// Save As: write to `path` and, on success, repoint the document
    /// at it. The compression flag is not altered.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let written = self.save_to(path.as_ref())?;
        self.path = path.as_ref().to_owned();
        Ok(written)
    }

    fn save_to(&mut self, path: &Path) -> Result<usize> {
        let bytes = self.encode()?;
        fs::write(path, &bytes)?;
        debug!(
            "saved {} ({} bytes, compressed: {})",
            path.display(),
            bytes.len(),
            self.compressed
        );
        self.revision = 0;
        Ok(bytes.len())
    }

    /// Read access for tree display.
    pub fn node(&self, path: &[Step]) -> Result<&Value> {
        edit::node(&self.root, path)
    }

    /// Replace the whole tree, e.g. from a frontend that rebuilt it out
    /// of its transfer representation.
    pub fn replace_root(&mut self, root: Compound) {
        self.root = root;
        self.mark_modified();
    }

    pub fn rename_key(&mut self, parent: &[Step], old: &str, new: &str) -> Result<()> {
        edit::rename_key(&mut self.root, parent, old, new)?;
        self.mark_modified();
        Ok(())
    }

    pub fn set_scalar(&mut self, path: &[Step], text: &str) -> Result<()> {
        edit::set_scalar(&mut self.root, path, text)?;
        self.mark_modified();
        Ok(())
    }

    pub fn set_string(&mut self, path: &[Step], text: &str) -> Result<()> {
        edit::set_string(&mut self.root, path, text)?;
        self.mark_modified();
        Ok(())
    }

    pub fn set_list_element_tag(&mut self, path: &[Step], tag: Tag) -> Result<()> {
        edit::set_list_element_tag(&mut self.root, path, tag)?;
        self.mark_modified();
        Ok(())
    }

    pub fn set_array_elements(&mut self, path: &[Step], values: &[i64]) -> Result<()> {
        edit::set_array_elements(&mut self.root, path, values)?;
        self.mark_modified();
        Ok(())
    }

    pub fn insert_child(&mut self, parent: &[Step], at: Step, value: Value) -> Result<()> {
        edit::insert_child(&mut self.root, parent, at, value)?;
        self.mark_modified();
        Ok(())
    }

    pub fn remove_child(&mut self, parent: &[Step], at: &Step) -> Result<Value> {
        let removed = edit::remove_child(&mut self.root, parent, at)?;
        self.mark_modified();
        Ok(removed)
    }

    pub fn move_child(&mut self, parent: &[Step], from: usize, to: usize) -> Result<()> {
        edit::move_child(&mut self.root, parent, from, to)?;
        self.mark_modified();
        Ok(())
    }
}
