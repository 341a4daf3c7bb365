use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use derive_more::Deref;
use indexmap::IndexMap;
use tracing::debug;
use tracing::warn;

use crate::AcronymEntry;
use crate::Entry;
use crate::EntryKind;
use crate::GlossaryEntry;
use crate::GlossaryError;
use crate::GlossaryResult;

/// Default file holding glossary entries, relative to the project root.
pub const DEFAULT_GLOSSARY_FILE: &str = "glossary.yaml";
/// Default file holding acronym entries, relative to the project root.
pub const DEFAULT_ACRONYM_FILE: &str = "acronyms.yaml";

/// Locations of the two persistent entry files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPaths {
	pub glossary: PathBuf,
	pub acronyms: PathBuf,
}

impl EntryPaths {
	/// Default file names resolved against `root`.
	pub fn in_dir(root: &Path) -> Self {
		Self {
			glossary: root.join(DEFAULT_GLOSSARY_FILE),
			acronyms: root.join(DEFAULT_ACRONYM_FILE),
		}
	}

	pub fn get(&self, kind: EntryKind) -> &Path {
		match kind {
			EntryKind::Glossary => &self.glossary,
			EntryKind::Acronym => &self.acronyms,
		}
	}
}

impl Default for EntryPaths {
	fn default() -> Self {
		Self {
			glossary: PathBuf::from(DEFAULT_GLOSSARY_FILE),
			acronyms: PathBuf::from(DEFAULT_ACRONYM_FILE),
		}
	}
}

/// An insertion-ordered label → entry map with a dirty flag.
///
/// Reads go through `Deref` to the underlying map. Writes must go through
/// [`Registry::insert`] so the dirty flag stays accurate.
#[derive(Debug, Clone, Deref)]
pub struct Registry<E> {
	#[deref]
	entries: IndexMap<String, E>,
	dirty: bool,
}

impl<E> Default for Registry<E> {
	fn default() -> Self {
		Self {
			entries: IndexMap::new(),
			dirty: false,
		}
	}
}

impl<E: Entry> Registry<E> {
	/// Build a clean registry from already persisted entries.
	pub fn from_entries(entries: impl IntoIterator<Item = (String, E)>) -> Self {
		Self {
			entries: entries.into_iter().collect(),
			dirty: false,
		}
	}

	/// Insert or overwrite the entry for `label` and mark the registry dirty.
	pub fn insert(&mut self, label: impl Into<String>, entry: E) -> Option<E> {
		self.dirty = true;
		self.entries.insert(label.into(), entry)
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Read the registry from `path`. A missing file yields an empty registry.
	pub fn load(path: &Path) -> GlossaryResult<Self> {
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				warn!(
					path = %path.display(),
					kind = %E::KIND,
					"entry file not found, using an empty one"
				);
				return Ok(Self::default());
			}
			Err(e) => return Err(e.into()),
		};

		Self::from_yaml(&content, &path.display().to_string())
	}

	/// Parse registry content. `path_display` is only used for error reports.
	pub fn from_yaml(content: &str, path_display: &str) -> GlossaryResult<Self> {
		if content.trim().is_empty() {
			return Ok(Self::default());
		}

		let entries: Option<IndexMap<String, E>> =
			serde_yaml_ng::from_str(content).map_err(|e| GlossaryError::EntryFileParse {
				path: path_display.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			entries: entries.unwrap_or_default(),
			dirty: false,
		})
	}

	/// Serialize the registry. `path_display` is only used for error reports.
	pub fn to_yaml(&self, path_display: &str) -> GlossaryResult<String> {
		serde_yaml_ng::to_string(&self.entries).map_err(|e| GlossaryError::EntryFileWrite {
			path: path_display.to_string(),
			reason: e.to_string(),
		})
	}

	/// Rewrite `path` in full when the registry is dirty. Returns whether the
	/// file was written.
	pub fn save(&mut self, path: &Path) -> GlossaryResult<bool> {
		if !self.dirty {
			return Ok(false);
		}

		let payload = self.to_yaml(&path.display().to_string())?;
		write_atomic(path, &payload)?;
		self.dirty = false;
		debug!(path = %path.display(), kind = %E::KIND, entries = self.entries.len(), "saved entry file");

		Ok(true)
	}
}

/// Owner of both registries for the lifetime of one run.
///
/// ```rust,no_run
/// use glossary_core::EntryPaths;
/// use glossary_core::EntryStore;
/// use glossary_core::GlossaryEntry;
///
/// let mut store = EntryStore::load(EntryPaths::default()).unwrap();
/// if store.get::<GlossaryEntry>("compiler").is_none() {
/// 	store.set("compiler", GlossaryEntry::default());
/// }
/// store.save().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct EntryStore {
	paths: EntryPaths,
	glossary: Registry<GlossaryEntry>,
	acronyms: Registry<AcronymEntry>,
}

impl EntryStore {
	/// An empty store that will persist to `paths`. Nothing is read.
	pub fn new(paths: EntryPaths) -> Self {
		Self {
			paths,
			glossary: Registry::default(),
			acronyms: Registry::default(),
		}
	}

	/// Read both entry files. A present but unreadable or malformed file is an
	/// error; a missing one only logs a warning.
	pub fn load(paths: EntryPaths) -> GlossaryResult<Self> {
		let glossary = Registry::load(&paths.glossary)?;
		let acronyms = Registry::load(&paths.acronyms)?;
		debug!(
			glossary = glossary.len(),
			acronyms = acronyms.len(),
			"loaded entry files"
		);

		Ok(Self {
			paths,
			glossary,
			acronyms,
		})
	}

	pub fn paths(&self) -> &EntryPaths {
		&self.paths
	}

	pub fn glossary(&self) -> &Registry<GlossaryEntry> {
		&self.glossary
	}

	pub fn glossary_mut(&mut self) -> &mut Registry<GlossaryEntry> {
		&mut self.glossary
	}

	pub fn acronyms(&self) -> &Registry<AcronymEntry> {
		&self.acronyms
	}

	pub fn acronyms_mut(&mut self) -> &mut Registry<AcronymEntry> {
		&mut self.acronyms
	}

	pub fn get<E: Entry>(&self, label: &str) -> Option<&E> {
		E::registry(self).get(label)
	}

	/// Insert or overwrite an entry, marking its registry dirty.
	pub fn set<E: Entry>(&mut self, label: impl Into<String>, entry: E) {
		E::registry_mut(self).insert(label, entry);
	}

	/// Every entry of one kind, in load order followed by insertion order.
	pub fn all<E: Entry>(&self) -> impl Iterator<Item = (&str, &E)> {
		E::registry(self)
			.iter()
			.map(|(label, entry)| (label.as_str(), entry))
	}

	pub fn contains(&self, kind: EntryKind, label: &str) -> bool {
		match kind {
			EntryKind::Glossary => self.glossary.contains_key(label),
			EntryKind::Acronym => self.acronyms.contains_key(label),
		}
	}

	pub fn is_dirty(&self, kind: EntryKind) -> bool {
		match kind {
			EntryKind::Glossary => self.glossary.is_dirty(),
			EntryKind::Acronym => self.acronyms.is_dirty(),
		}
	}

	/// Write every dirty registry to its file. Clean registries are left
	/// untouched on disk. Returns the kinds that were written.
	pub fn save(&mut self) -> GlossaryResult<Vec<EntryKind>> {
		let mut written = Vec::new();

		if self.glossary.save(&self.paths.glossary)? {
			written.push(EntryKind::Glossary);
		}

		if self.acronyms.save(&self.paths.acronyms)? {
			written.push(EntryKind::Acronym);
		}

		Ok(written)
	}
}

/// Replace `path` by writing a sibling temporary file and renaming it over the
/// target, so the file is either fully rewritten or left as it was.
///
/// A symlinked entry file is followed and its target is replaced, leaving the
/// link in place. The replaced file keeps its permissions.
fn write_atomic(path: &Path, payload: &str) -> GlossaryResult<()> {
	let write_error = |e: std::io::Error| {
		GlossaryError::EntryFileWrite {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	};

	let target = resolve_symlink(path).map_err(write_error)?;
	let permissions = std::fs::metadata(&target)
		.ok()
		.map(|metadata| metadata.permissions());

	if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
		std::fs::create_dir_all(dir).map_err(write_error)?;
	}

	let file_name = target
		.file_name()
		.map_or_else(String::new, |name| name.to_string_lossy().into_owned());
	let temp_path = target.with_file_name(format!(
		".{file_name}.tmp-{}-{}",
		std::process::id(),
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.as_nanos())
	));

	if let Err(e) = std::fs::write(&temp_path, payload) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(write_error(e));
	}

	if let Some(permissions) = permissions {
		if let Err(e) = std::fs::set_permissions(&temp_path, permissions) {
			let _ = std::fs::remove_file(&temp_path);
			return Err(write_error(e));
		}
	}

	if let Err(e) = std::fs::rename(&temp_path, &target) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(write_error(e));
	}

	Ok(())
}

/// The file a write to `path` should replace. Dangling links resolve to the
/// path they point at, so the target gets created.
fn resolve_symlink(path: &Path) -> std::io::Result<PathBuf> {
	match std::fs::symlink_metadata(path) {
		Ok(metadata) if metadata.file_type().is_symlink() => {
			std::fs::canonicalize(path).or_else(|_| {
				let link = std::fs::read_link(path)?;
				Ok(path.parent().map_or_else(|| link.clone(), |dir| dir.join(&link)))
			})
		}
		_ => Ok(path.to_path_buf()),
	}
}
