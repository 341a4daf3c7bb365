use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_ACRONYM_FILE;
use crate::DEFAULT_GLOSSARY_FILE;
use crate::EntryPaths;
use crate::GlossaryError;
use crate::GlossaryResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"pandoc-glossary.toml",
	".pandoc-glossary.toml",
	".config/pandoc-glossary.toml",
];

/// Configuration loaded from a `pandoc-glossary.toml` file.
///
/// ```toml
/// [files]
/// glossary = "docs/glossary.yaml"
/// acronyms = "docs/acronyms.yaml"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct GlossaryConfig {
	/// Locations of the entry files.
	#[serde(default)]
	pub files: FilesConfig,
}

/// Entry file locations, relative to the project root unless absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
	#[serde(default = "default_glossary_file")]
	pub glossary: PathBuf,
	#[serde(default = "default_acronym_file")]
	pub acronyms: PathBuf,
}

impl Default for FilesConfig {
	fn default() -> Self {
		Self {
			glossary: default_glossary_file(),
			acronyms: default_acronym_file(),
		}
	}
}

fn default_glossary_file() -> PathBuf {
	PathBuf::from(DEFAULT_GLOSSARY_FILE)
}

fn default_acronym_file() -> PathBuf {
	PathBuf::from(DEFAULT_ACRONYM_FILE)
}

impl GlossaryConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> GlossaryResult<Option<GlossaryConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: GlossaryConfig =
			toml::from_str(&content).map_err(|e| GlossaryError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Entry file paths resolved against `root`.
	pub fn entry_paths(&self, root: &Path) -> EntryPaths {
		EntryPaths {
			glossary: root.join(&self.files.glossary),
			acronyms: root.join(&self.files.acronyms),
		}
	}
}
