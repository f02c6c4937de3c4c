//! Font discovery in configured directories
//!
//! Each directory is walked recursively for `.ttf`/`.otf` files. Every file
//! gets a display name derived from its stem, and the files are also loaded
//! into a fontdb database so fonts can be looked up by their real family
//! name.

use crate::config::{FontDirectories, DEFAULT_FONT_DIR};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d+\.\d+.*$").expect("valid version pattern"));
static PAREN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*\)$").expect("valid parenthesis pattern"));

/// Weight and style words stripped from the end of file stems, in order
const STYLE_SUFFIXES: &[&str] = &[
    "Regular",
    "Bold",
    "Italic",
    "Light",
    "Medium",
    "Heavy",
    "Black",
    "Thin",
    "ExtraLight",
    "SemiBold",
    "ExtraBold",
    "UltraLight",
    "DemiBold",
    "Book",
    "Roman",
    "Oblique",
    "Condensed",
    "Extended",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Turn a font file stem into a display name
///
/// Drops a trailing version (`" 1.002"` and anything after it), a trailing
/// parenthesized group, and style words joined by a space or hyphen.
pub fn clean_font_name(stem: &str) -> String {
    let name = VERSION_SUFFIX.replace_all(stem, "");
    let mut name = PAREN_SUFFIX.replace_all(&name, "").into_owned();

    for suffix in STYLE_SUFFIXES {
        for separator in [' ', '-'] {
            let tail = format!("{separator}{suffix}");
            if let Some(stripped) = name.strip_suffix(tail.as_str()) {
                name.truncate(stripped.len());
                break;
            }
        }
    }

    name.trim().to_string()
}

/// Where a resolved font lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocation {
    pub path: PathBuf,
    /// Face index within the file (for TTC files)
    pub face_index: u32,
}

impl FontLocation {
    fn file(path: PathBuf) -> Self {
        Self {
            path,
            face_index: 0,
        }
    }
}

/// Display-name index of the font files in the configured directories
pub struct FontCatalog {
    directories: Vec<PathBuf>,
    /// Display names in case-insensitive order
    names: Vec<String>,
    paths: FxHashMap<String, PathBuf>,
    db: Database,
}

impl FontCatalog {
    /// A catalog with no fonts; everything resolves to the built-in font
    pub fn empty() -> Self {
        Self {
            directories: Vec::new(),
            names: Vec::new(),
            paths: FxHashMap::default(),
            db: Database::new(),
        }
    }

    /// Walk every configured directory and index the font files found
    pub fn scan(config: &FontDirectories) -> Self {
        let mut catalog = Self::empty();
        for dir in &config.directories {
            catalog.scan_directory(dir);
        }
        catalog.names.sort_by_cached_key(|name| name.to_lowercase());
        tracing::debug!(
            "Font catalog: {} fonts from {} directories ({} faces in database)",
            catalog.names.len(),
            catalog.directories.len(),
            catalog.db.len()
        );
        catalog
    }

    fn scan_directory(&mut self, dir: &Path) {
        if !dir.exists() {
            tracing::debug!("Skipping missing font directory {}", dir.display());
            return;
        }
        self.directories.push(dir.to_path_buf());

        let dir_label = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_default_dir = dir_label.to_lowercase() == DEFAULT_FONT_DIR;

        let files = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Font scan error in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_font_file(entry.path()));

        for entry in files {
            let path = entry.into_path();
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut name = clean_font_name(&stem);
            if !is_default_dir {
                name = format!("{name} ({dir_label})");
            }
            let name = self.unique_name(name);

            if let Err(e) = self.db.load_font_file(&path) {
                tracing::debug!("fontdb could not load {}: {}", path.display(), e);
            }
            self.names.push(name.clone());
            self.paths.insert(name, path);
        }
    }

    fn unique_name(&self, name: String) -> String {
        if !self.paths.contains_key(&name) {
            return name;
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{name} ({counter})");
            if !self.paths.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Display names, sorted case-insensitively
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Directories that existed at scan time
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// File behind a display name
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    /// Find the font file for a name
    ///
    /// Tries the display name, then `<dir>/<name>.ttf` and `<dir>/<name>.otf`
    /// in every scanned directory, then the name as a font family.
    pub fn locate(&self, name: &str) -> Option<FontLocation> {
        if let Some(path) = self.paths.get(name) {
            return Some(FontLocation::file(path.clone()));
        }

        let direct = self.directories.iter().find_map(|dir| {
            FONT_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{name}.{ext}")))
                .find(|path| path.is_file())
        });
        if let Some(path) = direct {
            return Some(FontLocation::file(path));
        }

        self.locate_family(name)
    }

    fn locate_family(&self, family: &str) -> Option<FontLocation> {
        let query = Query {
            families: &[Family::Name(family)],
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        };
        let id = self.db.query(&query)?;
        let (source, face_index) = self.db.face_source(id)?;

        match source {
            Source::File(path) | Source::SharedFile(path, _) => {
                Some(FontLocation { path, face_index })
            }
            Source::Binary(_) => {
                tracing::debug!("Family '{}' has no backing file", family);
                None
            }
        }
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"not really a font").unwrap();
    }

    #[test]
    fn test_clean_font_name() {
        assert_eq!(clean_font_name("Roboto-Bold"), "Roboto");
        assert_eq!(clean_font_name("Open Sans Regular"), "Open Sans");
        assert_eq!(clean_font_name("Lato 2.015"), "Lato");
        assert_eq!(clean_font_name("Lato 2.015 Bold"), "Lato");
        assert_eq!(clean_font_name("Fira Code (Nerd)"), "Fira Code");
        assert_eq!(clean_font_name("Plain"), "Plain");
        assert_eq!(clean_font_name("Bolder"), "Bolder");
    }

    #[test]
    fn test_clean_strips_in_list_order() {
        // "Bold" is checked before "Italic", so only the last word goes
        assert_eq!(clean_font_name("Foo Bold Italic"), "Foo Bold");
        // "Regular" is checked first, then "Bold" still matches
        assert_eq!(clean_font_name("Foo Bold Regular"), "Foo");
    }

    #[test]
    fn test_scan_default_dir() {
        let root = tempfile::tempdir().unwrap();
        let fonts = root.path().join("fonts");
        fs::create_dir_all(fonts.join("nested")).unwrap();
        touch(&fonts, "Zeta-Regular.ttf");
        touch(&fonts, "alpha.OTF");
        touch(&fonts.join("nested"), "Beta Bold.ttf");
        touch(&fonts, "readme.txt");

        let catalog = FontCatalog::scan(&FontDirectories::new(vec![fonts.clone()]));
        assert_eq!(catalog.names(), &["alpha", "Beta", "Zeta"]);
        assert_eq!(catalog.path("Zeta"), Some(fonts.join("Zeta-Regular.ttf").as_path()));
    }

    #[test]
    fn test_scan_labels_and_dedupes() {
        let root = tempfile::tempdir().unwrap();
        let extra = root.path().join("extra");
        fs::create_dir(&extra).unwrap();
        touch(&extra, "Mono-Bold.ttf");
        touch(&extra, "Mono-Italic.ttf");

        let catalog = FontCatalog::scan(&FontDirectories::new(vec![extra]));
        assert_eq!(catalog.names(), &["Mono (extra)", "Mono (extra) (1)"]);
    }

    #[test]
    fn test_scan_skips_missing_directories() {
        let root = tempfile::tempdir().unwrap();
        let catalog = FontCatalog::scan(&FontDirectories::new(vec![root.path().join("gone")]));
        assert!(catalog.is_empty());
        assert!(catalog.directories().is_empty());
    }

    #[test]
    fn test_locate_order() {
        let root = tempfile::tempdir().unwrap();
        let fonts = root.path().join("fonts");
        fs::create_dir(&fonts).unwrap();
        touch(&fonts, "Display-Bold.ttf");

        let catalog = FontCatalog::scan(&FontDirectories::new(vec![fonts.clone()]));
        // By display name
        assert_eq!(
            catalog.locate("Display"),
            Some(FontLocation::file(fonts.join("Display-Bold.ttf")))
        );
        // By file stem inside a scanned directory
        assert_eq!(
            catalog.locate("Display-Bold"),
            Some(FontLocation::file(fonts.join("Display-Bold.ttf")))
        );
        assert_eq!(catalog.locate("Nothing Here"), None);
    }
}
