//! Source scanning for translation keys.
//!
//! Every configured root is walked recursively. Files whose extension is in
//! the allow-list are read whole and every pattern is applied; the first
//! capture group of each match is a candidate key. Any read failure aborts
//! the scan: a partial scan would under-report missing keys.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use walkdir::WalkDir;

use crate::{
    config::ScanConfig,
    error::{Error, Result},
};

// Dotted keys with non-empty segments; anything else is not a usable key.
static KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*$").expect("key regex is valid")
});

/// Finds translation keys referenced in source files.
#[derive(Debug, Clone)]
pub struct KeyScanner {
    roots: Vec<PathBuf>,
    extensions: BTreeSet<String>,
    patterns: Vec<Regex>,
}

impl KeyScanner {
    /// Compile a scanner. Every pattern must have exactly one capture group.
    pub fn new(
        roots: Vec<PathBuf>,
        extensions: impl IntoIterator<Item = impl Into<String>>,
        patterns: &[String],
    ) -> Result<Self> {
        let patterns = patterns.iter().map(|p| compile_pattern(p)).collect::<Result<Vec<_>>>()?;
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext: String = ext.into();
                ext.trim_start_matches('.').to_string()
            })
            .collect();

        Ok(Self { roots, extensions, patterns })
    }

    /// Build a scanner from the `scan` section of the configuration.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        if config.paths.is_empty() {
            return Err(Error::NoScanPaths);
        }
        Self::new(config.paths.clone(), config.extensions.iter().cloned(), &config.patterns)
    }

    /// Scan every root and return the sorted, deduplicated set of keys.
    pub fn scan(&self) -> Result<BTreeSet<String>> {
        if self.roots.is_empty() {
            return Err(Error::NoScanPaths);
        }

        for root in &self.roots {
            if !root.is_dir() {
                return Err(Error::ScanPathInvalid(root.clone()));
            }
        }

        let mut keys = BTreeSet::new();
        let mut files = 0usize;
        for root in &self.roots {
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                    let source = e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::other("filesystem loop while walking directory")
                    });
                    Error::ScanRead { path, source }
                })?;

                if !entry.file_type().is_file() || !self.is_scanned(entry.path()) {
                    continue;
                }

                files += 1;
                self.scan_file(entry.path(), &mut keys)?;
            }
        }

        tracing::debug!(files, keys = keys.len(), "scan complete");
        Ok(keys)
    }

    fn is_scanned(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    fn scan_file(&self, path: &Path, keys: &mut BTreeSet<String>) -> Result<()> {
        let bytes =
            fs::read(path).map_err(|source| Error::ScanRead { path: path.to_path_buf(), source })?;
        let content = String::from_utf8_lossy(&bytes);

        for key in extract_keys(&content, &self.patterns) {
            keys.insert(key);
        }
        Ok(())
    }
}

/// Apply every pattern to `content` and collect valid keys.
pub fn extract_keys(content: &str, patterns: &[Regex]) -> BTreeSet<String> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|key| {
            let valid = KEY_REGEX.is_match(key);
            if !valid {
                tracing::debug!(capture = *key, "discarding capture that is not a dotted key");
            }
            valid
        })
        .map(str::to_string)
        .collect()
}

/// Compile one configured pattern.
///
/// Patterns may also be written delimited, `/body/flags`, with flags among
/// `imsxU`; they are converted to inline flags.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let invalid = |reason: String| Error::InvalidPattern { pattern: pattern.to_string(), reason };

    let source = match strip_delimiters(pattern) {
        Some((body, flags)) if flags.is_empty() => body.to_string(),
        Some((body, flags)) => format!("(?{flags}){body}"),
        None => pattern.to_string(),
    };

    let regex = Regex::new(&source).map_err(|e| invalid(e.to_string()))?;

    // captures_len counts the implicit whole-match group.
    match regex.captures_len() - 1 {
        1 => Ok(regex),
        n => Err(invalid(format!("expected exactly one capture group, found {n}"))),
    }
}

fn strip_delimiters(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let (body, flags) = (&rest[..end], &rest[end + 1..]);
    flags.chars().all(|c| "imsxU".contains(c)).then_some((body, flags))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn default_scanner(roots: Vec<PathBuf>) -> KeyScanner {
        let config = ScanConfig { paths: roots, ..ScanConfig::default() };
        KeyScanner::from_config(&config).unwrap()
    }

    #[test]
    fn test_default_patterns() {
        let patterns: Vec<Regex> =
            ScanConfig::default().patterns.iter().map(|p| compile_pattern(p).unwrap()).collect();

        let source = r#"
t('nav.home')
const a = $t("nav.about", { n: 1 });
__('legacy_key')
i18n.t('dotted.call')
format('not.a.key')
t('has space')
t('trailing.')
t(variable)
"#;
        let keys = extract_keys(source, &patterns);
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec!["dotted.call", "legacy_key", "nav.about", "nav.home"]
        );
    }

    #[test]
    fn test_delimited_pattern() {
        let regex = compile_pattern(r#"/^\s*t\(['"]([a-z.]+)['"]\)/m"#).unwrap();
        let keys = extract_keys("x\n  t('a.b')\n", &[regex]);
        assert!(keys.contains("a.b"));
    }

    #[test]
    fn test_pattern_needs_one_group() {
        assert!(matches!(compile_pattern(r"t\('\w+'\)"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(compile_pattern(r"(t)\('(\w+)'\)"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(compile_pattern(r"t\(('"), Err(Error::InvalidPattern { .. })));
        assert!(compile_pattern(r"(?:x)t\('(\w+)'\)").is_ok());
    }

    #[test]
    fn test_scan_walks_nested_dirs_and_filters_extensions() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("components").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("app.ts"), "t('app.title')").unwrap();
        fs::write(nested.join("Button.vue"), "{{ $t('button.ok') }}").unwrap();
        fs::write(nested.join("notes.md"), "t('ignored.key')").unwrap();

        let keys = default_scanner(vec![dir.path().to_path_buf()]).scan().unwrap();
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["app.title", "button.ok"]);
    }

    #[test]
    fn test_scan_is_deterministic_across_roots() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("one.js"), "t('z.last')\nt('a.first')").unwrap();
        fs::write(b.path().join("two.js"), "t('m.middle')\nt('a.first')").unwrap();

        let forward = default_scanner(vec![a.path().into(), b.path().into()]).scan().unwrap();
        let backward = default_scanner(vec![b.path().into(), a.path().into()]).scan().unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = default_scanner(vec![dir.path().into(), missing.clone()]).scan().unwrap_err();
        assert!(matches!(err, Error::ScanPathInvalid(ref p) if *p == missing));
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let not_a_file = dir.path().join("x.js");
        fs::create_dir(&not_a_file).unwrap();

        let scanner = default_scanner(vec![dir.path().into()]);
        let err = scanner.scan_file(&not_a_file, &mut BTreeSet::new()).unwrap_err();
        assert!(matches!(err, Error::ScanRead { ref path, .. } if *path == not_a_file));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_no_roots_configured() {
        assert!(matches!(
            KeyScanner::from_config(&ScanConfig::default()),
            Err(Error::NoScanPaths)
        ));
    }

    #[test]
    fn test_extensions_accept_leading_dot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("view.php"), "__('php.key')").unwrap();

        let scanner =
            KeyScanner::new(vec![dir.path().into()], [".php"], &ScanConfig::default().patterns)
                .unwrap();
        assert!(scanner.scan().unwrap().contains("php.key"));
    }
}
