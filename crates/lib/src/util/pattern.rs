//! File-name wildcard matching.
//!
//! Bundlers emit content-hashed file names (`main.3f9a1c.js`), so the copy
//! steps locate them with a `*` pattern instead of a fixed name. Only `*` is
//! special; it matches any run of characters, including none.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns true if `name` matches `pattern` in full.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
  let pattern: Vec<char> = pattern.chars().collect();
  let name: Vec<char> = name.chars().collect();

  let (mut p, mut n) = (0, 0);
  // Position of the last `*` seen and the name index it is currently absorbing up to.
  let mut backtrack: Option<(usize, usize)> = None;

  while n < name.len() {
    if p < pattern.len() && pattern[p] == '*' {
      backtrack = Some((p, n));
      p += 1;
    } else if p < pattern.len() && pattern[p] == name[n] {
      p += 1;
      n += 1;
    } else if let Some((star, absorbed)) = backtrack {
      p = star + 1;
      n = absorbed + 1;
      backtrack = Some((star, absorbed + 1));
    } else {
      return false;
    }
  }

  pattern[p..].iter().all(|&c| c == '*')
}

/// Regular files directly inside `dir` whose name matches `pattern`, sorted.
pub fn find_matching(dir: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
  let mut matches = Vec::new();

  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    if wildcard_match(pattern, &entry.file_name().to_string_lossy()) {
      matches.push(entry.path());
    }
  }

  matches.sort();
  Ok(matches)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn matches_hashed_bundle_names() {
    assert!(wildcard_match("main.*.js", "main.3f9a1c.js"));
    assert!(wildcard_match("main.*.css", "main.a1.b2.css"));
    assert!(!wildcard_match("main.*.js", "main.3f9a1c.js.map"));
    assert!(!wildcard_match("main.*.js", "vendor.3f9a1c.js"));
  }

  #[test]
  fn star_can_match_nothing() {
    assert!(wildcard_match("main*.js", "main.js"));
    assert!(wildcard_match("*", ""));
    assert!(wildcard_match("**", "anything"));
  }

  #[test]
  fn literal_patterns_require_exact_names() {
    assert!(wildcard_match("manifest.json", "manifest.json"));
    assert!(!wildcard_match("manifest.json", "manifest.json.bak"));
    assert!(!wildcard_match("manifest.json", "manifest"));
  }

  #[test]
  fn find_matching_skips_directories_and_sorts() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("main.bbb.js"), "b").unwrap();
    std::fs::write(temp.path().join("main.aaa.js"), "a").unwrap();
    std::fs::write(temp.path().join("main.aaa.js.map"), "{}").unwrap();
    std::fs::create_dir(temp.path().join("main.dir.js")).unwrap();

    let found = find_matching(temp.path(), "main.*.js").unwrap();

    assert_eq!(
      found,
      vec![temp.path().join("main.aaa.js"), temp.path().join("main.bbb.js")]
    );
  }

  #[test]
  fn find_matching_missing_directory_errors() {
    let temp = TempDir::new().unwrap();

    let result = find_matching(&temp.path().join("missing"), "*.js");

    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
  }
}
