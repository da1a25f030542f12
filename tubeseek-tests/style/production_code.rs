//! Production Code Checks
//!
//! Library and binary code must not `unwrap()` errors (an `expect` naming
//! the invariant is fine) and must not silence dead code warnings.
//! Everything after the first `#[cfg(test)]` line of a file, and the
//! `testing.rs` helper modules, count as test code and are exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// Crates whose `src/` trees are scanned, relative to this package.
const SCANNED_CRATES: &[&str] = &["../tubeseek-core", "../tubeseek-search", "../tubeseek-cli"];

#[derive(Debug)]
struct Violation {
    file_path: String,
    line_number: usize,
    rule: &'static str,
    context: String,
}

#[derive(Default)]
struct ProductionCodeChecker {
    violations: Vec<Violation>,
    files_checked: usize,
}

impl ProductionCodeChecker {
    fn find_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::find_rust_files(&path, files)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    fn is_test_helper(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "testing.rs")
    }

    /// Rule broken by `line`, if any.
    fn rule_for(line: &str) -> Option<&'static str> {
        let code = line.split("//").next().unwrap_or_default();
        if code.contains(".unwrap()") {
            Some("unwrap")
        } else if code.contains("#[allow(") && code.contains("dead_code") {
            Some("dead_code")
        } else {
            None
        }
    }

    fn check_source(&mut self, file_path: &str, content: &str) {
        self.files_checked += 1;

        for (index, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            if let Some(rule) = Self::rule_for(line) {
                self.violations.push(Violation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    rule,
                    context: line.trim().to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self) -> std::io::Result<()> {
        for krate in SCANNED_CRATES {
            let mut files = Vec::new();
            Self::find_rust_files(&Path::new(krate).join("src"), &mut files)?;

            for file in files.iter().filter(|f| !Self::is_test_helper(f)) {
                let content = fs::read_to_string(file)?;
                self.check_source(&file.to_string_lossy(), &content);
            }
        }
        Ok(())
    }

    fn report(&self) -> bool {
        for violation in &self.violations {
            println!(
                "{}:{} [{}] {}",
                violation.file_path, violation.line_number, violation.rule, violation.context
            );
        }
        println!(
            "Production code check: {} violation(s) in {} file(s)",
            self.violations.len(),
            self.files_checked
        );
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_violations_before_test_module() {
        let mut checker = ProductionCodeChecker::default();
        let source = r#"
fn load() -> u32 {
    "1".parse().unwrap()
}

#[allow(dead_code)]
fn unused() {}

fn fallback() -> u32 {
    "x".parse().unwrap_or_default() // never .unwrap() here
}

#[cfg(test)]
mod tests {
    fn helper() -> u32 {
        "2".parse().expect("number")
    }
}
"#;

        checker.check_source("sample.rs", source);

        let found: Vec<(usize, &str)> = checker
            .violations
            .iter()
            .map(|v| (v.line_number, v.rule))
            .collect();
        assert_eq!(found, [(3, "unwrap"), (6, "dead_code")]);
    }

    #[test]
    fn production_code_enforcement() {
        let mut checker = ProductionCodeChecker::default();
        checker
            .check_workspace()
            .expect("Failed to scan workspace sources");

        assert!(checker.files_checked > 0);
        assert!(
            checker.report(),
            "Production code violations found - see output above"
        );
    }
}
