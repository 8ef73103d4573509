use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::models::Dependency;

// Header like `foo@^1.0.0:`, `"@scope/foo@^1.0.0", "@scope/foo@^1.2.0":`
// or Berry's `"foo@npm:^1.0.0":`. Only the first descriptor's name is kept.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"?(@[^/\s"@]+/[^@\s"]+|[^@\s"]+)@.*:\s*$"#).expect("valid header regex")
});

// `  version "1.2.3"` (v1) or `  version: 1.2.3` (Berry)
static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s+version:?\s+"?([^"\s]+)"?\s*$"#).expect("valid version regex")
});

/// Parser for `yarn.lock`.
pub struct YarnParser<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> YarnParser<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> super::LockFileParser for YarnParser<'_, F> {
    fn parse(&self, lock_file: &Path) -> Result<Vec<Dependency>> {
        let handle = self.fs.open(lock_file).map_err(|e| Error::io(lock_file, e))?;
        let mut parser = YarnLockState::default();

        for line in BufReader::new(handle).lines() {
            let line = line.map_err(|e| Error::io(lock_file, e))?;
            parser.feed(&line);
        }

        Ok(parser.finish())
    }
}

/// Parse complete `yarn.lock` content.
pub fn parse_yarn_lock(content: &str) -> Vec<Dependency> {
    let mut parser = YarnLockState::default();
    for line in content.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Line-by-line accumulator: a header flushes the current package and opens
/// a new one; a version line fills in the open package.
#[derive(Default)]
struct YarnLockState {
    current: Option<Dependency>,
    deps: Vec<Dependency>,
}

impl YarnLockState {
    fn feed(&mut self, line: &str) {
        if let Some(caps) = HEADER_RE.captures(line) {
            if let Some(done) = self.current.take() {
                self.deps.push(done);
            }
            self.current = Some(Dependency::new(&caps[1], ""));
        } else if let Some(current) = self.current.as_mut() {
            if let Some(caps) = VERSION_RE.captures(line) {
                current.version = caps[1].to_string();
            }
        }
    }

    fn finish(mut self) -> Vec<Dependency> {
        if let Some(done) = self.current.take() {
            self.deps.push(done);
        }
        self.deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::lockfile::LockFileParser;

    const YARN_V1: &str = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


lodash@^4.17.21:
  version "4.17.21"
  resolved "https://registry.yarnpkg.com/lodash/-/lodash-4.17.21.tgz"
  integrity sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs+cA6SoVHLIkD1k6qPy5f8d9cw==

"@types/node@^18.0.0":
  version "18.0.0"
  resolved "https://registry.yarnpkg.com/@types/node/-/node-18.0.0.tgz"

express@4.18.0:
  version "4.18.0"
  resolved "https://registry.yarnpkg.com/express/-/express-4.18.0.tgz"
  dependencies:
    accepts "~1.3.8"
"#;

    #[test]
    fn test_parse_yarn_v1() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/test/yarn.lock", YARN_V1);

        let deps = YarnParser::new(&fs).parse(Path::new("/test/yarn.lock")).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("lodash", "4.17.21"),
                Dependency::new("@types/node", "18.0.0"),
                Dependency::new("express", "4.18.0"),
            ]
        );
    }

    #[test]
    fn test_multi_descriptor_headers_take_first_name() {
        let content = r#"
"@babel/code-frame@^7.0.0", "@babel/code-frame@^7.10.4":
  version "7.22.13"

debug@^4.1.0, debug@^4.3.1:
  version "4.3.4"
"#;
        let deps = parse_yarn_lock(content);
        assert_eq!(
            deps,
            vec![
                Dependency::new("@babel/code-frame", "7.22.13"),
                Dependency::new("debug", "4.3.4"),
            ]
        );
    }

    #[test]
    fn test_berry_format() {
        let content = r#"__metadata:
  version: 6
  cacheKey: 8

"lodash@npm:^4.17.21":
  version: 4.17.21
  resolution: "lodash@npm:4.17.21"
  languageName: node
"#;
        let deps = parse_yarn_lock(content);
        assert_eq!(deps, vec![Dependency::new("lodash", "4.17.21")]);
    }

    #[test]
    fn test_header_without_version_still_flushed() {
        let content = "left-pad@^1.0.0:\n  resolved \"x\"\n\nright-pad@1.0.0:\n  version \"1.0.0\"\n";
        let deps = parse_yarn_lock(content);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0], Dependency::new("left-pad", ""));
        assert!(deps.iter().all(|d| d.license.is_none()));
    }

    #[test]
    fn test_nested_dependency_lines_are_not_headers() {
        let content = "a@1.0.0:\n  version \"1.0.0\"\n  dependencies:\n    b \"^2.0.0\"\n";
        let deps = parse_yarn_lock(content);
        assert_eq!(deps, vec![Dependency::new("a", "1.0.0")]);
    }
}
