//! `go.mod` reader
//!
//! Line-oriented: every directive is either a single line (`require a v1`)
//! or a parenthesised block whose lines omit the verb. Only the directives
//! the extractor needs are interpreted; `exclude`, `retract`, `godebug`,
//! `tool` and `ignore` are accepted and ignored.

use std::path::Path;

use crate::features::manifest::domain::ModFile;
use crate::features::manifest::ports::ManifestParser;
use crate::shared::models::{Dependency, GographError, ReplaceRule, Result};

const ARROW: &str = "=>";

/// One lexed line
#[derive(Debug, Default, PartialEq)]
struct Line {
    tokens: Vec<String>,
    comment: Option<String>,
}

/// Directives known to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Module,
    Go,
    Toolchain,
    Require,
    Replace,
    Ignored,
}

impl Directive {
    fn parse(verb: &str) -> Option<Self> {
        match verb {
            "module" => Some(Directive::Module),
            "go" => Some(Directive::Go),
            "toolchain" => Some(Directive::Toolchain),
            "require" => Some(Directive::Require),
            "replace" => Some(Directive::Replace),
            "exclude" | "retract" | "godebug" | "tool" | "ignore" => Some(Directive::Ignored),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GoModParser;

impl GoModParser {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestParser for GoModParser {
    fn parse(&self, content: &str, path: &Path) -> Result<ModFile> {
        let mut reader = Reader {
            path,
            file: ModFile::default(),
            has_module: false,
        };
        let mut block: Option<(Directive, usize)> = None;
        let mut last_line = 1;

        for (idx, raw) in content.lines().enumerate() {
            let number = idx + 1;
            last_line = number;
            let line = lex(raw).map_err(|msg| GographError::manifest_at(path, number, msg))?;
            if line.tokens.is_empty() {
                continue;
            }

            if let Some((directive, _)) = block {
                if line.tokens.len() == 1 && line.tokens[0] == ")" {
                    block = None;
                } else {
                    reader.apply(directive, &line.tokens, line.comment.as_deref(), number)?;
                }
                continue;
            }

            let verb = line.tokens[0].as_str();
            let directive = Directive::parse(verb).ok_or_else(|| {
                GographError::manifest_at(path, number, format!("unknown directive: {verb}"))
            })?;
            let args = &line.tokens[1..];

            let opens_block = matches!(args, [open] if open == "(");
            let empty_block = matches!(args, [open, close] if open == "(" && close == ")");
            if opens_block || empty_block {
                if matches!(directive, Directive::Module | Directive::Go | Directive::Toolchain) {
                    return Err(GographError::manifest_at(
                        path,
                        number,
                        format!("{verb} does not accept a block"),
                    ));
                }
                if opens_block {
                    block = Some((directive, number));
                }
                continue;
            }

            reader.apply(directive, args, line.comment.as_deref(), number)?;
        }

        if let Some((_, start)) = block {
            return Err(GographError::manifest_at(path, start, "unterminated block"));
        }
        if !reader.has_module {
            return Err(GographError::manifest_at(
                path,
                last_line,
                "missing module directive",
            ));
        }

        Ok(reader.file)
    }
}

struct Reader<'a> {
    path: &'a Path,
    file: ModFile,
    has_module: bool,
}

impl Reader<'_> {
    fn error(&self, line: usize, message: impl Into<String>) -> GographError {
        GographError::manifest_at(self.path, line, message)
    }

    fn apply(
        &mut self,
        directive: Directive,
        args: &[String],
        comment: Option<&str>,
        line: usize,
    ) -> Result<()> {
        match directive {
            Directive::Module => {
                let [path] = args else {
                    return Err(self.error(line, "usage: module module/path"));
                };
                if self.has_module {
                    return Err(self.error(line, "repeated module statement"));
                }
                self.file.module_path = path.clone();
                self.has_module = true;
            }
            Directive::Go => {
                let [version] = args else {
                    return Err(self.error(line, "usage: go 1.23"));
                };
                self.file.go_version = version.clone();
            }
            Directive::Toolchain => {
                let [name] = args else {
                    return Err(self.error(line, "usage: toolchain go1.23.4"));
                };
                self.file.toolchain = Some(name.clone());
            }
            Directive::Require => {
                let [path, version] = args else {
                    return Err(self.error(line, "usage: require module/path v1.2.3"));
                };
                self.file
                    .requires
                    .push(Dependency::new(path.as_str(), version.as_str(), is_indirect(comment)));
            }
            Directive::Replace => {
                let rule = self.replace_rule(args, line)?;
                self.file.replaces.push(rule);
            }
            Directive::Ignored => {}
        }
        Ok(())
    }

    fn replace_rule(&self, args: &[String], line: usize) -> Result<ReplaceRule> {
        let usage = "usage: replace module/path [v1.2.3] => other/module v1.4 | ../local/dir";
        let arrow = args
            .iter()
            .position(|t| t == ARROW)
            .ok_or_else(|| self.error(line, usage))?;
        let (old, new) = (&args[..arrow], &args[arrow + 1..]);

        let (old_path, old_version) = match old {
            [path] => (path.clone(), String::new()),
            [path, version] => (path.clone(), version.clone()),
            _ => return Err(self.error(line, usage)),
        };
        let (new_path, new_version) = match new {
            [path] => (path.clone(), String::new()),
            [path, version] => (path.clone(), version.clone()),
            _ => return Err(self.error(line, usage)),
        };

        Ok(ReplaceRule {
            old_path,
            old_version,
            new_path,
            new_version,
        })
    }
}

/// `// indirect` or `// indirect; other notes`
fn is_indirect(comment: Option<&str>) -> bool {
    comment
        .map(str::trim)
        .is_some_and(|c| c == "indirect" || c.starts_with("indirect;"))
}

/// Split a line into tokens and its trailing `//` comment
fn lex(raw: &str) -> std::result::Result<Line, String> {
    let mut line = Line::default();
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        if let Some(comment) = rest.strip_prefix("//") {
            line.comment = Some(comment.trim().to_string());
            break;
        }

        let (token, tail) = if let Some(body) = rest.strip_prefix('"') {
            let end = closing_quote(body).ok_or("unterminated quoted string")?;
            (unescape(&body[..end]), &body[end + 1..])
        } else if let Some(body) = rest.strip_prefix('`') {
            let end = body.find('`').ok_or("unterminated raw string")?;
            (body[..end].to_string(), &body[end + 1..])
        } else if rest.starts_with('(') || rest.starts_with(')') {
            (rest[..1].to_string(), &rest[1..])
        } else if let Some(tail) = rest.strip_prefix(ARROW) {
            (ARROW.to_string(), tail)
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == '"')
                .unwrap_or(rest.len());
            let word = &rest[..end];
            // `a=>b` without spaces
            match word.find(ARROW) {
                Some(0) | None => (word.to_string(), &rest[end..]),
                Some(pos) => (word[..pos].to_string(), &rest[pos..]),
            }
        };

        line.tokens.push(token);
        rest = tail.trim_start();
    }

    Ok(line)
}

fn closing_quote(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(content: &str) -> Result<ModFile> {
        GoModParser::new().parse(content, Path::new("/repo/go.mod"))
    }

    #[test]
    fn test_full_manifest() {
        let content = r#"// leading comment
module github.com/acme/service

go 1.21

toolchain go1.21.5

require github.com/sirupsen/logrus v1.9.3

require (
	github.com/stretchr/testify v1.8.4
	golang.org/x/sys v0.15.0 // indirect
	"github.com/quoted/mod" v0.1.0
)

replace github.com/old/mod => ../local/mod

replace (
	github.com/a/b v1.0.0 => github.com/c/d v1.1.0
	github.com/e/f => github.com/g/h v2.0.0
)

exclude github.com/bad/mod v0.0.1

retract (
	v1.0.0 // published by mistake
	[v1.1.0, v1.2.0]
)
"#;
        let file = parse(content).unwrap();

        assert_eq!(file.module_path, "github.com/acme/service");
        assert_eq!(file.go_version, "1.21");
        assert_eq!(file.toolchain.as_deref(), Some("go1.21.5"));
        assert_eq!(
            file.requires,
            vec![
                Dependency::new("github.com/sirupsen/logrus", "v1.9.3", false),
                Dependency::new("github.com/stretchr/testify", "v1.8.4", false),
                Dependency::new("golang.org/x/sys", "v0.15.0", true),
                Dependency::new("github.com/quoted/mod", "v0.1.0", false),
            ]
        );
        assert_eq!(file.direct_requires().count(), 3);

        assert_eq!(file.replaces.len(), 3);
        assert_eq!(file.replaces[0].new_path, "../local/mod");
        assert!(file.replaces[0].is_local());
        assert_eq!(file.replaces[1].old_version, "v1.0.0");
        assert_eq!(file.replaces[1].new_version, "v1.1.0");
        assert_eq!(file.replaces[2].old_version, "");
        assert_eq!(
            file.replacement("github.com/e/f").map(|r| r.new_path.as_str()),
            Some("github.com/g/h")
        );
    }

    #[test]
    fn test_minimal_manifest() {
        let file = parse("module example.com/m\n").unwrap();
        assert_eq!(file.module_path, "example.com/m");
        assert_eq!(file.go_version, "");
        assert!(file.requires.is_empty());
    }

    #[test]
    fn test_unknown_directive_reports_line() {
        let err = parse("module m\n\nfrobnicate x\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Manifest);
        match err {
            GographError::Manifest { line, message, .. } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("frobnicate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_module_directive() {
        let err = parse("go 1.21\n").unwrap_err();
        assert!(err.to_string().contains("missing module directive"));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("module m\nrequire (\n\ta v1\n").unwrap_err();
        assert!(err.to_string().contains("go.mod:2"));
    }

    #[test]
    fn test_malformed_require() {
        assert!(parse("module m\nrequire a\n").is_err());
        assert!(parse("module m\nreplace a b\n").is_err());
    }

    #[test]
    fn test_indirect_marker_variants() {
        assert!(is_indirect(Some("indirect")));
        assert!(is_indirect(Some(" indirect; needed by x")));
        assert!(!is_indirect(Some("indirectly")));
        assert!(!is_indirect(None));
    }

    #[test]
    fn test_empty_one_line_blocks() {
        let file = parse("module example.com/m\n\nrequire ()\nreplace ()\nexclude ()\n").unwrap();
        assert!(file.requires.is_empty());
        assert!(file.replaces.is_empty());

        let err = parse("module example.com/m\ngo ()\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Manifest);
    }

    #[test]
    fn test_tool_and_ignore_directives_tolerated() {
        let content = "module example.com/m\n\ngo 1.25\n\n\
tool golang.org/x/tools/cmd/stringer\n\n\
tool (\n\tgithub.com/a/gen\n\tgithub.com/b/lint\n)\n\n\
ignore ./node_modules\n\n\
ignore (\n\t./third_party\n\tcontent/html\n)\n\n\
require github.com/pkg/errors v0.9.1\n";
        let file = parse(content).unwrap();
        assert_eq!(file.go_version, "1.25");
        assert_eq!(
            file.requires,
            vec![Dependency::new("github.com/pkg/errors", "v0.9.1", false)]
        );
    }

    #[test]
    fn test_lex_arrow_without_spaces() {
        let line = lex("a v1=>b v2").unwrap();
        assert_eq!(line.tokens, vec!["a", "v1", "=>", "b", "v2"]);
    }
}
