//! Mode-specific output routing.
//!
//! Each [`GenerationMode`] maps to one [`OutputPolicy`] variant that decides
//! which bytes of the model reply are kept and where they are written.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::{ChatResponse, GenerationMode};
use crate::error::{GenerateError, Result};

/// Opening fence line: up to 3 spaces, 3+ backticks, info string without backticks.
static OPEN_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,})[^`]*$").expect("valid opening fence regex"));

/// Closing fence line: up to 3 spaces, 3+ backticks, trailing whitespace only.
static CLOSE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,})[ \t]*$").expect("valid closing fence regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Reply written verbatim to the destination.
    Markdown,
    /// First fenced block written over the destination.
    Inline,
    /// Reply written to `<reference_dir>/<file name>.md`.
    Starlight { reference_dir: PathBuf },
}

/// Bytes ready to be written and their target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl OutputPolicy {
    pub fn for_mode(mode: GenerationMode, reference_dir: &Path) -> Self {
        match mode {
            GenerationMode::Markdown => OutputPolicy::Markdown,
            GenerationMode::Inline => OutputPolicy::Inline,
            GenerationMode::Starlight => {
                OutputPolicy::Starlight { reference_dir: reference_dir.to_path_buf() }
            }
        }
    }

    /// Where output for `destination` lands under this policy.
    pub fn target_path(&self, destination: &Path) -> Result<PathBuf> {
        match self {
            OutputPolicy::Markdown | OutputPolicy::Inline => Ok(destination.to_path_buf()),
            OutputPolicy::Starlight { reference_dir } => {
                let name = destination.file_name().ok_or_else(|| {
                    GenerateError::io(
                        "resolve reference page for",
                        destination,
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidInput,
                            "path has no file name",
                        ),
                    )
                })?;
                let mut page = OsString::from(name);
                page.push(".md");
                Ok(reference_dir.join(page))
            }
        }
    }

    /// Pick the bytes to write. `Ok(None)` when the response has no choices.
    pub fn render(&self, response: &ChatResponse, destination: &Path) -> Result<Option<Rendered>> {
        let Some(content) = response.first_content() else {
            return Ok(None);
        };

        let text = match self {
            OutputPolicy::Markdown | OutputPolicy::Starlight { .. } => content,
            OutputPolicy::Inline => {
                extract_first_fenced_block(content).ok_or(GenerateError::NoCodeBlockFound)?
            }
        };

        let path = self.target_path(destination)?;
        Ok(Some(Rendered { path, bytes: text.as_bytes().to_vec() }))
    }
}

/// Inner text of the first backtick fenced block in `content`.
///
/// The block closes on a line holding only a backtick run at least as long as
/// the opening one, so fences nested inside the code do not end it.
pub fn extract_first_fenced_block(content: &str) -> Option<&str> {
    let mut offset = 0;
    let mut open: Option<(usize, usize)> = None;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let bare = line.trim_end_matches(['\n', '\r']);

        match open {
            None => {
                if let Some(caps) = OPEN_FENCE_RE.captures(bare) {
                    open = Some((caps[1].len(), offset));
                }
            }
            Some((fence_len, body_start)) => {
                if let Some(caps) = CLOSE_FENCE_RE.captures(bare) {
                    if caps[1].len() >= fence_len {
                        return Some(&content[body_start..start]);
                    }
                }
            }
        }
    }
    None
}

/// Create or truncate the target. Parent directories must already exist.
pub fn write_output(rendered: &Rendered) -> Result<()> {
    std::fs::write(&rendered.path, &rendered.bytes)
        .map_err(|err| GenerateError::io("write", &rendered.path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ChoiceMessage};
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    fn reply(content: &str) -> ChatResponse {
        ChatResponse { choices: vec![Choice { message: ChoiceMessage { content: content.into() } }] }
    }

    #[test]
    fn markdown_writes_content_verbatim() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("main.go.md");
        let content = "# Docs\n\n```go\nfunc main() {}\n```\n\ttrailing  ";

        let rendered = OutputPolicy::Markdown.render(&reply(content), &dest).unwrap().unwrap();
        write_output(&rendered).unwrap();

        assert_eq!(rendered.path, dest);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), content);
    }

    #[test]
    fn inline_keeps_only_first_block() {
        let content = "intro\n```go\npackage main\n```\nthen\n```go\npackage other\n```\n";
        let rendered =
            OutputPolicy::Inline.render(&reply(content), Path::new("main.go")).unwrap().unwrap();
        let text = String::from_utf8(rendered.bytes).unwrap();
        assert_eq!(text, "package main\n");
        assert!(!text.contains("package other"));
    }

    #[test]
    fn inline_without_block_is_an_error() {
        let err =
            OutputPolicy::Inline.render(&reply("no code here"), Path::new("a.rs")).unwrap_err();
        assert!(matches!(err, GenerateError::NoCodeBlockFound));
    }

    #[test]
    fn unterminated_fence_is_not_a_block() {
        assert_eq!(extract_first_fenced_block("```rust\nfn main() {}\n"), None);
    }

    #[test]
    fn fence_without_info_string() {
        assert_eq!(extract_first_fenced_block("```\nx = 1\n```"), Some("x = 1\n"));
    }

    #[test]
    fn doc_comment_fences_stay_inside_block() {
        let content = "```rust\n/// Adds.\n///\n/// ```\n/// assert_eq!(add(1, 2), 3);\n/// ```\npub fn add(a: i32, b: i32) -> i32 { a + b }\n```";
        let rendered =
            OutputPolicy::Inline.render(&reply(content), Path::new("lib.rs")).unwrap().unwrap();
        assert_eq!(
            String::from_utf8(rendered.bytes).unwrap(),
            "/// Adds.\n///\n/// ```\n/// assert_eq!(add(1, 2), 3);\n/// ```\npub fn add(a: i32, b: i32) -> i32 { a + b }\n"
        );
    }

    #[test]
    fn longer_fence_wraps_shorter_ones() {
        assert_eq!(
            extract_first_fenced_block("````markdown\n```go\npackage main\n```\n````\n"),
            Some("```go\npackage main\n```\n")
        );
    }

    #[test]
    fn indented_closing_fence_with_trailing_space() {
        assert_eq!(extract_first_fenced_block("  ```py\nx = 1\n   ```  \r\nafter"), Some("x = 1\n"));
    }

    #[test]
    fn inline_backticks_do_not_close() {
        assert_eq!(
            extract_first_fenced_block("```js\nconst s = `a```b`;\n```\n"),
            Some("const s = `a```b`;\n")
        );
    }

    #[cfg(unix)]
    #[test]
    fn starlight_keeps_non_utf8_file_names() {
        use std::os::unix::ffi::OsStrExt;

        let policy = OutputPolicy::Starlight { reference_dir: PathBuf::from("ref") };
        let name = std::ffi::OsStr::from_bytes(b"caf\xe9.go");
        let target = policy.target_path(&Path::new("/src").join(name)).unwrap();
        assert_eq!(target.file_name().unwrap().as_bytes(), b"caf\xe9.go.md");
    }

    #[test]
    fn starlight_uses_reference_dir_and_basename() {
        let policy = OutputPolicy::for_mode(
            GenerationMode::Starlight,
            Path::new("docs/src/content/docs/reference"),
        );
        assert_eq!(
            policy.target_path(Path::new("/a/b/foo.go")).unwrap(),
            PathBuf::from("docs/src/content/docs/reference/foo.go.md")
        );
        assert_eq!(
            policy.target_path(Path::new("foo.go")).unwrap(),
            PathBuf::from("docs/src/content/docs/reference/foo.go.md")
        );
    }

    #[test]
    fn starlight_writes_reply_into_reference_dir() {
        let tmp = TempDir::new().unwrap();
        let policy = OutputPolicy::Starlight { reference_dir: tmp.path().to_path_buf() };

        let rendered = policy
            .render(&reply("---\ntitle: foo\n---\n"), Path::new("/x/y/foo.go"))
            .unwrap()
            .unwrap();
        write_output(&rendered).unwrap();

        let written = std::fs::read_to_string(tmp.path().join("foo.go.md")).unwrap();
        assert_eq!(written, "---\ntitle: foo\n---\n");
    }

    #[test]
    fn empty_choices_render_nothing() {
        for policy in [OutputPolicy::Markdown, OutputPolicy::Inline] {
            assert!(policy.render(&ChatResponse::default(), Path::new("x")).unwrap().is_none());
        }
    }

    #[test]
    fn missing_parent_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let rendered =
            Rendered { path: tmp.path().join("missing").join("out.md"), bytes: b"x".to_vec() };
        assert!(matches!(write_output(&rendered), Err(GenerateError::Io { .. })));
    }
}
