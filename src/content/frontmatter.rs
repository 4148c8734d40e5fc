//! Front-matter parsing
//!
//! A post starts with `Key: Value` lines and the header ends at the first
//! blank line. Keys are matched case-insensitively; a line indented with
//! whitespace continues the previous value.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref HEADER_LINE: Regex =
        Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)\s*:\s*(.*?)\s*$").unwrap();
}

/// Why a header block could not be parsed
#[derive(Debug, Error, PartialEq)]
pub enum FrontMatterError {
    #[error("no `Key: Value` header at the top of the file")]
    Missing,
    #[error("line {line}: expected `Key: Value`, found {text:?}")]
    MalformedLine { line: usize, text: String },
}

/// Header metadata from a post or page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub lang: Option<String>,
    pub status: Option<String>,

    /// Unrecognised keys, lowercased, in header order
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse the header block from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut entries: Vec<(String, String)> = Vec::new();
        let mut offset = 0;

        for (idx, raw) in content.split_inclusive('\n').enumerate() {
            offset += raw.len();
            let line = raw.trim_end_matches(['\n', '\r']);

            if line.trim().is_empty() {
                break;
            }

            if let Some(caps) = HEADER_LINE.captures(line) {
                entries.push((caps[1].to_lowercase(), caps[2].to_string()));
            } else if line.starts_with([' ', '\t']) && !entries.is_empty() {
                if let Some((_, value)) = entries.last_mut() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(line.trim());
                }
            } else if entries.is_empty() {
                return Err(FrontMatterError::Missing);
            } else {
                return Err(FrontMatterError::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }

        if entries.is_empty() {
            return Err(FrontMatterError::Missing);
        }

        let mut fm = FrontMatter::default();
        for (key, value) in entries {
            fm.set(key, value);
        }

        let body = content.get(offset..).unwrap_or("");
        Ok((fm, body))
    }

    fn set(&mut self, key: String, value: String) {
        let slot = match key.as_str() {
            "title" => &mut self.title,
            "date" => &mut self.date,
            "modified" => &mut self.modified,
            "category" => &mut self.category,
            "slug" => &mut self.slug,
            "author" => &mut self.author,
            "summary" => &mut self.summary,
            "lang" => &mut self.lang,
            "status" => &mut self.status,
            "tags" => {
                self.tags = split_tags(&value);
                return;
            }
            _ => {
                self.extra.insert(key, value);
                return;
            }
        };
        *slot = Some(value).filter(|v| !v.is_empty());
    }
}

/// Split a comma separated tag list, dropping blanks and repeats
fn split_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let content = "Title: Hello, world!\nDate: 2017-09-28 22:00\nCategory: python\nTags: django, rest\n\nThis is the content.\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello, world!"));
        assert_eq!(fm.date.as_deref(), Some("2017-09-28 22:00"));
        assert_eq!(fm.category.as_deref(), Some("python"));
        assert_eq!(fm.tags, vec!["django", "rest"]);
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let (fm, _) = FrontMatter::parse("TITLE: A\ntags: x\n\nbody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("A"));
        assert_eq!(fm.tags, vec!["x"]);
    }

    #[test]
    fn test_tags_are_a_set() {
        let (fm, _) = FrontMatter::parse("Title: A\nTags: b, a, b, , a\n\n").unwrap();
        assert_eq!(fm.tags, vec!["b", "a"]);
    }

    #[test]
    fn test_continuation_line() {
        let content = "Title: A\nSummary: first half\n    second half\n\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.summary.as_deref(), Some("first half second half"));
    }

    #[test]
    fn test_unknown_keys_kept_in_order() {
        let content = "Title: A\nZebra: 1\nApple: 2\n\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_header_without_body() {
        let (fm, remaining) = FrontMatter::parse("Title: Only a title").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Only a title"));
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, remaining) = FrontMatter::parse("Title: A\r\nSlug: a\r\n\r\nbody").unwrap();
        assert_eq!(fm.slug.as_deref(), Some("a"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            FrontMatter::parse("# Just markdown\n\ntext").unwrap_err(),
            FrontMatterError::Missing
        );
        assert_eq!(
            FrontMatter::parse("\nTitle: late").unwrap_err(),
            FrontMatterError::Missing
        );
    }

    #[test]
    fn test_malformed_line() {
        let err = FrontMatter::parse("Title: A\nnot a header\n\n").unwrap_err();
        assert_eq!(
            err,
            FrontMatterError::MalformedLine {
                line: 2,
                text: "not a header".to_string()
            }
        );
    }

    #[test]
    fn test_url_value_is_not_split() {
        let (fm, _) = FrontMatter::parse("Title: A\nCanonical: https://x.test/a\n\n").unwrap();
        assert_eq!(fm.extra["canonical"], "https://x.test/a");
    }
}
