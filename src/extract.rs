//! Header-delimited sectioning of markdown documents.
//!
//! A section starts at a line beginning with one or more `#` followed by
//! whitespace and runs up to, but not including, the next such line. Text in
//! front of the first header belongs to no section. Fenced code blocks are not
//! parsed, so a `# comment` inside a fence also starts a new section.
//!
//! [`extract_examples`] keeps the sections that contain a code fence opened
//! with a given language token.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Language;

static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s").unwrap());

/// One matcher per supported language, indexed by discriminant.
static LANGUAGE_MATCHERS: Lazy<[FenceMatcher; 2]> =
    Lazy::new(|| Language::ALL.map(|lang| FenceMatcher::new(lang.as_str()).unwrap()));

/// Matches a line opening a fenced code block tagged with one language token.
///
/// The token must end on an ASCII word boundary, so `ts` does not match a
/// ```` ```typescript ```` fence while ```` ```pythoné ```` still counts as
/// `python`. Lines may end in `\n` or a lone `\r`.
#[derive(Debug, Clone)]
pub struct FenceMatcher {
    regex: Regex,
}

impl FenceMatcher {
    pub fn new(token: &str) -> Result<Self, regex::Error> {
        let pattern = format!(r"(?mR)^```{}(?-u:\b)", regex::escape(token));
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn for_language(language: Language) -> &'static FenceMatcher {
        &LANGUAGE_MATCHERS[language as usize]
    }

    /// Whether any line of `section` opens a fence with this token.
    pub fn is_match(&self, section: &str) -> bool {
        self.regex.is_match(section)
    }
}

/// Splits `document` into header-delimited sections, in document order.
///
/// Lines are split on `'\n'` only, so each section is a contiguous slice of
/// the input without its trailing line break. A document without any header
/// is returned whole as a single section.
pub fn split_sections(document: &str) -> Vec<&str> {
    let mut offset = 0;
    let lines: Vec<(usize, &str)> = document
        .split('\n')
        .map(|line| {
            let start = offset;
            offset += line.len() + 1;
            (start, line)
        })
        .collect();

    let mut boundaries: Vec<usize> = lines
        .iter()
        .positions(|(_, line)| HEADER_REGEX.is_match(line))
        .collect();
    if boundaries.is_empty() {
        boundaries.push(0);
    }
    boundaries.push(lines.len());

    boundaries
        .into_iter()
        .tuple_windows()
        .map(|(first, end)| {
            let (start, _) = lines[first];
            let (last_start, last_line) = lines[end - 1];
            &document[start..last_start + last_line.len()]
        })
        .collect()
}

/// Returns every section of `document` containing a code block fenced with
/// `language`, verbatim and in document order.
///
/// No match is not an error; the result is simply empty.
pub fn extract_examples(document: &str, language: Language) -> Vec<String> {
    extract_matching(document, FenceMatcher::for_language(language))
}

/// Like [`extract_examples`], for a fence token outside the supported languages.
pub fn extract_matching(document: &str, matcher: &FenceMatcher) -> Vec<String> {
    split_sections(document)
        .into_iter()
        .filter(|section| matcher.is_match(section))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_with_matching_fence() {
        let doc = "# A\n```typescript\ncode\n```\n# B\ntext";
        let examples = extract_examples(doc, Language::TypeScript);
        assert_eq!(examples, vec!["# A\n```typescript\ncode\n```".to_string()]);
    }

    #[test]
    fn test_adjacent_headers_empty_section_excluded() {
        let doc = "# A\n# B\n```python\nx\n```";
        let examples = extract_examples(doc, Language::Python);
        assert_eq!(examples, vec!["# B\n```python\nx\n```".to_string()]);
    }

    fn matcher(token: &str) -> FenceMatcher {
        FenceMatcher::new(token).unwrap()
    }

    #[test]
    fn test_whole_word_token() {
        let long = "# Setup\n```typescript\nlet x = 1;\n```";
        let short = "# Setup\n```ts\nlet x = 1;\n```";
        assert!(extract_matching(long, &matcher("ts")).is_empty());
        assert_eq!(extract_matching(short, &matcher("ts")), vec![short.to_string()]);
        assert!(extract_examples(short, Language::TypeScript).is_empty());
    }

    #[test]
    fn test_word_boundary_is_ascii() {
        let accented = "# A\n```pythoné\nx\n```";
        assert_eq!(extract_examples(accented, Language::Python), vec![accented.to_string()]);

        let longer = "# A\n```python3\nx\n```";
        assert!(extract_examples(longer, Language::Python).is_empty());
    }

    #[test]
    fn test_fence_after_lone_carriage_return() {
        let doc = "# A\ntext\r```python\nx\n```";
        assert_eq!(extract_examples(doc, Language::Python), vec![doc.to_string()]);
    }

    #[test]
    fn test_language_matchers() {
        for lang in Language::ALL {
            let doc = format!("# {}\n```{}\ncode\n```", lang, lang);
            assert!(FenceMatcher::for_language(lang).is_match(&doc));
            assert_eq!(extract_examples(&doc, lang), vec![doc.clone()]);
        }
    }

    #[test]
    fn test_fence_on_later_line_matches() {
        let doc = "## Install\nRun this:\n\n```python\npip install mcp\n```\n";
        assert_eq!(extract_examples(doc, Language::Python), vec![doc.to_string()]);
    }

    #[test]
    fn test_indented_fence_does_not_match() {
        let doc = "# Nested\n  ```python\n  x = 1\n  ```";
        assert!(extract_examples(doc, Language::Python).is_empty());
    }

    #[test]
    fn test_leading_content_is_not_a_section() {
        let doc = "```python\nprint()\n```\n# Title\nno code here";
        assert_eq!(split_sections(doc), vec!["# Title\nno code here"]);
        assert!(extract_examples(doc, Language::Python).is_empty());
    }

    #[test]
    fn test_no_headers() {
        let doc = "intro\n```python\nx = 1\n```";
        assert_eq!(split_sections(doc), vec![doc]);
        assert_eq!(extract_examples(doc, Language::Python), vec![doc.to_string()]);
        assert!(extract_examples(doc, Language::TypeScript).is_empty());
        assert!(extract_examples("", Language::Python).is_empty());
    }

    #[test]
    fn test_header_requires_whitespace() {
        let doc = "# Real\n#hashtag\n```python\nx\n```";
        assert_eq!(split_sections(doc).len(), 1);
    }

    #[test]
    fn test_comment_inside_fence_splits_section() {
        let doc = "# Script\n```python\n# comment\nx = 1\n```";
        assert_eq!(
            split_sections(doc),
            vec!["# Script\n```python", "# comment\nx = 1\n```"]
        );
        assert_eq!(
            extract_examples(doc, Language::Python),
            vec!["# Script\n```python".to_string()]
        );
    }

    #[test]
    fn test_crlf_lines_are_kept_verbatim() {
        let doc = "# A\r\n```python\r\nx\r\n```\r\n";
        assert_eq!(extract_examples(doc, Language::Python), vec![doc.to_string()]);
    }

    #[test]
    fn test_token_is_escaped() {
        let doc = "# C\n```c++\nint x;\n```\n# Other\n```cxx\n```";
        assert!(extract_matching(doc, &matcher("c+")).is_empty());
        assert!(extract_matching(doc, &matcher("c.x")).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let doc = "# One\n```python\n1\n```\n# Two\n```typescript\n2\n```\n# Three\n```python\n3\n```";
        let examples = extract_examples(doc, Language::Python);
        assert_eq!(examples.len(), 2);
        assert!(examples[0].starts_with("# One"));
        assert!(examples[1].starts_with("# Three"));
    }
}
