//! Textual post-passes over rendered YAML.
//!
//! - [`annotate`] inserts declared comment lines above the lines where
//!   their keys begin.
//! - [`normalize_empty_collections`] folds empty aggregates that were
//!   spread over several lines back to `[]` / `{}`.
//!
//! Both passes only insert or join lines; the content of existing lines is
//! never rewritten.

// -----------------------------------------------------------------------------
// CommentTable

/// Comment lines keyed by the path of mapping keys leading to a field.
///
/// A top-level field has a path of length one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentTable {
    entries: Vec<(Vec<String>, Vec<String>)>,
}

impl CommentTable {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers comment lines for a key path. Empty `lines` are ignored,
    /// and a repeated path replaces the earlier lines.
    pub fn insert<P, L>(&mut self, path: P, lines: L)
    where
        P: IntoIterator,
        P::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if path.is_empty() || lines.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = lines,
            None => self.entries.push((path, lines)),
        }
    }

    /// Returns the comment lines of a key path.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p.len() == path.len() && p.iter().zip(path).all(|(a, b)| a == b.as_ref()))
            .map(|(_, lines)| lines.as_slice())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// -----------------------------------------------------------------------------
// annotate

/// The comment marker of the YAML format.
const COMMENT_MARKER: &str = "# ";

/// One entry of the open-key stack: indentation and key, `None` for a
/// sequence item, below which nothing is annotated.
type Frame<'a> = (usize, Option<&'a str>);

/// Inserts the comment lines of `table` immediately above the line where
/// each key starts, using the indentation of that line.
///
/// A line matches when it starts with `key:` at the position of the key
/// path, so a key that is a prefix of another key never matches the longer
/// one.
///
/// ```
/// use yc_doc::annotate::{CommentTable, annotate};
///
/// let mut table = CommentTable::new();
/// table.insert(["name"], ["Player's display name"]);
/// let text = annotate("name: Alice\nname-color: red\n", &table);
/// assert_eq!(text, "# Player's display name\nname: Alice\nname-color: red\n");
/// ```
pub fn annotate(text: &str, table: &CommentTable) -> String {
    if table.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len() + 64 * table.len());
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut block_scalar: Option<usize> = None;

    for raw in text.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if let Some(owner) = block_scalar {
            if content.is_empty() || indent > owner {
                out.push_str(raw);
                continue;
            }
            block_scalar = None;
        }

        if content.is_empty() || content.starts_with('#') {
            out.push_str(raw);
            continue;
        }
        block_scalar = block_scalar_owner(indent, content);

        let (indent, content) = if let Some(item) = sequence_item(content) {
            while stack.last().is_some_and(|(i, _)| *i > indent) {
                stack.pop();
            }
            stack.push((indent, None));
            let inner = item.trim_start_matches(' ');
            (indent + (content.len() - inner.len()), inner)
        } else {
            (indent, content)
        };

        if let Some((key, _)) = split_key(content) {
            while stack.last().is_some_and(|(i, _)| *i >= indent) {
                stack.pop();
            }
            if stack.iter().all(|(_, k)| k.is_some()) {
                let path: Vec<&str> = stack.iter().filter_map(|(_, k)| *k).chain([key]).collect();
                if let Some(lines) = table.get(&path) {
                    let pad = &line[..indent.min(line.len())];
                    for comment in lines {
                        out.push_str(pad);
                        out.push_str(COMMENT_MARKER);
                        out.push_str(comment);
                        out.push('\n');
                    }
                }
            }
            stack.push((indent, Some(key)));
        }

        out.push_str(raw);
    }
    out
}

/// Returns the remainder of a `- ` sequence item line.
fn sequence_item(content: &str) -> Option<&str> {
    if content == "-" {
        Some("")
    } else {
        content.strip_prefix("- ")
    }
}

/// Splits `key: rest` / `key:` into the unquoted key and the rest.
fn split_key(content: &str) -> Option<(&str, &str)> {
    let (key, after) = match content.as_bytes().first()? {
        quote @ (b'\'' | b'"') => {
            let close = content[1..].find(*quote as char)? + 1;
            (&content[1..close], &content[close + 1..])
        }
        _ => {
            let end = content
                .match_indices(':')
                .map(|(i, _)| i)
                .find(|&i| matches!(content.as_bytes().get(i + 1), None | Some(b' ')))?;
            (&content[..end], &content[end..])
        }
    };
    let rest = after.strip_prefix(':')?;
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    if key.is_empty() || key.starts_with(['[', '{', '?']) {
        return None;
    }
    Some((key, rest.trim_start()))
}

fn is_block_scalar_header(rest: &str) -> bool {
    let rest = rest.split(" #").next().unwrap_or(rest).trim_end();
    rest.starts_with(['|', '>'])
}

/// Returns the owner indentation if `content` opens a block scalar, either
/// as `key: |` or as a `- |` sequence item. Body lines are indented deeper
/// than the owner.
fn block_scalar_owner(indent: usize, content: &str) -> Option<usize> {
    let (indent, content) = match sequence_item(content) {
        Some(item) if is_block_scalar_header(item) => return Some(indent),
        Some(item) => {
            let inner = item.trim_start_matches(' ');
            (indent + (content.len() - inner.len()), inner)
        }
        None => (indent, content),
    };
    let (_, rest) = split_key(content)?;
    is_block_scalar_header(rest).then_some(indent)
}

// -----------------------------------------------------------------------------
// normalize_empty_collections

/// Collapses empty aggregates written over several lines into the single
/// line form, e.g. `tags:\n  []` or `tags: [\n]` become `tags: []`.
///
/// The pass is idempotent and does not touch non-empty collections. Lines
/// inside a block scalar body are string content and are kept as they are.
///
/// ```
/// use yc_doc::annotate::normalize_empty_collections;
///
/// let text = "tags:\n  []\nextra: {\n}\nlist:\n- a\n";
/// let once = normalize_empty_collections(text);
/// assert_eq!(once, "tags: []\nextra: {}\nlist:\n- a\n");
/// assert_eq!(normalize_empty_collections(&once), once);
/// ```
pub fn normalize_empty_collections(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut block_scalar: Option<usize> = None;
    let mut i = 0;

    while i < lines.len() {
        let current = lines[i].trim_end_matches(['\n', '\r']);
        let content = current.trim_start_matches(' ');
        let indent = current.len() - content.len();

        if let Some(owner) = block_scalar {
            if content.is_empty() || indent > owner {
                out.push_str(lines[i]);
                i += 1;
                continue;
            }
            block_scalar = None;
        }

        if let Some(owner) = block_scalar_owner(indent, content) {
            block_scalar = Some(owner);
            out.push_str(lines[i]);
            i += 1;
            continue;
        }

        if let Some(next) = lines.get(i + 1) {
            let next = next.trim();
            let joined = if current.ends_with(':') && matches!(next, "[]" | "{}") {
                Some(format!("{current} {next}"))
            } else if let Some(open) = current.strip_suffix(" [")
                && next == "]"
            {
                Some(format!("{open} []"))
            } else if let Some(open) = current.strip_suffix(" {")
                && next == "}"
            {
                Some(format!("{open} {{}}"))
            } else {
                None
            };

            if let Some(joined) = joined {
                let next_ending = &lines[i + 1][lines[i + 1].trim_end_matches(['\n', '\r']).len()..];
                out.push_str(&joined);
                out.push_str(next_ending);
                i += 2;
                continue;
            }
        }

        out.push_str(lines[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&[&str], &[&str])]) -> CommentTable {
        let mut table = CommentTable::new();
        for (path, lines) in entries {
            table.insert(path.iter().copied(), lines.iter().copied());
        }
        table
    }

    #[test]
    fn comment_precedes_top_level_key() {
        let t = table(&[(&["name"], &["Player's display name"])]);
        let out = annotate("name: Alice\ntags:\n- a\n", &t);
        let lines: Vec<_> = out.lines().collect();
        let pos = lines.iter().position(|l| l.starts_with("name:")).unwrap();
        assert_eq!(lines[pos - 1], "# Player's display name");
    }

    #[test]
    fn prefix_key_does_not_match() {
        let t = table(&[(&["name"], &["only me"])]);
        let out = annotate("names: [a]\nname: b\n", &t);
        assert_eq!(out, "names: [a]\n# only me\nname: b\n");
    }

    #[test]
    fn multiple_lines_keep_order() {
        let t = table(&[(&["a"], &["one", "two"])]);
        assert_eq!(annotate("a: 1\n", &t), "# one\n# two\na: 1\n");
    }

    #[test]
    fn nested_keys_use_their_indentation() {
        let t = table(&[(&["region", "min"], &["lower corner"]), (&["min"], &["top"])]);
        let text = "region:\n  min: 1\n  max: 2\nmin: 0\n";
        let out = annotate(text, &t);
        assert_eq!(
            out,
            "region:\n  # lower corner\n  min: 1\n  max: 2\n# top\nmin: 0\n"
        );
    }

    #[test]
    fn keys_inside_sequence_items_are_not_annotated() {
        let t = table(&[(&["list", "name"], &["nope"]), (&["after"], &["yes"])]);
        let text = "list:\n- name: a\n  other: b\nafter: 1\n";
        assert_eq!(annotate(text, &t), "list:\n- name: a\n  other: b\n# yes\nafter: 1\n");
    }

    #[test]
    fn block_scalar_body_is_not_scanned() {
        let t = table(&[(&["name"], &["c"])]);
        let text = "motd: |\n  name: fake\nname: real\n";
        assert_eq!(annotate(text, &t), "motd: |\n  name: fake\n# c\nname: real\n");
    }

    #[test]
    fn sequence_block_scalar_body_is_not_scanned() {
        let t = table(&[(&["name"], &["c"])]);
        let text = "lines:\n- |-\n  name: fake\nname: real\n";
        assert_eq!(annotate(text, &t), "lines:\n- |-\n  name: fake\n# c\nname: real\n");
    }

    #[test]
    fn quoted_keys_match_unquoted() {
        let t = table(&[(&["yes"], &["quoted"])]);
        assert_eq!(annotate("'yes': 1\n", &t), "# quoted\n'yes': 1\n");
    }

    #[test]
    fn existing_text_is_untouched() {
        let text = "a: 1\nb:\n  c: 'x: y'\n";
        assert_eq!(annotate(text, &CommentTable::new()), text);
        assert_eq!(annotate(text, &table(&[(&["zzz"], &["none"])])), text);
    }

    #[test]
    fn normalize_leaves_non_empty_alone() {
        let text = "a:\n- 1\nb:\n  c: 2\nd: []\n";
        assert_eq!(normalize_empty_collections(text), text);
    }

    #[test]
    fn normalize_skips_block_scalar_bodies() {
        let text = "body: |-\n  header:\n  []\n  end:\n  {}\nlist:\n- |-\n  x:\n  []\nempty:\n  []\n";
        assert_eq!(
            normalize_empty_collections(text),
            "body: |-\n  header:\n  []\n  end:\n  {}\nlist:\n- |-\n  x:\n  []\nempty: []\n"
        );
    }

    #[test]
    fn block_scalar_ends_at_owner_indentation() {
        let text = "outer:\n  text: >\n    a:\n    []\n  tags:\n    []\n";
        assert_eq!(
            normalize_empty_collections(text),
            "outer:\n  text: >\n    a:\n    []\n  tags: []\n"
        );
    }

    #[test]
    fn normalize_without_trailing_newline() {
        assert_eq!(normalize_empty_collections("a:\n  []"), "a: []");
    }
}
