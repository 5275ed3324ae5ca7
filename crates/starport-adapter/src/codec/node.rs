//! Node - Generic ordered hierarchical container
//!
//! A node has a name, an ordered list of `key = value` pairs (keys may
//! repeat), and an ordered list of child nodes. The text form is
//! brace-delimited, tab-indented, and treats `//` as a comment marker to the
//! end of the line:
//!
//! ```text
//! root
//! {
//!     profiles
//!     {
//!         profile
//!         {
//!             profileName = KSTS
//!         }
//!     }
//! }
//! ```
//!
//! Repeated keys are how sequences are stored, and a present-but-empty
//! child node is different from no child node at all; both distinctions
//! survive a round-trip.

use thiserror::Error;

/// Error while reading the text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeParseError {
    #[error("unexpected end of input (unclosed node?)")]
    UnexpectedEnd,

    #[error("line {line}: expected node name, found '{found}'")]
    ExpectedName { line: usize, found: String },

    #[error("line {line}: expected '{{' after node name '{name}'")]
    ExpectedBrace { line: usize, name: String },

    #[error("line {line}: value entry with empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: trailing content after root node")]
    TrailingContent { line: usize },
}

/// Generic ordered hierarchical node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    name: String,
    values: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    /// First value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in insertion order.
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child named `name`, in insertion order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Emit the text form.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.name);
        out.push('\n');
        out.push_str(&indent);
        out.push_str("{\n");
        for (key, value) in &self.values {
            out.push_str(&indent);
            out.push('\t');
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value);
            out.push('\n');
        }
        for child in &self.children {
            child.write(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }

    /// Parse one root node from the text form.
    pub fn parse(text: &str) -> Result<Node, NodeParseError> {
        // Strip comments and blank lines first; the grammar is line-based.
        let mut lines: Vec<(usize, &str)> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = match raw.find("//") {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let line = line.trim();
            if !line.is_empty() {
                lines.push((idx + 1, line));
            }
        }

        let mut pos = 0;
        let node = Self::parse_node(&lines, &mut pos)?;
        if pos != lines.len() {
            return Err(NodeParseError::TrailingContent {
                line: lines[pos].0,
            });
        }
        Ok(node)
    }

    fn parse_node(lines: &[(usize, &str)], pos: &mut usize) -> Result<Node, NodeParseError> {
        let (line_no, header) = *lines.get(*pos).ok_or(NodeParseError::UnexpectedEnd)?;

        // Accept both "name" followed by "{" and "name {" on one line.
        let (name, brace_consumed) = match header.strip_suffix('{') {
            Some(stripped) => (stripped.trim(), true),
            None => (header, false),
        };
        if name.is_empty() || name.contains('=') || name.contains('}') {
            return Err(NodeParseError::ExpectedName {
                line: line_no,
                found: header.to_string(),
            });
        }
        *pos += 1;

        if !brace_consumed {
            match lines.get(*pos) {
                Some((_, "{")) => *pos += 1,
                _ => {
                    return Err(NodeParseError::ExpectedBrace {
                        line: line_no,
                        name: name.to_string(),
                    })
                }
            }
        }

        let mut node = Node::new(name);
        loop {
            let (line_no, line) = *lines.get(*pos).ok_or(NodeParseError::UnexpectedEnd)?;
            if line == "}" {
                *pos += 1;
                return Ok(node);
            }
            if let Some(eq) = line.find('=') {
                let key = line[..eq].trim();
                let value = line[eq + 1..].trim();
                if key.is_empty() {
                    return Err(NodeParseError::EmptyKey { line: line_no });
                }
                node.add_value(key, value);
                *pos += 1;
            } else {
                node.add_child(Self::parse_node(lines, pos)?);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::new("root");
        let mut profiles = Node::new("profiles");
        let mut profile = Node::new("profile");
        profile.add_value("profileName", "KSTS");
        profile.add_value("crew", "Bob");
        profile.add_value("crew", "Val");
        profiles.add_child(profile);
        root.add_child(profiles);
        root.add_child(Node::new("missions"));
        root
    }

    #[test]
    fn test_text_round_trip() {
        let root = sample();
        let text = root.to_text();
        let parsed = Node::parse(&text).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn test_repeated_keys_keep_order() {
        let root = sample();
        let profile = root.child("profiles").unwrap().child("profile").unwrap();
        let crew: Vec<&str> = profile.values_of("crew").collect();
        assert_eq!(crew, vec!["Bob", "Val"]);
    }

    #[test]
    fn test_empty_child_survives_round_trip() {
        let mut root = Node::new("root");
        root.add_child(Node::new("missions"));
        let parsed = Node::parse(&root.to_text()).unwrap();
        assert!(parsed.child("missions").is_some());
        assert!(parsed.child("missions").unwrap().children().is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let text = "\
root // the save root
{
\t// nothing here yet
\tkey = value

}
";
        let node = Node::parse(text).unwrap();
        assert_eq!(node.value("key"), Some("value"));
    }

    #[test]
    fn test_brace_on_name_line_is_accepted() {
        let node = Node::parse("root {\n\tkey = value\n}\n").unwrap();
        assert_eq!(node.value("key"), Some("value"));
    }

    #[test]
    fn test_unclosed_node_is_an_error() {
        let err = Node::parse("root\n{\nkey = value\n").unwrap_err();
        assert_eq!(err, NodeParseError::UnexpectedEnd);
    }

    #[test]
    fn test_trailing_content_is_an_error() {
        let err = Node::parse("root\n{\n}\nextra\n{\n}\n").unwrap_err();
        assert!(matches!(err, NodeParseError::TrailingContent { .. }));
    }
}
