//! Nested form decoding for `application/x-www-form-urlencoded` bodies.
//!
//! # Responsibilities
//! - Turn bracketed keys (`call[from]=...`) into nested objects
//! - Collect repeated keys and `[]` / `[n]` segments into arrays
//! - Keep every value a string; no type coercion
//!
//! # Design Decisions
//! - Bracket nesting stops after [`MAX_DEPTH`] levels; the rest of the key
//!   becomes one literal key at the deepest level
//! - Numeric segments above [`ARRAY_LIMIT`] are object keys, not indexes
//! - Sparse indexes are compacted in ascending order; `[]` pushes come last
//! - A pair that conflicts with an earlier pair's shape (a plain value where
//!   an object already sits, or the reverse) is dropped

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Deepest bracket nesting that is decoded structurally.
pub const MAX_DEPTH: usize = 5;

/// Largest numeric segment treated as an array index.
pub const ARRAY_LIMIT: usize = 20;

/// Pairs beyond this count are ignored.
pub const PARAMETER_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Push,
}

impl Segment {
    fn classify(inner: &str) -> Self {
        if inner.is_empty() {
            return Segment::Push;
        }
        match inner.parse::<usize>() {
            Ok(index) if index <= ARRAY_LIMIT && index.to_string() == inner => Segment::Index(index),
            _ => Segment::Key(inner.to_string()),
        }
    }

    fn into_key(self) -> Option<String> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(index) => Some(index.to_string()),
            Segment::Push => None,
        }
    }
}

/// Split `a[b][0][]` into its root and bracket segments.
fn parse_key(key: &str) -> Option<(String, Vec<Segment>)> {
    if key.is_empty() {
        return None;
    }

    let (root, mut rest) = match key.find('[') {
        Some(start) => key.split_at(start),
        None => return Some((key.to_string(), Vec::new())),
    };

    let mut segments = Vec::new();
    while segments.len() < MAX_DEPTH && rest.starts_with('[') {
        let Some(end) = rest.find(']') else { break };
        let inner = &rest[1..end];
        if inner.contains('[') {
            break;
        }
        segments.push(Segment::classify(inner));
        rest = &rest[end + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Key(rest.to_string()));
    }

    if root.is_empty() {
        if segments.is_empty() {
            return None;
        }
        let root = segments.remove(0).into_key()?;
        return Some((root, segments));
    }
    Some((root.to_string(), segments))
}

#[derive(Debug)]
enum Node {
    Leaf(Vec<String>),
    Object(BTreeMap<String, Node>),
    Array(Vec<(Option<usize>, Node)>),
}

impl Node {
    fn fresh(rest: &[Segment]) -> Self {
        match rest.first() {
            None => Node::Leaf(Vec::new()),
            Some(Segment::Key(_)) => Node::Object(BTreeMap::new()),
            Some(_) => Node::Array(Vec::new()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Leaf(_) => "value",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Re-key an array as an object so a named segment can be added to it.
    fn array_to_object(&mut self) {
        if let Node::Array(items) = self {
            let mut map = BTreeMap::new();
            for (position, (index, node)) in std::mem::take(items).into_iter().enumerate() {
                map.entry(index.unwrap_or(position).to_string()).or_insert(node);
            }
            *self = Node::Object(map);
        }
    }

    fn insert(&mut self, rest: &[Segment], value: String) -> Result<(), &'static str> {
        let Some((segment, tail)) = rest.split_first() else {
            return match self {
                Node::Leaf(values) => {
                    values.push(value);
                    Ok(())
                }
                other => Err(other.kind()),
            };
        };

        if matches!(segment, Segment::Key(_)) {
            self.array_to_object();
        }

        match (segment, self) {
            (Segment::Key(key), Node::Object(map)) => map
                .entry(key.clone())
                .or_insert_with(|| Node::fresh(tail))
                .insert(tail, value),
            (Segment::Index(index), Node::Object(map)) => map
                .entry(index.to_string())
                .or_insert_with(|| Node::fresh(tail))
                .insert(tail, value),
            (Segment::Index(index), Node::Array(items)) => {
                let position = match items.iter().position(|(i, _)| *i == Some(*index)) {
                    Some(position) => position,
                    None => {
                        items.push((Some(*index), Node::fresh(tail)));
                        items.len() - 1
                    }
                };
                items[position].1.insert(tail, value)
            }
            (Segment::Push, Node::Array(items)) => {
                items.push((None, Node::fresh(tail)));
                let last = items.len() - 1;
                items[last].1.insert(tail, value)
            }
            (_, other) => Err(other.kind()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Node::Leaf(mut values) if values.len() == 1 => Value::String(values.remove(0)),
            Node::Leaf(values) => Value::Array(values.into_iter().map(Value::String).collect()),
            Node::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect::<Map<_, _>>(),
            ),
            Node::Array(mut items) => {
                items.sort_by_key(|(index, _)| index.unwrap_or(usize::MAX));
                Value::Array(items.into_iter().map(|(_, node)| node.into_value()).collect())
            }
        }
    }
}

/// Decode a urlencoded body into a JSON object of strings, arrays and
/// nested objects.
pub fn decode_form(bytes: &[u8]) -> Value {
    let mut root: BTreeMap<String, Node> = BTreeMap::new();

    for (key, value) in url::form_urlencoded::parse(bytes).take(PARAMETER_LIMIT) {
        let Some((name, segments)) = parse_key(&key) else {
            continue;
        };
        let node = root.entry(name).or_insert_with(|| Node::fresh(&segments));
        if let Err(existing) = node.insert(&segments, value.into_owned()) {
            tracing::debug!(key = %key, existing, "Dropped form field with conflicting shape");
        }
    }

    Node::Object(root).into_value()
}
