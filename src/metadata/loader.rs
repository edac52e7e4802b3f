use std::collections::HashMap;

use yaml_rust2::{
    parser::{Event, EventReceiver, Parser, Tag},
    scanner::TScalarStyle,
};

use super::{key_to_string, resolve::resolve_plain, MetaValue, Metadata};
use crate::error::FrontmatterError;

enum Node {
    Sequence {
        anchor: usize,
        items: Vec<MetaValue>,
    },
    Mapping {
        anchor: usize,
        metadata: Metadata,
        key: Option<String>,
    },
}

/// Builds a `MetaValue` from parser events. Scalar style is visible here, so
/// only plain scalars go through implicit typing.
#[derive(Default)]
struct Loader {
    stack: Vec<Node>,
    anchors: HashMap<usize, MetaValue>,
    root: Option<MetaValue>,
    error: Option<FrontmatterError>,
}

fn scalar(
    value: String,
    style: TScalarStyle,
    tag: Option<&Tag>,
) -> Result<MetaValue, FrontmatterError> {
    let plain = matches!(style, TScalarStyle::Plain);
    if !plain || tag.is_some_and(|t| t.suffix == "str") {
        return Ok(MetaValue::String(value));
    }
    resolve_plain(&value)
}

impl Loader {
    fn push_value(&mut self, value: MetaValue, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }

        match self.stack.last_mut() {
            None => {
                // only the first document counts
                if self.root.is_none() {
                    self.root = Some(value);
                }
            }
            Some(Node::Sequence { items, .. }) => items.push(value),
            Some(Node::Mapping { metadata, key, .. }) => match key.take() {
                None => match key_to_string(value) {
                    Ok(k) => *key = Some(k),
                    Err(e) => self.error = Some(e),
                },
                // repeated keys: last one wins
                Some(k) => {
                    metadata.insert(k, value);
                }
            },
        }
    }
}

impl EventReceiver for Loader {
    fn on_event(&mut self, ev: Event) {
        if self.error.is_some() {
            return;
        }

        match ev {
            Event::Scalar(value, style, anchor, tag) => match scalar(value, style, tag.as_ref()) {
                Ok(v) => self.push_value(v, anchor),
                Err(e) => self.error = Some(e),
            },
            Event::SequenceStart(anchor, ..) => self.stack.push(Node::Sequence {
                anchor,
                items: vec![],
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Node::Mapping {
                anchor,
                metadata: Metadata::new(),
                key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (value, anchor) = match self.stack.pop() {
                    Some(Node::Sequence { anchor, items }) => (MetaValue::Sequence(items), anchor),
                    Some(Node::Mapping {
                        anchor, metadata, ..
                    }) => (MetaValue::Mapping(metadata), anchor),
                    None => return,
                };
                self.push_value(value, anchor);
            }
            Event::Alias(id) => {
                let value = self.anchors.get(&id).cloned().unwrap_or(MetaValue::Null);
                self.push_value(value, 0);
            }
            _ => {}
        }
    }
}

/// Loads the first YAML document of `source`. An empty document is `Null`.
pub(crate) fn load(source: &str) -> Result<MetaValue, FrontmatterError> {
    let mut loader = Loader::default();
    Parser::new(source.chars()).load(&mut loader, false)?;

    match loader.error {
        Some(e) => Err(e),
        None => Ok(loader.root.unwrap_or(MetaValue::Null)),
    }
}
