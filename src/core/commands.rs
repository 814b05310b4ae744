/// Command collector: flattens a generated tree into placement commands.
use crate::schema::node::{GeneratedLayout, GeneratedNode};

/// Ordered, append-only list of terminal placements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<GeneratedNode>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Walk `layout` depth first, appending Known nodes in order and
    /// descending into the contents of Random ones.
    pub fn collect(&mut self, layout: &GeneratedLayout) {
        for child in &layout.children {
            if child.is_terminal() {
                self.commands.push(child.clone());
            } else if let Some(contents) = &child.contents {
                self.collect(contents);
            }
        }
    }

    pub fn as_slice(&self) -> &[GeneratedNode] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.commands)
    }
}
