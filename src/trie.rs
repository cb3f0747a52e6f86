use std::collections::HashMap;
use std::path::Path;
use tracing::trace;

/// Represents a node in a trie of written paths.
pub struct TrieNode {
    pub children: HashMap<String, TrieNode>,
    pub byte_count: Option<usize>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode {
            children: HashMap::new(),
            byte_count: None,
        }
    }

    /// Calculates the total number of bytes in the subtree.
    pub fn calculate_total_bytes(&self) -> usize {
        self.byte_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(|child| child.calculate_total_bytes())
                .sum::<usize>()
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
        }
    }

    /// Inserts a path with its byte count. A repeated path keeps the last count.
    pub fn insert(&mut self, path: &Path, byte_count: usize) {
        trace!("Inserting path: {:?} with {} bytes", path, byte_count);
        let mut current_node = &mut self.root;
        for component in path.iter() {
            let component_str = component.to_string_lossy().into_owned();
            current_node = current_node
                .children
                .entry(component_str)
                .or_insert_with(TrieNode::new);
        }
        if current_node.byte_count.is_some() {
            trace!("Overwriting existing byte count for path: {:?}", path);
        }
        current_node.byte_count = Some(byte_count);
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }
}
