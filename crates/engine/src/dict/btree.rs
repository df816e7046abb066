use std::io::{self, Write};

use crate::dict::{EntryTuple, TrigramDict};
use crate::trigram::Trigram;

/// Keys (and children) per entry-tree node. Sized so a full leaf of packed
/// keys and tuple pointers stays in the neighborhood of one storage page.
pub const ENTRY_NODE_MAX: usize = 20;

#[derive(Debug)]
enum Node {
    Leaf {
        keys: Vec<i32>,
        tuples: Vec<EntryTuple>,
    },
    Internal {
        seps: Vec<i32>,
        children: Vec<Node>,
    },
}

impl Node {
    fn min_key(&self) -> i32 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { keys, .. } => return keys[0],
                Node::Internal { children, .. } => node = &children[0],
            }
        }
    }

    fn is_full(&self) -> bool {
        match self {
            Node::Leaf { keys, .. } => keys.len() >= ENTRY_NODE_MAX,
            Node::Internal { children, .. } => children.len() >= ENTRY_NODE_MAX,
        }
    }
}

/// B+ tree dictionary over packed 24-bit trigram keys.
///
/// Built bottom-up from the sorted tuple stream; incremental insertion uses
/// pre-emptive splits so descent never meets a full node.
#[derive(Debug)]
pub struct EntryTree {
    root: Node,
    len: usize,
}

impl Default for EntryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryTree {
    pub fn new() -> Self {
        EntryTree {
            root: Node::Leaf { keys: Vec::new(), tuples: Vec::new() },
            len: 0,
        }
    }

    /// Bulk-load from tuples sorted strictly increasing by key.
    pub fn bulk_load(tuples: Vec<EntryTuple>) -> Self {
        debug_assert!(
            tuples.windows(2).all(|w| w[0].key() < w[1].key()),
            "bulk_load input not strictly increasing by key"
        );

        let len = tuples.len();
        if tuples.is_empty() {
            return Self::new();
        }

        let mut leaves: Vec<Node> = Vec::with_capacity(len.div_ceil(ENTRY_NODE_MAX));
        let mut keys = Vec::with_capacity(ENTRY_NODE_MAX);
        let mut batch = Vec::with_capacity(ENTRY_NODE_MAX);
        for tuple in tuples {
            keys.push(tuple.key().packed());
            batch.push(tuple);
            if batch.len() == ENTRY_NODE_MAX {
                leaves.push(Node::Leaf {
                    keys: std::mem::take(&mut keys),
                    tuples: std::mem::take(&mut batch),
                });
            }
        }
        if !batch.is_empty() {
            leaves.push(Node::Leaf { keys, tuples: batch });
        }

        EntryTree {
            root: Self::build_level(leaves),
            len,
        }
    }

    fn build_level(mut children: Vec<Node>) -> Node {
        loop {
            if children.len() == 1 {
                return children.remove(0);
            }

            let mut parents = Vec::with_capacity(children.len().div_ceil(ENTRY_NODE_MAX));
            let mut iter = children.into_iter().peekable();
            while iter.peek().is_some() {
                let group: Vec<Node> = iter.by_ref().take(ENTRY_NODE_MAX).collect();
                let seps = group[1..].iter().map(Node::min_key).collect();
                parents.push(Node::Internal { seps, children: group });
            }
            children = parents;
        }
    }

    pub fn search(&self, packed: i32) -> Option<&EntryTuple> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { keys, tuples } => {
                    return keys.binary_search(&packed).ok().map(|i| &tuples[i]);
                }
                Node::Internal { seps, children } => {
                    let i = seps.partition_point(|s| *s <= packed);
                    node = &children[i];
                }
            }
        }
    }

    /// Insert a tuple; an existing key has its tuple replaced.
    pub fn insert_tuple(&mut self, tuple: EntryTuple) {
        if self.root.is_full() {
            let old_root = std::mem::replace(&mut self.root, Node::Leaf {
                keys: Vec::new(),
                tuples: Vec::new(),
            });
            let mut seps = Vec::new();
            let mut children = vec![old_root];
            Self::split_child(&mut seps, &mut children, 0);
            self.root = Node::Internal { seps, children };
        }

        if self.insert_non_full(tuple) {
            self.len += 1;
        }
    }

    fn insert_non_full(&mut self, tuple: EntryTuple) -> bool {
        let packed = tuple.key().packed();
        let mut node = &mut self.root;

        loop {
            match node {
                Node::Leaf { keys, tuples } => {
                    return match keys.binary_search(&packed) {
                        Ok(i) => {
                            tuples[i] = tuple;
                            false
                        }
                        Err(pos) => {
                            keys.insert(pos, packed);
                            tuples.insert(pos, tuple);
                            true
                        }
                    };
                }
                Node::Internal { seps, children } => {
                    let mut i = seps.partition_point(|s| *s <= packed);
                    if children[i].is_full() {
                        Self::split_child(seps, children, i);
                        if packed >= seps[i] {
                            i += 1;
                        }
                    }
                    node = &mut children[i];
                }
            }
        }
    }

    fn split_child(seps: &mut Vec<i32>, children: &mut Vec<Node>, i: usize) {
        let (sep, right) = match &mut children[i] {
            Node::Leaf { keys, tuples } => {
                // The first key of the right half is promoted; keys stay in
                // the leaves.
                let mid = keys.len().div_ceil(2);
                let right_keys = keys.split_off(mid);
                let right_tuples = tuples.split_off(mid);
                (right_keys[0], Node::Leaf { keys: right_keys, tuples: right_tuples })
            }
            Node::Internal { seps: child_seps, children: child_children } => {
                let mid = child_seps.len() / 2;
                let sep = child_seps[mid];
                let right_seps = child_seps.split_off(mid + 1);
                child_seps.truncate(mid);
                let right_children = child_children.split_off(mid + 1);
                (sep, Node::Internal { seps: right_seps, children: right_children })
            }
        };
        seps.insert(i, sep);
        children.insert(i + 1, right);
    }

    fn visit_node(node: &Node, visit: &mut dyn FnMut(Trigram, &EntryTuple)) {
        match node {
            Node::Leaf { tuples, .. } => {
                for tuple in tuples {
                    visit(tuple.key(), tuple);
                }
            }
            Node::Internal { children, .. } => {
                for child in children {
                    Self::visit_node(child, visit);
                }
            }
        }
    }

    fn dump_node(node: &Node, out: &mut dyn Write, depth: usize, is_root: bool) -> io::Result<()> {
        let indent = "  ".repeat(depth);
        let label = if is_root {
            "Root"
        } else if matches!(node, Node::Leaf { .. }) {
            "Leaf"
        } else {
            "Internal"
        };

        match node {
            Node::Leaf { keys, tuples } => {
                writeln!(out, "{indent}{label}:")?;
                for (key, tuple) in keys.iter().zip(tuples) {
                    let shape = if tuple.is_inline() { "inline" } else { "tree" };
                    writeln!(
                        out,
                        "{indent}  {key} \"{}\" -> {shape}({})",
                        tuple.key(),
                        tuple.count()
                    )?;
                }
            }
            Node::Internal { seps, children } => {
                let rendered: Vec<String> = seps.iter().map(|s| s.to_string()).collect();
                writeln!(out, "{indent}{label}: {}", rendered.join(" "))?;
                for child in children {
                    Self::dump_node(child, out, depth + 1, false)?;
                }
            }
        }
        Ok(())
    }
}

impl TrigramDict for EntryTree {
    fn lookup(&self, tri: Trigram) -> Option<&EntryTuple> {
        self.search(tri.packed())
    }

    fn insert(&mut self, tuple: EntryTuple) {
        self.insert_tuple(tuple);
    }

    fn len(&self) -> usize {
        self.len
    }

    fn for_each(&self, visit: &mut dyn FnMut(Trigram, &EntryTuple)) {
        Self::visit_node(&self.root, visit);
    }

    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "EntryTree ({} keys)", self.len)?;
        Self::dump_node(&self.root, out, 0, true)
    }
}

#[cfg(test)]
#[path = "btree_tests.rs"]
mod tests;
