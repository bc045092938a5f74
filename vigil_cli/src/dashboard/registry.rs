//! Node roster as fetched from the backend

use vigil_common::Node;

/// Holds the fetched node roster in fetch order
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster with a freshly fetched one
    pub fn load(&mut self, nodes: Vec<Node>) {
        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].iter().any(|n| n.name == node.name) {
                tracing::warn!("Duplicate node name in roster: {}", node.name);
            }
        }
        self.nodes = nodes;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes currently marked live
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.live).count()
    }

    /// Roster padded with placeholder cards up to `minimum` entries.
    ///
    /// The stored roster is left untouched; rosters already at or above
    /// `minimum` come back unchanged.
    pub fn display_roster(&self, minimum: usize) -> Vec<Node> {
        let mut roster = self.nodes.clone();
        while roster.len() < minimum {
            roster.push(Node::placeholder());
        }
        roster
    }

    /// Exact-match lookup by node name
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, live: bool) -> Node {
        Node {
            name: name.to_string(),
            icon: format!("[{}]", name),
            info: String::new(),
            live,
        }
    }

    #[test]
    fn test_display_roster_pads_short_rosters() {
        let mut registry = NodeRegistry::new();
        registry.load(vec![node("fra", true)]);

        let roster = registry.display_roster(4);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].name, "fra");
        assert!(roster[1..].iter().all(|n| n.is_placeholder() && n.icon == "-" && !n.live));

        // stored roster is not padded
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_display_roster_keeps_long_rosters() {
        let mut registry = NodeRegistry::new();
        let nodes: Vec<Node> = (0..5).map(|i| node(&format!("n{}", i), true)).collect();
        registry.load(nodes.clone());

        let roster = registry.display_roster(4);
        assert_eq!(roster, nodes);

        let empty = NodeRegistry::new();
        assert_eq!(empty.display_roster(4).len(), 4);
        assert!(empty.display_roster(0).is_empty());
    }

    #[test]
    fn test_display_roster_at_minimum_is_unchanged() {
        let nodes = vec![
            node("fra", true),
            node("sjc", false),
            node("syd", true),
            node("gru", true),
        ];
        let mut registry = NodeRegistry::new();
        registry.load(nodes.clone());

        let roster = registry.display_roster(4);
        assert_eq!(roster, nodes);
        assert!(roster.iter().all(|n| !n.is_placeholder()));
    }

    #[test]
    fn test_find_by_name() {
        let mut registry = NodeRegistry::new();
        registry.load(vec![node("fra", true), node("sjc", false)]);

        assert_eq!(registry.find_by_name("sjc").map(|n| n.live), Some(false));
        assert!(registry.find_by_name("SJC").is_none());
        assert!(registry.find_by_name("").is_none());
        assert_eq!(registry.live_count(), 1);
    }
}
