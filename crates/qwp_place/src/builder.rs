//! Builds the top-level placement graph from a [`PlacementSource`].
//!
//! Boundary terminals become nodes only when one of the terminal
//! constraints is enabled; every placeable element becomes a node. Each
//! canonical bit forms a net, and each net of `k` nodes is expanded into a
//! clique with weight `1/k` per pair.

use crate::graph::{Graph, Node};
use crate::ids::ElementSlot;
use crate::rng::Xorshift32;
use crate::source::{BoundaryWire, PlacementSource};
use qwp_config::PlacerConfig;
use qwp_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// The top-level graph and the host identities of its element nodes.
#[derive(Debug)]
pub struct BuiltGraph<K> {
    /// The graph, with element nodes referring to slots in `keys` and `names`.
    pub graph: Graph,
    /// Host key per [`ElementSlot`].
    pub keys: Vec<K>,
    /// Display name per [`ElementSlot`].
    pub names: Vec<String>,
    /// Number of boundary terminal nodes.
    pub terminals: usize,
    /// Number of nets left out because they touched too many nodes.
    pub dropped_nets: usize,
}

/// Builds the graph, consuming random values in node creation order.
///
/// Nets above `config.max_net_degree` are reported as
/// [`DiagnosticCode::DROPPED_NET`] warnings and contribute no edges.
pub fn build_graph<S>(
    source: &S,
    config: &PlacerConfig,
    rng: &mut Xorshift32,
    sink: &DiagnosticSink,
) -> BuiltGraph<S::Key>
where
    S: PlacementSource + ?Sized,
{
    let mut graph = Graph::new(config.first_axis);
    let mut nets: BTreeMap<S::Bit, BTreeSet<usize>> = BTreeMap::new();
    let mut terminals = 0;

    if config.left_to_right || config.alphabetical_ordering {
        let wires = source.boundary_wires();
        let ranks = alphabetical_ranks(&wires);
        for (i, wire) in wires.iter().enumerate() {
            let mut node = Node::new(None, rng);
            if config.left_to_right {
                node.tie(if wire.is_input { 0.0 } else { 1.0 });
            }
            if config.alphabetical_ordering {
                if let Some(rank) = ranks.get(&i) {
                    node.alt_tie(*rank);
                }
            }
            let idx = graph.add_node(node);
            terminals += 1;
            for &bit in &wire.bits {
                nets.entry(source.canonical_bit(bit)).or_default().insert(idx);
            }
        }
    }

    let placeable = source.placeable_elements();
    let mut keys = Vec::with_capacity(placeable.len());
    let mut names = Vec::with_capacity(placeable.len());
    for (slot, element) in placeable.into_iter().enumerate() {
        let slot = ElementSlot::from_raw(slot as u32);
        let idx = graph.add_node(Node::new(Some(slot), rng));
        for &bit in &element.bits {
            nets.entry(source.canonical_bit(bit)).or_default().insert(idx);
        }
        keys.push(element.key);
        names.push(element.name);
    }

    let mut dropped_nets = 0;
    for (bit, members) in &nets {
        let degree = members.len();
        if degree > config.max_net_degree {
            dropped_nets += 1;
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::DROPPED_NET,
                    format!("net touches {degree} nodes and is left out of placement"),
                )
                .with_subject(source.describe_bit(*bit))
                .with_note(format!(
                    "nets touching more than {} nodes are not expanded into edges",
                    config.max_net_degree
                ))
                .with_help("raise `max_net_degree` in qwp.toml to include it"),
            );
            continue;
        }
        let weight = 1.0 / degree as f64;
        let members: Vec<usize> = members.iter().copied().collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                graph.add_edge_weight(a, b, weight);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        elements = keys.len(),
        terminals,
        edges = graph.edge_count(),
        nets = nets.len(),
        dropped_nets,
        "built placement graph"
    );

    BuiltGraph {
        graph,
        keys,
        names,
        terminals,
        dropped_nets,
    }
}

/// Computes the secondary-axis position of each boundary wire when ordered
/// by name, keyed by the wire's index in `wires`.
///
/// Inputs and outputs are ranked separately; a wire that is both takes its
/// input rank.
fn alphabetical_ranks<B>(wires: &[BoundaryWire<B>]) -> HashMap<usize, f64> {
    let mut order: Vec<usize> = (0..wires.len()).collect();
    order.sort_by(|&a, &b| wires[a].name.cmp(&wires[b].name).then(a.cmp(&b)));

    let inputs: Vec<usize> = order.iter().copied().filter(|&i| wires[i].is_input).collect();
    let outputs: Vec<usize> = order.iter().copied().filter(|&i| wires[i].is_output).collect();

    let mut ranks = HashMap::new();
    for (rank, &i) in outputs.iter().enumerate() {
        ranks.insert(i, (rank as f64 + 0.5) / outputs.len() as f64);
    }
    for (rank, &i) in inputs.iter().enumerate() {
        ranks.insert(i, (rank as f64 + 0.5) / inputs.len() as f64);
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PlaceableElement;
    use qwp_diagnostics::Severity;

    /// A tiny host where bits are plain integers and aliases are explicit.
    #[derive(Default)]
    struct Toy {
        wires: Vec<BoundaryWire<u32>>,
        elements: Vec<PlaceableElement<u32, u32>>,
        alias: Vec<(u32, u32)>,
    }

    impl PlacementSource for Toy {
        type Key = u32;
        type Bit = u32;

        fn boundary_wires(&self) -> Vec<BoundaryWire<u32>> {
            self.wires.clone()
        }

        fn placeable_elements(&self) -> Vec<PlaceableElement<u32, u32>> {
            self.elements.clone()
        }

        fn canonical_bit(&self, bit: u32) -> u32 {
            self.alias
                .iter()
                .find(|(from, _)| *from == bit)
                .map(|&(_, to)| to)
                .unwrap_or(bit)
        }
    }

    fn element(key: u32, bits: &[u32]) -> PlaceableElement<u32, u32> {
        PlaceableElement {
            key,
            name: format!("e{key}"),
            bits: bits.to_vec(),
        }
    }

    fn wire(name: &str, input: bool, output: bool, bits: &[u32]) -> BoundaryWire<u32> {
        BoundaryWire {
            name: name.into(),
            is_input: input,
            is_output: output,
            bits: bits.to_vec(),
        }
    }

    #[test]
    fn clique_weights_are_inverse_degree() {
        let toy = Toy {
            elements: vec![element(0, &[1]), element(1, &[1]), element(2, &[1, 2]), element(3, &[2])],
            ..Toy::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &PlacerConfig::default(), &mut Xorshift32::new(1), &sink);
        let g = &built.graph;
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_weight(0, 1), Some(1.0 / 3.0));
        assert_eq!(g.edge_weight(0, 2), Some(1.0 / 3.0));
        assert_eq!(g.edge_weight(1, 2), Some(1.0 / 3.0));
        assert_eq!(g.edge_weight(2, 3), Some(0.5));
        assert_eq!(g.edge_weight(0, 3), None);
        assert_eq!(built.dropped_nets, 0);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn repeated_bits_on_one_element_count_once() {
        let toy = Toy {
            elements: vec![element(0, &[7, 7, 7]), element(1, &[7])],
            ..Toy::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &PlacerConfig::default(), &mut Xorshift32::new(1), &sink);
        assert_eq!(built.graph.edge_weight(0, 1), Some(0.5));
    }

    #[test]
    fn aliased_bits_form_one_net() {
        let toy = Toy {
            elements: vec![element(0, &[1]), element(1, &[2])],
            alias: vec![(2, 1)],
            ..Toy::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &PlacerConfig::default(), &mut Xorshift32::new(1), &sink);
        assert_eq!(built.graph.edge_weight(0, 1), Some(0.5));
    }

    #[test]
    fn terminals_only_with_constraints() {
        let toy = Toy {
            wires: vec![wire("in", true, false, &[1])],
            elements: vec![element(0, &[1])],
            ..Toy::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &PlacerConfig::default(), &mut Xorshift32::new(1), &sink);
        assert_eq!(built.terminals, 0);
        assert_eq!(built.graph.node_count(), 1);

        let config = PlacerConfig {
            left_to_right: true,
            ..PlacerConfig::default()
        };
        let built = build_graph(&toy, &config, &mut Xorshift32::new(1), &sink);
        assert_eq!(built.terminals, 1);
        assert_eq!(built.graph.node_count(), 2);
        assert_eq!(built.graph.edge_weight(0, 1), Some(0.5));
    }

    #[test]
    fn left_to_right_ties_inputs_left_and_others_right() {
        let toy = Toy {
            wires: vec![
                wire("i", true, false, &[1]),
                wire("o", false, true, &[2]),
                wire("io", true, true, &[3]),
            ],
            ..Toy::default()
        };
        let config = PlacerConfig {
            left_to_right: true,
            ..PlacerConfig::default()
        };
        let sink = DiagnosticSink::new();
        let g = build_graph(&toy, &config, &mut Xorshift32::new(1), &sink).graph;
        assert!(g.nodes.iter().all(|n| n.tied && !n.alt_tied));
        assert_eq!(g.nodes[0].pos, 0.0);
        assert_eq!(g.nodes[1].pos, 1.0);
        assert_eq!(g.nodes[2].pos, 0.0);
    }

    #[test]
    fn alphabetical_ranks_per_group() {
        let toy = Toy {
            wires: vec![
                wire("c_in", true, false, &[1]),
                wire("a_in", true, false, &[2]),
                wire("z_out", false, true, &[3]),
                wire("b_io", true, true, &[4]),
            ],
            ..Toy::default()
        };
        let config = PlacerConfig {
            alphabetical_ordering: true,
            ..PlacerConfig::default()
        };
        let sink = DiagnosticSink::new();
        let g = build_graph(&toy, &config, &mut Xorshift32::new(1), &sink).graph;
        assert!(g.nodes.iter().all(|n| n.alt_tied && !n.tied));
        // inputs sorted: a_in, b_io, c_in
        assert_eq!(g.nodes[1].alt_pos, 0.5 / 3.0);
        assert_eq!(g.nodes[3].alt_pos, 1.5 / 3.0);
        assert_eq!(g.nodes[0].alt_pos, 2.5 / 3.0);
        // outputs sorted: b_io, z_out
        assert_eq!(g.nodes[2].alt_pos, 1.5 / 2.0);
    }

    #[test]
    fn oversized_net_is_dropped_with_warning() {
        let elements: Vec<_> = (0..5).map(|k| element(k, &[9])).collect();
        let toy = Toy {
            elements,
            ..Toy::default()
        };
        let config = PlacerConfig {
            max_net_degree: 4,
            ..PlacerConfig::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &config, &mut Xorshift32::new(1), &sink);
        assert_eq!(built.graph.edge_count(), 0);
        assert_eq!(built.dropped_nets, 1);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code, DiagnosticCode::DROPPED_NET);
        assert_eq!(diags[0].subject.as_deref(), Some("9"));
    }

    #[test]
    fn element_names_by_slot() {
        let toy = Toy {
            elements: vec![element(4, &[]), element(8, &[])],
            ..Toy::default()
        };
        let sink = DiagnosticSink::new();
        let built = build_graph(&toy, &PlacerConfig::default(), &mut Xorshift32::new(1), &sink);
        assert_eq!(built.names, vec!["e4".to_string(), "e8".to_string()]);
        assert_eq!(built.keys, vec![4, 8]);
    }
}
