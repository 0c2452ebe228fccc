//! Matplotlib script export of a placed graph.

use crate::graph::Graph;
use std::fmt::{self, Write};

/// Writes a Python snippet that draws every edge as a red line, every
/// element as a black circle and every terminal or placeholder as a black
/// square.
pub fn write_pyplot(graph: &Graph, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "import matplotlib.pyplot as plt")?;
    writeln!(out, "plt.figure(figsize=(10, 10));")?;
    for (a, b, _) in graph.edges() {
        let pa = graph.nodes[a].point(graph.axis);
        let pb = graph.nodes[b].point(graph.axis);
        writeln!(
            out,
            "plt.plot([{:.2}, {:.2}], [{:.2}, {:.2}], \"r-\");",
            pa.x, pb.x, pa.y, pb.y
        )?;
    }
    for node in &graph.nodes {
        let p = node.point(graph.axis);
        let style = if node.is_element() { "ko" } else { "ks" };
        writeln!(out, "plt.plot([{:.2}], [{:.2}], \"{style}\");", p.x, p.y)?;
    }
    writeln!(out, "plt.show()")
}
