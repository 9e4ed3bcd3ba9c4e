//! 状态图生成
//!
//! 从起始状态递归展开所有合法走法，值相等的状态合并为同一节点

use std::collections::HashSet;

use protocol::{Player, State};
use tracing::{debug, info};

use crate::graph::{NodeId, StateGraph};

/// 从 `state` 展开完整状态图并合并到 `graph` 中，返回同一个图
///
/// `player` 为当前走子方，每层递归交替。每个节点在一次调用中只展开一次：
/// 展开时先清空其出边再按 2、3、4 的顺序重建，
/// 因此对已有的图重复调用得到相同的结果。
pub fn generate_graph(state: State, player: Player, mut graph: StateGraph) -> StateGraph {
    let root = graph.add_node(state);
    let mut expanded = HashSet::new();
    expand(&mut graph, root, player, &mut expanded);

    info!(
        start = state.actual_number(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "状态图生成完成"
    );
    graph
}

fn expand(graph: &mut StateGraph, id: NodeId, player: Player, expanded: &mut HashSet<NodeId>) {
    if !expanded.insert(id) {
        return;
    }

    let state = graph.state(id);
    graph.clear_edges(id);

    // 终局状态没有子节点
    if state.is_terminal() {
        return;
    }

    for (divisor, child) in state.successors() {
        let existing = graph.node_id(&child);
        let child_id = existing.unwrap_or_else(|| graph.add_node(child));
        if existing.is_some() {
            debug!(%state, %child, divisor, "汇合到已有节点");
        }
        graph.push_edge(id, child_id, divisor);
        expand(graph, child_id, player.opponent(), expanded);
    }
}
