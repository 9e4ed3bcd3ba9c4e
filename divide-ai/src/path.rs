//! 路径与深度查询

use std::collections::{HashMap, HashSet};

use protocol::{Result, State};

use crate::graph::{NodeId, StateGraph};

/// 从 `origin` 到 `goal` 的路径（不含 `origin`，含 `goal`）
///
/// 使用显式栈的深度优先搜索，返回找到的第一条路径，不保证最短。
/// `goal` 不可达时返回空序列；`origin` 不在图中时返回 NodeNotFound。
pub fn get_path(graph: &StateGraph, origin: &State, goal: &State) -> Result<Vec<State>> {
    let origin = graph.require(origin)?;
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(NodeId, Vec<NodeId>)> = vec![(origin, Vec::new())];

    while let Some((current, path)) = stack.pop() {
        visited.insert(current);

        if graph.state(current) == *goal {
            return Ok(path.into_iter().map(|id| graph.state(id)).collect());
        }

        for edge in graph.edges(current) {
            if !visited.contains(&edge.target) {
                let mut next = path.clone();
                next.push(edge.target);
                stack.push((edge.target, next));
            }
        }
    }

    Ok(Vec::new())
}

/// `origin` 可达子图的高度：无子节点为 1，否则为 1 + 子节点最大深度
pub fn get_depth(graph: &StateGraph, origin: &State) -> Result<u32> {
    let origin = graph.require(origin)?;
    let mut memo = HashMap::new();
    Ok(depth_of(graph, origin, &mut memo))
}

fn depth_of(graph: &StateGraph, id: NodeId, memo: &mut HashMap<NodeId, u32>) -> u32 {
    if let Some(&depth) = memo.get(&id) {
        return depth;
    }

    let depth = graph
        .edges(id)
        .iter()
        .map(|edge| depth_of(graph, edge.target, memo))
        .max()
        .unwrap_or(0)
        + 1;

    memo.insert(id, depth);
    depth
}
