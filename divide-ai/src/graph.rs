//! 状态图
//!
//! 去重的有向无环图：值相等的状态只存一个节点，
//! 不同走法汇合到同一状态时共享该节点。

use std::collections::HashMap;

use protocol::{GameError, Result, State};

/// 节点编号（在图内的插入序号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 出边：目标节点与所用除数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub divisor: u32,
}

/// 状态图
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    /// 节点，按插入顺序
    nodes: Vec<State>,
    /// 每个节点的出边，按加入顺序
    edges: Vec<Vec<Edge>>,
    /// 状态到节点编号的索引（去重键）
    index: HashMap<State, NodeId>,
}

impl StateGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入节点；已存在值相等的节点时返回其编号
    pub fn add_node(&mut self, state: State) -> NodeId {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(state);
        self.edges.push(Vec::new());
        self.index.insert(state, id);
        id
    }

    /// 加入一条边，两端必须都在图中
    pub fn add_edge(&mut self, from: &State, to: &State, divisor: u32) -> Result<()> {
        let from = self.require(from)?;
        let target = self.require(to)?;
        self.edges[from.0].push(Edge { target, divisor });
        Ok(())
    }

    /// 按编号加入边（构图内部使用）
    pub(crate) fn push_edge(&mut self, from: NodeId, target: NodeId, divisor: u32) {
        self.edges[from.0].push(Edge { target, divisor });
    }

    /// 清空节点的出边（重新展开前调用）
    pub(crate) fn clear_edges(&mut self, id: NodeId) {
        self.edges[id.0].clear();
    }

    /// 查找值相等的节点
    pub fn node_id(&self, state: &State) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// 查找节点，不存在时返回 NodeNotFound
    pub fn require(&self, state: &State) -> Result<NodeId> {
        self.node_id(state)
            .ok_or(GameError::NodeNotFound { state: *state })
    }

    pub fn contains(&self, state: &State) -> bool {
        self.index.contains_key(state)
    }

    /// 按编号取状态
    pub fn state(&self, id: NodeId) -> State {
        self.nodes[id.0]
    }

    /// 按编号取出边
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.edges[id.0]
    }

    /// 所有状态，按插入顺序
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 子状态及其除数，按边的顺序
    pub fn children_of(&self, state: &State) -> Result<Vec<(State, u32)>> {
        let id = self.require(state)?;
        Ok(self.edges[id.0]
            .iter()
            .map(|edge| (self.nodes[edge.target.0], edge.divisor))
            .collect())
    }

    /// 通过指定除数到达的子状态
    pub fn child_by_divisor(&self, state: &State, divisor: u32) -> Result<State> {
        let id = self.require(state)?;
        self.edges[id.0]
            .iter()
            .find(|edge| edge.divisor == divisor)
            .map(|edge| self.nodes[edge.target.0])
            .ok_or(GameError::IllegalDivisor {
                number: state.actual_number(),
                divisor,
            })
    }

    /// 入边数量
    pub fn in_degree(&self, state: &State) -> Result<usize> {
        let id = self.require(state)?;
        Ok(self
            .edges
            .iter()
            .flatten()
            .filter(|edge| edge.target == id)
            .count())
    }

    /// 导出为 Graphviz DOT 格式
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph G {\n");

        for (i, state) in self.nodes.iter().enumerate() {
            dot.push_str(&format!(
                "  {} [label=\"actual_number: {}\\npoints_player1: {}\\npoints_player2: {}\\nbank: {}\\nactual_player: {}\"];\n",
                i,
                state.actual_number(),
                state.points_player1(),
                state.points_player2(),
                state.bank(),
                state.actual_player()
            ));
        }

        for (from, edges) in self.edges.iter().enumerate() {
            for edge in edges {
                dot.push_str(&format!(
                    "  {} -> {} [label=\"{}\"];\n",
                    from, edge.target.0, edge.divisor
                ));
            }
        }

        dot.push('}');
        dot
    }
}
