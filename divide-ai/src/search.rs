//! 搜索引擎
//!
//! 在状态图上实现 Minimax 与 Alpha-Beta 剪枝。
//! 两种算法都返回沿最佳路线到达的视界状态（后代），而不是直接的下一步；
//! 下一步由 `get_path` 重建路线后取第一步得到。

use std::fmt;

use protocol::{Player, Result, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::Evaluator;
use crate::graph::{NodeId, StateGraph};
use crate::path::{get_depth, get_path};

/// 搜索算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    Minimax,
    AlphaBeta,
}

impl Algorithm {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Minimax => "Minimax",
            Algorithm::AlphaBeta => "Alpha-Beta",
        }
    }

    /// 所有选项
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Minimax, Algorithm::AlphaBeta]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 搜索视界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchDepth {
    /// 搜到游戏自然结束（视界取 `get_depth`）
    #[default]
    Full,
    /// 固定层数，0 按 1 处理
    Fixed(u32),
}

/// AI 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub algorithm: Algorithm,
    #[serde(default)]
    pub depth: SearchDepth,
}

impl AiConfig {
    pub fn from_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            depth: SearchDepth::Full,
        }
    }
}

/// 单次搜索的上下文，记录访问的节点数
struct Search<'a> {
    graph: &'a StateGraph,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(graph: &'a StateGraph) -> Self {
        Self { graph, nodes: 0 }
    }

    fn score(&self, id: NodeId) -> i32 {
        Evaluator::evaluate(&self.graph.state(id))
    }

    fn minimax(&mut self, id: NodeId, depth: u32, maximizing: bool) -> NodeId {
        self.nodes += 1;

        let graph = self.graph;
        let edges = graph.edges(id);
        if depth == 0 || edges.is_empty() {
            return id;
        }

        // 严格优于才替换，同分时保留边顺序中靠前的
        let mut best: Option<(NodeId, i32)> = None;
        for edge in edges {
            let reached = self.minimax(edge.target, depth - 1, !maximizing);
            let score = self.score(reached);
            let better = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((reached, score));
            }
        }

        best.map_or(id, |(reached, _)| reached)
    }

    fn alpha_beta(
        &mut self,
        id: NodeId,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> NodeId {
        self.nodes += 1;

        let graph = self.graph;
        let edges = graph.edges(id);
        if depth == 0 || edges.is_empty() {
            return id;
        }

        let mut best: Option<(NodeId, i32)> = None;
        for edge in edges {
            let reached = self.alpha_beta(edge.target, depth - 1, alpha, beta, !maximizing);
            let score = self.score(reached);

            if maximizing {
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((reached, score));
                }
                let best_score = best.map_or(score, |(_, s)| s);
                alpha = alpha.max(f64::from(best_score));
            } else {
                if best.map_or(true, |(_, best_score)| score < best_score) {
                    best = Some((reached, score));
                }
                let best_score = best.map_or(score, |(_, s)| s);
                beta = beta.min(f64::from(best_score));
            }

            // 剪掉剩余兄弟节点
            if beta <= alpha {
                break;
            }
        }

        best.map_or(id, |(reached, _)| reached)
    }
}

/// Minimax 搜索，返回沿最佳路线到达的状态
///
/// `depth` 为 0 或 `state` 没有子节点时返回 `state` 本身。
pub fn minimax(graph: &StateGraph, state: &State, depth: u32, maximizing: bool) -> Result<State> {
    let root = graph.require(state)?;
    let mut search = Search::new(graph);
    let reached = search.minimax(root, depth, maximizing);
    Ok(graph.state(reached))
}

/// Alpha-Beta 剪枝搜索，根节点调用时 `alpha`/`beta` 取负无穷/正无穷
///
/// 与 `minimax` 得到相同的最优分值；同分时返回的状态可能不同。
pub fn alpha_beta(
    graph: &StateGraph,
    state: &State,
    depth: u32,
    alpha: f64,
    beta: f64,
    maximizing: bool,
) -> Result<State> {
    let root = graph.require(state)?;
    let mut search = Search::new(graph);
    let reached = search.alpha_beta(root, depth, alpha, beta, maximizing);
    Ok(graph.state(reached))
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从算法创建（全深度搜索）
    pub fn from_algorithm(algorithm: Algorithm) -> Self {
        Self::new(AiConfig::from_algorithm(algorithm))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 按配置的视界搜索
    pub fn search(&mut self, graph: &StateGraph, state: &State) -> Result<State> {
        let depth = match self.config.depth {
            SearchDepth::Full => get_depth(graph, state)?,
            SearchDepth::Fixed(depth) => depth.max(1),
        };
        self.best_move(graph, state, depth)
    }

    /// 以指定视界搜索，根节点由走子方决定取极大或极小
    pub fn best_move(&mut self, graph: &StateGraph, state: &State, depth: u32) -> Result<State> {
        let root = graph.require(state)?;
        let maximizing = state.actual_player() == Player::One;

        let mut search = Search::new(graph);
        let reached = match self.config.algorithm {
            Algorithm::Minimax => search.minimax(root, depth, maximizing),
            Algorithm::AlphaBeta => {
                search.alpha_beta(root, depth, f64::NEG_INFINITY, f64::INFINITY, maximizing)
            }
        };
        self.nodes_searched = search.nodes;

        let reached = graph.state(reached);
        debug!(
            algorithm = %self.config.algorithm,
            depth,
            nodes = self.nodes_searched,
            %reached,
            "搜索完成"
        );
        Ok(reached)
    }

    /// 电脑的下一步：搜索、重建路线、取第一步
    ///
    /// 返回下一状态与所用除数；无路可走时返回 None。
    pub fn next_move(&mut self, graph: &StateGraph, state: &State) -> Result<Option<(State, u32)>> {
        let children = graph.children_of(state)?;
        if children.is_empty() {
            return Ok(None);
        }

        let target = self.search(graph, state)?;
        let path = get_path(graph, state, &target)?;
        let Some(next) = path.first() else {
            return Ok(None);
        };

        Ok(children.into_iter().find(|(child, _)| child == next))
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::generate_graph;
    use protocol::GameError;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn build(number: u32, player: Player) -> (StateGraph, State) {
        let root = State::new(number, 0, 0, 0, player);
        (generate_graph(root, player, StateGraph::new()), root)
    }

    #[test]
    fn test_minimax_maximizing() {
        let (graph, root) = build(24, Player::One);
        let depth = get_depth(&graph, &root).unwrap();

        // 12 分支最终 -2，8 与 6 均为 -1，同分取靠前的 8
        let reached = minimax(&graph, &root, depth, true).unwrap();
        assert_eq!(reached, State::new(8, -1, 0, 0, Player::Two));
    }

    #[test]
    fn test_minimax_minimizing() {
        let (graph, root) = build(24, Player::Two);
        let depth = get_depth(&graph, &root).unwrap();

        let reached = minimax(&graph, &root, depth, false).unwrap();
        assert_eq!(reached, State::new(8, 0, -1, 0, Player::One));
    }

    #[test]
    fn test_returns_leaf_not_child() {
        let (graph, root) = build(36, Player::One);

        // 经 18 或 12 汇合到的 (6, -1, -1) 最优，返回的是孙节点
        let expected = State::new(6, -1, -1, 0, Player::One);
        assert_eq!(minimax(&graph, &root, 3, false).unwrap(), expected);
        assert_eq!(
            alpha_beta(&graph, &root, 3, f64::NEG_INFINITY, f64::INFINITY, false).unwrap(),
            expected
        );
    }

    #[test]
    fn test_depth_zero_returns_state() {
        let (graph, root) = build(24, Player::One);

        assert_eq!(minimax(&graph, &root, 0, true).unwrap(), root);
        assert_eq!(
            alpha_beta(&graph, &root, 0, f64::NEG_INFINITY, f64::INFINITY, true).unwrap(),
            root
        );
    }

    #[test]
    fn test_leaf_returns_itself() {
        let (graph, _) = build(24, Player::One);
        let leaf = State::new(8, -1, 0, 0, Player::Two);

        assert_eq!(minimax(&graph, &leaf, 5, true).unwrap(), leaf);
        assert_eq!(
            alpha_beta(&graph, &leaf, 5, f64::NEG_INFINITY, f64::INFINITY, false).unwrap(),
            leaf
        );
    }

    #[test]
    fn test_horizon_limits_search() {
        let (graph, root) = build(24, Player::One);

        // 只看一层时三个子节点都是 -1，取第一个
        let reached = minimax(&graph, &root, 1, true).unwrap();
        assert_eq!(reached, State::new(12, -1, 0, 0, Player::Two));
    }

    #[test]
    fn test_unknown_state() {
        let (graph, _) = build(24, Player::One);
        let unknown = State::new(96, 0, 0, 0, Player::One);

        assert_eq!(
            minimax(&graph, &unknown, 3, true),
            Err(GameError::NodeNotFound { state: unknown })
        );
        assert_eq!(
            alpha_beta(&graph, &unknown, 3, f64::NEG_INFINITY, f64::INFINITY, true),
            Err(GameError::NodeNotFound { state: unknown })
        );
    }

    #[test]
    fn test_alpha_beta_matches_minimax_score() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xA1FA_BE7A);

        for _ in 0..4 {
            let number = rng.gen_range(1667..=2500) * 12;
            let player = if rng.gen_bool(0.5) { Player::One } else { Player::Two };
            let (graph, root) = build(number, player);
            let full = get_depth(&graph, &root).unwrap();

            for depth in [1, 3, full] {
                for maximizing in [true, false] {
                    let mm = minimax(&graph, &root, depth, maximizing).unwrap();
                    let ab = alpha_beta(
                        &graph,
                        &root,
                        depth,
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        maximizing,
                    )
                    .unwrap();
                    assert_eq!(
                        Evaluator::evaluate(&mm),
                        Evaluator::evaluate(&ab),
                        "起始数字 {} 深度 {} 的最优分值不一致",
                        number,
                        depth
                    );
                }
            }
        }
    }

    #[test]
    fn test_alpha_beta_searches_fewer_nodes() {
        let (graph, root) = build(27648, Player::One);

        let mut minimax_engine = AiEngine::from_algorithm(Algorithm::Minimax);
        let mut alpha_beta_engine = AiEngine::from_algorithm(Algorithm::AlphaBeta);
        minimax_engine.search(&graph, &root).unwrap();
        alpha_beta_engine.search(&graph, &root).unwrap();

        assert!(alpha_beta_engine.nodes_searched() < minimax_engine.nodes_searched());
        assert!(alpha_beta_engine.nodes_searched() > 0);
    }

    #[test]
    fn test_alpha_beta_cuts_sibling() {
        // 根(极大) -> a(极小) -> {a1: 3, a2: 5}
        //          -> b(极小) -> {b1: 1, b2: 9}
        // b1 得 1 已不优于 a 分支的 3，b2 不再访问
        let root = State::new(96, 0, 0, 0, Player::One);
        let a = State::new(48, 0, 0, 0, Player::Two);
        let b = State::new(32, 0, 0, 0, Player::Two);
        let a1 = State::new(24, 3, 0, 0, Player::One);
        let a2 = State::new(16, 5, 0, 0, Player::One);
        let b1 = State::new(12, 1, 0, 0, Player::One);
        let b2 = State::new(8, 9, 0, 0, Player::One);

        let mut graph = StateGraph::new();
        for state in [root, a, b, a1, a2, b1, b2] {
            graph.add_node(state);
        }
        for (from, to, divisor) in [
            (root, a, 2),
            (root, b, 3),
            (a, a1, 2),
            (a, a2, 3),
            (b, b1, 3),
            (b, b2, 4),
        ] {
            graph.add_edge(&from, &to, divisor).unwrap();
        }
        let root_id = graph.node_id(&root).unwrap();

        let mut full = Search::new(&graph);
        let reached = full.minimax(root_id, 2, true);
        assert_eq!(graph.state(reached), a1);
        assert_eq!(full.nodes, 7);

        let mut pruned = Search::new(&graph);
        let reached = pruned.alpha_beta(root_id, 2, f64::NEG_INFINITY, f64::INFINITY, true);
        assert_eq!(graph.state(reached), a1);
        assert_eq!(pruned.nodes, 6);
    }

    #[test]
    fn test_engine_orients_root_by_player() {
        let (graph, root) = build(24, Player::Two);
        let mut engine = AiEngine::from_algorithm(Algorithm::Minimax);

        // 二号玩家走子，根节点取极小
        let reached = engine.search(&graph, &root).unwrap();
        assert_eq!(reached, State::new(8, 0, -1, 0, Player::One));
    }

    #[test]
    fn test_next_move() {
        let (graph, root) = build(24, Player::One);

        for algorithm in Algorithm::all() {
            let mut engine = AiEngine::from_algorithm(*algorithm);
            let next = engine.next_move(&graph, &root).unwrap();
            assert_eq!(next, Some((State::new(8, -1, 0, 0, Player::Two), 3)));
        }
    }

    #[test]
    fn test_next_move_is_child_of_deep_search() {
        let (graph, root) = build(24000, Player::Two);
        let mut engine = AiEngine::from_algorithm(Algorithm::AlphaBeta);

        let (next, divisor) = engine.next_move(&graph, &root).unwrap().unwrap();
        assert_eq!(graph.child_by_divisor(&root, divisor), Ok(next));
    }

    #[test]
    fn test_next_move_at_game_end() {
        let (graph, _) = build(24, Player::One);
        let leaf = State::new(6, -1, 0, 0, Player::Two);
        let mut engine = AiEngine::new(AiConfig::default());

        assert_eq!(engine.next_move(&graph, &leaf).unwrap(), None);
    }

    #[test]
    fn test_fixed_depth_zero_still_moves() {
        let (graph, root) = build(24, Player::One);
        let mut engine = AiEngine::new(AiConfig {
            algorithm: Algorithm::AlphaBeta,
            depth: SearchDepth::Fixed(0),
        });

        assert_eq!(
            engine.next_move(&graph, &root).unwrap(),
            Some((State::new(12, -1, 0, 0, Player::Two), 2))
        );
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::Minimax.to_string(), "Minimax");
        assert_eq!(Algorithm::AlphaBeta.to_string(), "Alpha-Beta");
    }

    #[test]
    fn test_config_serde() {
        let config = AiConfig {
            algorithm: Algorithm::AlphaBeta,
            depth: SearchDepth::Fixed(4),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // 缺省视界为全深度
        let parsed: AiConfig = serde_json::from_str(r#"{"algorithm":"Minimax"}"#).unwrap();
        assert_eq!(parsed.depth, SearchDepth::Full);
    }
}
