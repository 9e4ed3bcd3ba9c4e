//! 对局接口
//!
//! 供前端调用的入口：建局、推进、求电脑走法，
//! 以及把配置、状态图和当前状态打包在一起的 `DivideGame`。

use protocol::{GameError, GameRecord, GameResult, MoveRecord, Player, Result, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::generate_graph;
use crate::graph::StateGraph;
use crate::search::{AiConfig, AiEngine, Algorithm};

/// 对局配置（先手方与电脑的搜索设置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_player: Player,
    #[serde(default)]
    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_player: Player::One,
            ai: AiConfig::default(),
        }
    }
}

/// 创建开局状态并生成完整状态图
pub fn new_game(starting_number: u32, starting_player: Player) -> Result<(State, StateGraph)> {
    let state = State::initial(starting_number, starting_player)?;
    let graph = generate_graph(state, starting_player, StateGraph::new());
    Ok((state, graph))
}

/// 按除数推进一步
pub fn advance(graph: &StateGraph, state: &State, divisor: u32) -> Result<State> {
    graph.child_by_divisor(state, divisor)
}

/// 以指定视界和算法求最佳到达状态
pub fn best_move(
    graph: &StateGraph,
    state: &State,
    depth: u32,
    algorithm: Algorithm,
) -> Result<State> {
    AiEngine::from_algorithm(algorithm).best_move(graph, state, depth)
}

/// 子状态及其除数；为空表示游戏结束
pub fn children_of(graph: &StateGraph, state: &State) -> Result<Vec<(State, u32)>> {
    graph.children_of(state)
}

/// 一局游戏
pub struct DivideGame {
    config: GameConfig,
    graph: StateGraph,
    state: State,
    engine: AiEngine,
    record: GameRecord,
}

impl DivideGame {
    /// 开始新的一局，每局重新生成状态图
    pub fn new(starting_number: u32, config: GameConfig) -> Result<Self> {
        let (state, graph) = new_game(starting_number, config.starting_player)?;

        let mut record = GameRecord::new(starting_number, config.starting_player);
        record.set_algorithm(config.ai.algorithm.display_name());

        info!(
            starting_number,
            starting_player = %config.starting_player,
            algorithm = %config.ai.algorithm,
            "新对局"
        );

        Ok(Self {
            config,
            graph,
            state,
            engine: AiEngine::new(config.ai),
            record,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// 当前状态
    pub fn state(&self) -> State {
        self.state
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// 当前可用的除数
    pub fn legal_divisors(&self) -> Result<Vec<u32>> {
        Ok(self
            .graph
            .children_of(&self.state)?
            .into_iter()
            .map(|(_, divisor)| divisor)
            .collect())
    }

    /// 无路可走即结束（包括数字大于阈值但无法整除的情况）
    pub fn is_over(&self) -> bool {
        self.graph
            .children_of(&self.state)
            .map_or(true, |children| children.is_empty())
    }

    /// 结束时的胜负
    pub fn result(&self) -> Option<GameResult> {
        self.is_over().then(|| self.state.result())
    }

    /// 当前走子方用指定除数走一步
    pub fn play(&mut self, divisor: u32) -> Result<State> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let next = advance(&self.graph, &self.state, divisor)?;
        self.commit(divisor, next);
        Ok(next)
    }

    /// 电脑为当前走子方走一步，返回所用除数
    pub fn play_engine(&mut self) -> Result<u32> {
        let Some((next, divisor)) = self.engine.next_move(&self.graph, &self.state)? else {
            return Err(GameError::GameOver);
        };
        info!(
            player = %self.state.actual_player(),
            divisor,
            nodes = self.engine.nodes_searched(),
            "电脑走子"
        );
        self.commit(divisor, next);
        Ok(divisor)
    }

    fn commit(&mut self, divisor: u32, next: State) {
        self.record.add_move(MoveRecord::new(
            self.state.actual_player(),
            divisor,
            next.actual_number(),
        ));
        self.state = next;

        if self.is_over() {
            let result = self.state.result();
            self.record.set_result(result);
            info!(?result, "对局结束");
        }
    }
}
