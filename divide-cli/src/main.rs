use anyhow::{Context, Result};
use divide_ai::{get_depth, DivideGame, Evaluator};
use divide_cli::{apply_args, play_human, record_summary, scoreboard, RecordStore, Settings};
use protocol::{is_recommended_start, GameResult};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("divide_cli=info".parse()?))
        .init();

    let settings = apply_args(Settings::load(), std::env::args().skip(1))?;
    let config = settings.game;

    let store = match &settings.record_dir {
        Some(dir) => RecordStore::open(dir)?,
        None => RecordStore::new()?,
    };

    if settings.list_records {
        let records = store.list()?;
        if records.is_empty() {
            println!("{:?} 下没有对局记录", store.records_directory());
        }
        for info in &records {
            println!("{}", record_summary(info));
        }
        return Ok(());
    }

    if !is_recommended_start(settings.starting_number) {
        warn!(
            "起始数字 {} 不在推荐范围内（20000-30000 且能被 12 整除）",
            settings.starting_number
        );
    }

    let mut game = DivideGame::new(settings.starting_number, config)
        .context("创建对局失败")?;

    let graph = game.graph();
    let depth = get_depth(graph, &game.state())?;
    println!(
        "状态图: {} 个节点, {} 条边, 深度 {}",
        graph.node_count(),
        graph.edge_count(),
        depth
    );

    if settings.emit_dot {
        println!("{}", graph.to_dot());
    }

    println!("{}", scoreboard(&game.state()));
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    while !game.is_over() {
        let mover = game.state().actual_player();
        let divisor = if settings.human == Some(mover) {
            play_human(&mut game, &mut stdin.lock(), &mut stdout.lock())?
        } else {
            game.play_engine()?
        };
        let state = game.state();
        println!(
            "玩家 {} 除以 {} (对其有利 {:+})",
            mover,
            divisor,
            Evaluator::evaluate_for(&state, mover)
        );
        println!("{}", scoreboard(&state));
    }

    match game.result() {
        Some(GameResult::PlayerOneWin) => println!("玩家 1 获胜"),
        Some(GameResult::PlayerTwoWin) => println!("玩家 2 获胜"),
        Some(GameResult::Draw) => println!("平局"),
        None => {}
    }

    let record_id = store.save(game.record())?;
    info!(
        "对局记录已保存: {:?}",
        store.records_directory().join(&record_id)
    );

    Ok(())
}
