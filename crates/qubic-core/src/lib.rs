//! 4×4×4 立体四目並べの探索エンジン
//!
//! - 盤面は手番ごとの64bitマスク。マス番号は `y*16 + z*4 + x`
//! - 勝ちラインは76本（行・列・柱・平面対角線・空間対角線）
//! - 探索は negamax + αβ枝刈り、置換表、協調的な時間制御付きの反復深化
//!
//! # 使用例
//!
//! ```
//! use qubic_core::{Position, SearchConfig, SearchLimits, Searcher, Side};
//!
//! let mut searcher = Searcher::new(SearchConfig::default()).unwrap();
//! let limits = SearchLimits::new().max_depth(2).time_limit_ms(500);
//! let outcome = searcher
//!     .think(&Position::EMPTY, Side::P1, &limits, |p| {
//!         println!("depth {} score {}", p.depth, p.score);
//!     })
//!     .unwrap();
//! assert!(outcome.best.is_some());
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod lines;
pub mod movegen;
pub mod position;
pub mod search;
pub mod tables;
pub mod time;
pub mod tt;
pub mod types;

pub use config::{MAX_DEPTH, SearchConfig};
pub use error::{PositionError, SearchError};
pub use lines::{NUM_LINES, WinningLines, winning_lines};
pub use movegen::{MoveList, MoveOrder};
pub use position::Position;
pub use search::{
    BestMove, DepthResult, ScoreResult, SearchLimits, SearchOutcome, SearchProgress, SearchStats,
    Searcher,
};
pub use tables::Tables;
pub use time::{StopHandle, TimeControl};
pub use types::{Bitboard, Bound, Cell, Side, Value};
