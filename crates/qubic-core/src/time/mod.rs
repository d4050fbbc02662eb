//! 時間管理
//!
//! 探索は協調的に打ち切る。`TimeControl` は絶対時刻の締切（と任意の停止フラグ）を
//! 再帰呼び出しに渡し、探索側が次の地点で確認する。
//!
//! - 反復深化の各深さの開始時（必ず時計を読む）
//! - 内部ノード（`depth > 0`）で `poll_mask + 1` ノードごとに1回
//!
//! 最悪の超過は内部ノード `(poll_mask + 1)` 個分。各ノードの子は最大64、
//! 葉のコストは76ライン分の評価1回。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

// ポーリング間隔（Nノードごとに確認）。2^k - 1 の形であること
const N64_MASK: u64 = 0x3F;
const N128_MASK: u64 = 0x7F;
const N256_MASK: u64 = 0xFF;
const N1024_MASK: u64 = 0x3FF;

/// 停止要求フラグ（ホストが立て、探索が確認する）
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 実行中の探索に、次の確認地点で終了するよう要求する
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// 1回の探索の締切と停止フラグ
#[derive(Debug, Clone)]
pub struct TimeControl {
    start: Instant,
    deadline: Option<Instant>,
    stop: Option<StopHandle>,
    poll_mask: u64,
}

impl TimeControl {
    /// 現在時刻から計測を開始する（`None` なら無制限）
    pub fn new(limit: Option<Duration>) -> Self {
        let start = Instant::now();
        Self {
            start,
            deadline: limit.map(|d| start + d),
            stop: None,
            poll_mask: poll_mask_for(limit),
        }
    }

    /// 締切なし
    pub fn infinite() -> Self {
        Self::new(None)
    }

    /// ミリ秒指定
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Some(Duration::from_millis(ms)))
    }

    /// ホストの停止要求も見る
    #[must_use]
    pub fn with_stop(mut self, stop: Option<StopHandle>) -> Self {
        // 停止要求にはすばやく反応したい
        if stop.is_some() {
            self.poll_mask = self.poll_mask.min(N256_MASK);
        }
        self.stop = stop;
        self
    }

    /// 締切時刻
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 内部ノードのポーリングマスク
    #[inline]
    pub fn poll_mask(&self) -> u64 {
        self.poll_mask
    }

    /// 締切を過ぎたか、停止要求が来ているか
    pub fn is_time_up(&self) -> bool {
        if self.stop.as_ref().is_some_and(StopHandle::is_stop_requested) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// 持ち時間に応じたポーリング間隔（短いほど頻繁に確認）
fn poll_mask_for(limit: Option<Duration>) -> u64 {
    match limit.map(|d| d.as_millis()) {
        None => N1024_MASK,
        Some(0..=50) => N64_MASK,
        Some(51..=200) => N128_MASK,
        Some(201..=1000) => N256_MASK,
        Some(_) => N1024_MASK,
    }
}
