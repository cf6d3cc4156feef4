//! 表示ループの状態遷移
//!
//! 描画そのものはデスクトップ側が行い、ここでは
//! 「どの結果ファイルを表示しているか」と「どの不合格詳細を出すか」だけを管理する。
//! 新しい結果ファイルを検出したら状態を丸ごと作り直す（差分更新はしない）。

use crate::config::Config;
use crate::error::Result;
use crate::loader::{load_inspection, TemplatePaths};
use crate::scanner;
use inspection_common::{FailedInspection, InspectionBinding};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// 表示ループの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 識別子または結果ファイル待ち
    Initializing,
    RenderingFrame,
    PollingForUpdate,
    /// 新しい結果ファイルを読み込み中
    Restarting,
}

/// 1フレームの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// まだ表示できる結果がない
    Waiting,
    /// 表示中のファイルから変化なし
    Unchanged,
    /// 新しいファイルで作り直した
    Restarted(PathBuf),
}

/// 不合格詳細の巡回
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRotation {
    every_frames: u64,
    next: usize,
}

/// 経過時間でフレームを刻む
///
/// 再描画は入力イベントでも起きるため、描画回数ではなく時刻で `tick` の要否を決める。
/// 大きく遅れた場合は追いつこうとせず、その時点から刻み直す。
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Option<Instant>,
}

/// 読み込み済みの結果
#[derive(Debug, Clone)]
pub struct LoadedResults {
    pub path: PathBuf,
    pub binding: InspectionBinding,
}

/// 表示ループ（読み込み済み結果 + フレームカウンタ）
#[derive(Debug)]
pub struct DisplayLoop {
    result_dir: PathBuf,
    paths: TemplatePaths,
    rotate_every_frames: u64,
    phase: Phase,
    loaded: Option<LoadedResults>,
    frame: u64,
    rotation: DetailRotation,
    detail_index: Option<usize>,
    /// 詳細が切り替わった回数
    detail_generation: u64,
}

impl DetailRotation {
    pub fn new(every_frames: u64) -> Self {
        Self { every_frames: every_frames.max(1), next: 0 }
    }

    /// 切り替えフレームなら次に表示するインデックスを返す
    pub fn on_frame(&mut self, frame: u64, len: usize) -> Option<usize> {
        if len == 0 || frame % self.every_frames != 0 {
            return None;
        }
        let index = self.next % len;
        self.next = (index + 1) % len;
        Some(index)
    }
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    /// `now` の時点でフレームを進めるべきか
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            Some(next) => {
                let following = next + self.interval;
                self.next = Some(if following <= now { now + self.interval } else { following });
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// 次のフレームまでの残り時間
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.map_or(Duration::ZERO, |next| next.saturating_duration_since(now))
    }
}

impl DisplayLoop {
    pub fn new(config: &Config) -> Self {
        Self::with_paths(
            config.result_dir.clone(),
            TemplatePaths::from_config(config),
            config.rotate_every_frames,
        )
    }

    pub fn with_paths(result_dir: PathBuf, paths: TemplatePaths, rotate_every_frames: u64) -> Self {
        Self {
            result_dir,
            paths,
            rotate_every_frames,
            phase: Phase::Initializing,
            loaded: None,
            frame: 0,
            rotation: DetailRotation::new(rotate_every_frames),
            detail_index: None,
            detail_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn loaded(&self) -> Option<&LoadedResults> {
        self.loaded.as_ref()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// 現在パネルに出している不合格詳細
    pub fn current_detail(&self) -> Option<&FailedInspection> {
        let index = self.detail_index?;
        self.loaded.as_ref()?.binding.failed_inspections.get(index)
    }

    /// 詳細パネルの切り替えごとに増える（同じ詳細への巡回も含む）
    pub fn detail_generation(&self) -> u64 {
        self.detail_generation
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// 1フレーム進める
    ///
    /// 最新の結果ファイルを確認し、表示中と違えば作り直す。
    /// 読み込みに失敗した場合はエラーを返し、表示中の状態はそのまま残る。
    pub fn tick(&mut self, system: Option<&str>) -> Result<FrameOutcome> {
        let Some(system) = system else {
            return Ok(FrameOutcome::Waiting);
        };

        let resume = self.phase;
        self.phase = Phase::PollingForUpdate;
        let latest = match scanner::latest_result_file(&self.result_dir, system) {
            Ok(latest) => latest,
            Err(e) => {
                self.phase = resume;
                return Err(e);
            }
        };

        let outcome = match latest {
            None if self.loaded.is_none() => FrameOutcome::Waiting,
            None => FrameOutcome::Unchanged,
            Some(info) if self.current_file() == Some(info.path.as_path()) => FrameOutcome::Unchanged,
            Some(info) => {
                self.phase = Phase::Restarting;
                if let Err(e) = self.restart(info.path.clone()) {
                    self.phase = resume;
                    return Err(e);
                }
                FrameOutcome::Restarted(info.path)
            }
        };

        self.phase = if self.loaded.is_some() { Phase::RenderingFrame } else { Phase::Initializing };
        self.advance_frame();
        Ok(outcome)
    }

    /// 結果ファイルを読み込み直し、フレーム・巡回状態も初期化する
    fn restart(&mut self, path: PathBuf) -> Result<()> {
        let binding = load_inspection(&path, &self.paths)?;
        info!(file = %path.display(), "display restarted with new result file");

        let fresh = Self::with_paths(self.result_dir.clone(), self.paths.clone(), self.rotate_every_frames);
        *self = Self {
            loaded: Some(LoadedResults { path, binding }),
            ..fresh
        };
        Ok(())
    }

    fn advance_frame(&mut self) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        let len = loaded.binding.failed_inspections.len();
        if let Some(index) = self.rotation.on_frame(self.frame, len) {
            self.detail_index = Some(index);
            self.detail_generation += 1;
        }
        self.frame += 1;
    }
}
