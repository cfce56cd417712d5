use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::error::{Result, SineError};

/// Frame counter shown while rendering offline.
pub struct RenderProgress {
    bar: ProgressBar,
}

impl RenderProgress {
    /// - `total_frames`: 总帧数
    /// - `message`: 初始消息
    pub fn new(total_frames: u64, message: &str) -> Result<Self> {
        Self::with_target(total_frames, message, ProgressDrawTarget::stderr())
    }

    /// Same bar without drawing, for tests and piped output.
    pub fn hidden(total_frames: u64) -> Result<Self> {
        Self::with_target(total_frames, "", ProgressDrawTarget::hidden())
    }

    fn with_target(
        total_frames: u64,
        message: &str,
        target: ProgressDrawTarget,
    ) -> Result<Self> {
        let style = ProgressStyle::default_bar()
            .template(templates::RENDER)
            .map_err(|e| SineError::Progress(e.to_string()))?
            .progress_chars("█▉▊▋▌▍▎▏ ");

        let bar = ProgressBar::with_draw_target(Some(total_frames), target);
        bar.set_style(style);
        bar.set_message(message.to_string());
        Ok(Self { bar })
    }

    pub fn advance(&self, frames: usize) {
        self.bar.inc(frames as u64);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// 完成进度条（保留显示）
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

pub mod templates {
    pub const RENDER: &str =
        "\u{f909} RENDER [{bar:30.green}] {percent}% ({pos}/{len} frames) {msg}";
}
