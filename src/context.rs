//! アプリケーション共通の文脈
//!
//! 設定と識別子メールボックスをまとめ、ローダー・リスナー・表示ループへ渡す。

use crate::config::Config;
use crate::display::DisplayLoop;
use crate::error::Result;
use crate::selector::{SelectorListener, SelectorMailbox};
use std::thread::JoinHandle;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub mailbox: SelectorMailbox,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mailbox: SelectorMailbox::new(),
        }
    }

    /// 設定ファイルから作成
    pub fn load() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// 設定のアドレスでリスナースレッドを起動
    pub fn start_listener(&self) -> Result<JoinHandle<()>> {
        SelectorListener::bind(&self.config.listen_addr, self.mailbox.clone())?.spawn()
    }

    pub fn display_loop(&self) -> DisplayLoop {
        DisplayLoop::new(&self.config)
    }

    /// 現在選択されているシステム識別子
    pub fn selected_system(&self) -> Option<String> {
        self.mailbox.latest()
    }
}
