//! システム識別子の受信
//!
//! TCP で送られてくる識別子を1件だけ保持するメールボックスに書き込む。
//! 表示側は毎フレーム最新値を読むだけで、受信を待たない。

use crate::error::{InspectionError, Result};
use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

const READ_BUFFER_SIZE: usize = 1024;

/// 最新の識別子を1件だけ保持する
#[derive(Debug, Clone, Default)]
pub struct SelectorMailbox {
    slot: Arc<Mutex<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    version: u64,
}

impl SelectorMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// 識別子を上書き
    pub fn publish(&self, system: impl Into<String>) {
        let mut slot = self.lock();
        slot.value = Some(system.into());
        slot.version += 1;
    }

    /// 最新の識別子（未受信なら None）
    pub fn latest(&self) -> Option<String> {
        self.lock().value.clone()
    }

    /// publish された回数
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // 書き込みは代入のみなので poison されても中身は整合している
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 識別子受信用の TCP リスナー
pub struct SelectorListener {
    listener: TcpListener,
    mailbox: SelectorMailbox,
}

impl SelectorListener {
    pub fn bind(addr: &str, mailbox: SelectorMailbox) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| InspectionError::Listener(format!("{addr}: {e}")))?;
        Ok(Self { listener, mailbox })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// 専用スレッドで受信ループを開始
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name("selector-listener".into())
            .spawn(move || self.run())
            .map_err(|e| InspectionError::Listener(format!("スレッド起動失敗: {e}")))
    }

    /// 接続待ち → 受信 → 切断で接続待ちに戻る、を繰り返す
    ///
    /// 一度に扱う接続は1つ。切断されても最後の識別子は保持される。
    pub fn run(self) {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "waiting for system identifier");
        }
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream.peer_addr().ok();
                    info!(peer = ?peer, "client connected");
                    serve_connection(stream, &self.mailbox);
                    info!(peer = ?peer, "client disconnected");
                }
                Err(e) => warn!(error = %e, "accept failed"),
            }
        }
    }
}

fn serve_connection(mut stream: TcpStream, mailbox: &SelectorMailbox) {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => return,
            Ok(n) => {
                if let Some(system) = decode_identifier(&buffer[..n]) {
                    debug!(system = %system, "system identifier received");
                    mailbox.publish(system);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "connection lost");
                return;
            }
        }
    }
}

/// 受信バイト列を識別子に変換（前後の空白を除去、空なら None）
pub fn decode_identifier(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
