use crate::domain::{CatalogPage, NewEntry, PlaylistEntry};
use crate::error::{HarmonyError, MessageError};
use crate::harmony::{HarmonyClient, RequestContext, Session};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 失败的请求属于哪一类操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonyOp {
    PlaylistEntries { playlist_id: i64 },
    SongsPage { page: u32 },
    AddEntry { song_id: i64 },
    DeleteEntry { entry_id: i64 },
}

#[derive(Debug)]
pub enum HarmonyCommand {
    PlaylistEntries {
        req_id: u64,
        playlist_id: i64,
    },
    SongsPage {
        req_id: u64,
        page: u32,
        search: String,
    },
    AddEntry {
        req_id: u64,
        entry: NewEntry,
    },
    DeleteEntry {
        req_id: u64,
        entry_id: i64,
    },
}

#[derive(Debug)]
pub enum HarmonyEvent {
    PlaylistEntries {
        req_id: u64,
        playlist_id: i64,
        entries: Vec<PlaylistEntry>,
    },
    SongsPage {
        req_id: u64,
        page: CatalogPage,
    },
    EntryAdded {
        req_id: u64,
        entry: PlaylistEntry,
    },
    EntryDeleted {
        req_id: u64,
        entry_id: i64,
    },
    Error {
        req_id: u64,
        op: HarmonyOp,
        error: MessageError,
    },
}

async fn emit_result<T>(
    tx_evt: &mpsc::Sender<HarmonyEvent>,
    req_id: u64,
    op: HarmonyOp,
    result: Result<T, HarmonyError>,
    on_ok: impl FnOnce(T) -> HarmonyEvent,
) {
    let evt = match result {
        Ok(v) => on_ok(v),
        Err(e) => {
            tracing::warn!(req_id, ?op, kind = ?e.kind(), err = %e, "HarmonyActor 请求失败");
            HarmonyEvent::Error {
                req_id,
                op,
                error: e.into(),
            }
        }
    };
    if tx_evt.send(evt).await.is_err() {
        tracing::debug!(req_id, "HarmonyActor 事件通道已关闭");
    }
}

/// 每个请求跑在独立任务里；新的目录请求会中止仍在进行的旧目录请求
pub fn spawn_harmony_actor(
    client: HarmonyClient,
    session: Session,
) -> (mpsc::Sender<HarmonyCommand>, mpsc::Receiver<HarmonyEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<HarmonyCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<HarmonyEvent>(64);

    tokio::spawn(async move {
        let mut catalog_task: Option<JoinHandle<()>> = None;

        while let Some(cmd) = rx_cmd.recv().await {
            let client = client.clone();
            let tx_evt = tx_evt.clone();
            match cmd {
                HarmonyCommand::PlaylistEntries {
                    req_id,
                    playlist_id,
                } => {
                    let ctx = RequestContext::new(req_id, session.clone());
                    tokio::spawn(async move {
                        let result = client.playlist_entries(&ctx, playlist_id).await;
                        emit_result(
                            &tx_evt,
                            req_id,
                            HarmonyOp::PlaylistEntries { playlist_id },
                            result,
                            |entries| HarmonyEvent::PlaylistEntries {
                                req_id,
                                playlist_id,
                                entries,
                            },
                        )
                        .await;
                    });
                }
                HarmonyCommand::SongsPage {
                    req_id,
                    page,
                    search,
                } => {
                    if let Some(prev) = catalog_task.take()
                        && !prev.is_finished()
                    {
                        tracing::debug!(req_id, "中止过期的目录请求");
                        prev.abort();
                    }
                    let ctx = RequestContext::new(req_id, session.clone());
                    catalog_task = Some(tokio::spawn(async move {
                        let result = client.songs_page(&ctx, page, &search).await;
                        emit_result(
                            &tx_evt,
                            req_id,
                            HarmonyOp::SongsPage { page },
                            result,
                            |page| HarmonyEvent::SongsPage { req_id, page },
                        )
                        .await;
                    }));
                }
                HarmonyCommand::AddEntry { req_id, entry } => {
                    let ctx = RequestContext::new(req_id, session.clone());
                    tokio::spawn(async move {
                        let result = client.add_entry(&ctx, &entry).await;
                        emit_result(
                            &tx_evt,
                            req_id,
                            HarmonyOp::AddEntry {
                                song_id: entry.song,
                            },
                            result,
                            |entry| HarmonyEvent::EntryAdded { req_id, entry },
                        )
                        .await;
                    });
                }
                HarmonyCommand::DeleteEntry { req_id, entry_id } => {
                    let ctx = RequestContext::new(req_id, session.clone());
                    tokio::spawn(async move {
                        let result = client.delete_entry(&ctx, entry_id).await;
                        emit_result(
                            &tx_evt,
                            req_id,
                            HarmonyOp::DeleteEntry { entry_id },
                            result,
                            |()| HarmonyEvent::EntryDeleted { req_id, entry_id },
                        )
                        .await;
                    });
                }
            }
        }
        tracing::debug!("HarmonyActor 命令通道已关闭，退出");
    });

    (tx_cmd, rx_evt)
}
