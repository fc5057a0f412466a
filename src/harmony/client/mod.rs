mod config;
mod session;

pub use config::{HarmonyClientConfig, default_data_dir};
pub use session::{RequestContext, Session};

use crate::domain::{CatalogPage, NewEntry, Page, PlaylistEntry, Song};
use crate::error::{HarmonyError, UNIQUE_TRIPLE_MSG};
use crate::harmony::models::dto::{EntriesResp, EntryErrorResp};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HarmonyClient {
    http: reqwest::Client,
    pub cfg: HarmonyClientConfig,
}

impl HarmonyClient {
    pub fn new(cfg: HarmonyClientConfig) -> Result<Self, HarmonyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("harmonyhub-ratui/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.http_connect_timeout_secs))
            .build()?;
        Ok(Self { http, cfg })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.cfg.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(
        &self,
        req: RequestBuilder,
        ctx: &RequestContext,
    ) -> Result<RequestBuilder, HarmonyError> {
        Ok(req
            .header(AUTHORIZATION, ctx.session.authorization()?)
            .header(ACCEPT, HeaderValue::from_static("application/json")))
    }

    // ========== API Methods ==========

    /// GET /playlist-entries/?playlist={id}
    pub async fn playlist_entries(
        &self,
        ctx: &RequestContext,
        playlist_id: i64,
    ) -> Result<Vec<PlaylistEntry>, HarmonyError> {
        let url = format!("{}?playlist={playlist_id}", self.url("playlist-entries/"));
        tracing::debug!(req_id = ctx.req_id, playlist_id, "请求歌单条目");
        let resp = self.authorized(self.http.get(url), ctx)?.send().await?;
        let resp = ensure_success(resp).await?;
        ensure_json(&resp)?;
        let page: EntriesResp = decode(resp).await?;
        tracing::debug!(
            req_id = ctx.req_id,
            playlist_id,
            entries = page.results.len(),
            "歌单条目已加载"
        );
        Ok(page.results)
    }

    /// GET /songs/?page={n}&search={q}
    pub async fn songs_page(
        &self,
        ctx: &RequestContext,
        page: u32,
        search: &str,
    ) -> Result<CatalogPage, HarmonyError> {
        let page = page.max(1);
        let url = format!(
            "{}?page={page}&search={}",
            self.url("songs/"),
            urlencoding::encode(search)
        );
        tracing::debug!(req_id = ctx.req_id, page, search, "请求歌曲目录");
        let resp = self.authorized(self.http.get(url), ctx)?.send().await?;
        let resp = ensure_success(resp).await?;
        let body: Page<Song> = decode(resp).await?;
        Ok(CatalogPage::from_page(page, body))
    }

    /// POST /playlist-entries/
    pub async fn add_entry(
        &self,
        ctx: &RequestContext,
        entry: &NewEntry,
    ) -> Result<PlaylistEntry, HarmonyError> {
        if !entry.is_complete() {
            return Err(HarmonyError::BadInput(
                "ID de canción o ID de lista de reproducción no válido",
            ));
        }
        tracing::debug!(
            req_id = ctx.req_id,
            song = entry.song,
            playlist = entry.playlist,
            order = entry.order,
            "添加歌单条目"
        );
        let resp = self
            .authorized(self.http.post(self.url("playlist-entries/")), ctx)?
            .json(entry)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await?;
            let Ok(payload) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
                return Err(HarmonyError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_owned(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            };
            if EntryErrorResp::from_value(&payload).has_error(UNIQUE_TRIPLE_MSG) {
                return Err(HarmonyError::Conflict);
            }
            return Err(HarmonyError::Rejected {
                status: status.as_u16(),
                payload,
            });
        }

        decode(resp).await
    }

    /// DELETE /playlist-entries/{id}/
    pub async fn delete_entry(
        &self,
        ctx: &RequestContext,
        entry_id: i64,
    ) -> Result<(), HarmonyError> {
        let url = self.url(&format!("playlist-entries/{entry_id}/"));
        tracing::debug!(req_id = ctx.req_id, entry_id, "删除歌单条目");
        let resp = self.authorized(self.http.delete(url), ctx)?.send().await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, HarmonyError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(HarmonyError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_owned(),
        body,
    })
}

fn ensure_json(resp: &Response) -> Result<(), HarmonyError> {
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(()),
        other => Err(HarmonyError::NotJson {
            content_type: other,
        }),
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, HarmonyError> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
