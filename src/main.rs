use clap::Parser;
use harmonyhub_ratui::app::App;
use harmonyhub_ratui::audio_worker::AudioBackend;
use harmonyhub_ratui::error::AppError;
use harmonyhub_ratui::harmony::{
    HarmonyClient, HarmonyClientConfig, RequestContext, Session, default_data_dir,
};
use harmonyhub_ratui::ui::{Cli, Command, run_tui};
use harmonyhub_ratui::{core, logging, settings};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), "harmonyhub-ratui 启动");

    let mut app_settings = settings::load_settings(&data_dir);
    if !settings::settings_path(&data_dir).exists()
        && let Err(e) = settings::save_settings(&data_dir, &app_settings)
    {
        tracing::warn!(err = %e, "写入默认设置失败");
    }
    if let Some(url) = cli.base_url.clone() {
        app_settings.base_url = url;
    }

    let session = Session::new(cli.token.clone().unwrap_or_default());
    if !session.has_token() {
        tracing::warn!("未提供 token，请求很可能返回 401");
    }
    let audio_backend = if cli.no_audio {
        AudioBackend::Null
    } else {
        AudioBackend::Real
    };

    let cfg = HarmonyClientConfig::from_settings(&app_settings);
    let client = HarmonyClient::new(cfg)?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let playlist_id = require_playlist(cli.playlist)?;
            tracing::info!(playlist_id, ?audio_backend, "启动模式: TUI");
            let mut app = App::new(playlist_id);
            app.show_songs = app_settings.show_songs_on_start;
            let (tx, rx) =
                core::spawn_app_actor(client, session, playlist_id, app_settings, audio_backend);
            run_tui(app, tx, rx).await?;
            Ok(())
        }
        Command::Entries => {
            let playlist_id = require_playlist(cli.playlist)?;
            tracing::info!(playlist_id, "启动模式: Entries");
            let ctx = RequestContext::new(1, session);
            let entries = client.playlist_entries(&ctx, playlist_id).await?;
            println!("{} canciones en la lista {playlist_id}", entries.len());
            for e in entries {
                println!(
                    "{}\t{}\t{}\t{}",
                    e.id,
                    e.order,
                    e.title.as_deref().unwrap_or("Sin título"),
                    e.song_file.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        Command::Songs { page, search } => {
            tracing::info!(page, search = %search, "启动模式: Songs");
            let ctx = RequestContext::new(1, session);
            let result = client.songs_page(&ctx, page, &search).await?;
            println!(
                "Página {} (anterior: {}, siguiente: {})",
                result.page,
                fmt_cursor(result.previous_page),
                fmt_cursor(result.next_page)
            );
            for s in &result.songs {
                println!("{}\t{}", s.id, s.display_title());
            }
            Ok(())
        }
    }
}

fn require_playlist(playlist: Option<i64>) -> Result<i64, AppError> {
    match playlist {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::Other(
            "需要 --playlist <ID>（或环境变量 HARMONYHUB_PLAYLIST）".to_owned(),
        )),
    }
}

fn fmt_cursor(page: Option<u32>) -> String {
    page.map_or_else(|| "-".to_owned(), |p| p.to_string())
}
