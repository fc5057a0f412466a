//! 播放相关错误

/// 音频错误类型
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// 下载音频失败
    #[error("No se pudo descargar el audio ({title}): {source}")]
    Download {
        title: String,
        #[source]
        source: reqwest::Error,
    },

    /// 下载返回非 2xx
    #[error("No se pudo descargar el audio ({title}): HTTP {status}")]
    DownloadStatus { title: String, status: u16 },

    /// 解码失败
    #[error("No se pudo decodificar el audio ({title}): {source}")]
    Decode {
        title: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// 音频输出初始化失败
    #[error("No se pudo abrir la salida de audio: {0}")]
    OutputStream(String),
}
