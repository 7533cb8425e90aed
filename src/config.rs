use crate::error::{Error, Result};

use anyhow::anyhow;
use clap::Parser;
use derive_getters::Getters;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 50301;
const OPEN_JTALK_DICT_NAME: &str = "open_jtalk_dic_utf_8-1.11";

#[derive(Debug, Parser)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    ignore_errors = true
)]
pub struct Cli {
    /// 待ち受けるアドレス。
    #[clap(long, env = "SCORER_HOST")]
    pub host: Option<IpAddr>,
    /// ポート番号。
    #[clap(short, long, env = "SCORER_PORT")]
    pub port: Option<u16>,
    /// アライナーのURL。
    #[clap(
        long,
        env = "SCORER_ALIGNER_URL",
        default_value = "https://xbensieve-speaking-assessment-models.hf.space/align"
    )]
    pub aligner_url: String,
    /// アライナーの応答を待つ秒数。
    #[clap(long, env = "SCORER_ALIGNER_TIMEOUT", default_value_t = 120)]
    pub aligner_timeout: u64,
    /// espeak-ngの実行ファイル。
    #[clap(long, env = "SCORER_ESPEAK_COMMAND", default_value = "espeak-ng")]
    pub espeak_command: String,
    /// Open JTalkの辞書ディレクトリ。
    #[clap(long, env = "SCORER_OPEN_JTALK_DICT")]
    pub open_jtalk_dict: Option<PathBuf>,
}

/// 起動時に確定する設定。
#[derive(Debug, Clone, Getters)]
pub struct Config {
    addr: SocketAddr,
    aligner_url: String,
    aligner_timeout: Duration,
    espeak_command: String,
    open_jtalk_dict: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let url = reqwest::Url::parse(&cli.aligner_url).map_err(|e| {
            Error::Config(anyhow!("Invalid aligner URL {:?}: {}", cli.aligner_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(anyhow!(
                "Aligner URL must be http or https: {}",
                cli.aligner_url
            )));
        }
        if cli.aligner_timeout == 0 {
            return Err(Error::Config(anyhow!("Aligner timeout must be positive")));
        }
        if cli.espeak_command.trim().is_empty() {
            return Err(Error::Config(anyhow!("espeak command must not be empty")));
        }

        Ok(Self {
            addr: SocketAddr::new(
                cli.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
                cli.port.unwrap_or(DEFAULT_PORT),
            ),
            aligner_url: cli.aligner_url,
            aligner_timeout: Duration::from_secs(cli.aligner_timeout),
            espeak_command: cli.espeak_command,
            open_jtalk_dict: cli.open_jtalk_dict.unwrap_or_else(default_open_jtalk_dict),
        })
    }
}

/// デバッグビルドでは作業ディレクトリ、リリースビルドでは実行ファイルの隣の辞書。
fn default_open_jtalk_dict() -> PathBuf {
    if cfg!(debug_assertions) {
        return PathBuf::from(".").join(OPEN_JTALK_DICT_NAME);
    }
    process_path::get_executable_path()
        .and_then(|path| path.parent().map(|dir| dir.join(OPEN_JTALK_DICT_NAME)))
        .unwrap_or_else(|| PathBuf::from(OPEN_JTALK_DICT_NAME))
}
