//! halve - 权重文件半精度转换
//!
//! 把 safetensors 权重中的浮点张量转换为 F16 并输出 SHA-256；
//! 给定 `--sha256` 时校验输出摘要。

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use voicemix::precision::{halve_weights, verify_checksum};

#[derive(Parser, Debug)]
#[command(name = "halve", version, about = "Convert safetensors weights to half precision")]
struct Args {
    /// 输入权重文件
    input: PathBuf,

    /// 输出路径（默认 `<stem>-half.safetensors`）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 期望的输出 SHA-256
    #[arg(long)]
    sha256: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "weights".to_string());
    input.with_file_name(format!("{}-half.safetensors", stem))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    if !args.input.is_file() {
        bail!("Input weights not found: {}", args.input.display());
    }

    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    if output == args.input {
        bail!("Output path must differ from input: {}", output.display());
    }

    let report = halve_weights(&args.input, &output)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if let Some(expected) = args.sha256.as_deref() {
        verify_checksum(&report, expected)?;
        tracing::info!(sha256 = %report.sha256, "Checksum verified");
    }

    println!("{}  {}", report.sha256, output.display());

    Ok(())
}
