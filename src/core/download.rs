use crate::core::config::Mirror;
use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

const REGIONAL_BASE: &str = "https://mirrors.tuna.tsinghua.edu.cn/docker-ce/linux/static/stable";
const DEFAULT_BASE: &str = "https://download.docker.com/linux/static/stable";
const RETRIES: &str = "5";

pub fn resolve_url(mirror: Mirror, arch: &str, version: &str) -> String {
    let base = match mirror {
        Mirror::Regional => REGIONAL_BASE,
        Mirror::Default => DEFAULT_BASE,
    };
    format!("{base}/{arch}/docker-{version}.tgz")
}

/// Fetches a URL to a local file.
pub trait Downloader {
    fn download_file(&self, url: &str, destination: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Wget,
    Curl,
}

/// Shells out to `wget`, or `curl` when wget is not installed. The tool is
/// looked up on each download so a cached archive never needs either.
#[derive(Debug, Default)]
pub struct CommandDownloader;

impl CommandDownloader {
    pub fn new() -> Self {
        Self
    }
}

impl Downloader for CommandDownloader {
    fn download_file(&self, url: &str, destination: &Path) -> Result<()> {
        let (tool, program) = locate_tool()?;
        log::info!("Downloading {url} with {}", program.display());

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let status = build_command(tool, &program, url, destination)
            .status()
            .map_err(|e| InstallerError::Download {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            remove_empty_partial(destination);
            return Err(InstallerError::Download {
                url: url.to_string(),
                message: format!(
                    "{} exited with status {:?}",
                    program.display(),
                    status.code()
                ),
            });
        }

        log::info!("Downloaded to {}", destination.display());
        Ok(())
    }
}

fn locate_tool() -> Result<(Tool, PathBuf)> {
    if let Ok(program) = which::which("wget") {
        return Ok((Tool::Wget, program));
    }
    if let Ok(program) = which::which("curl") {
        return Ok((Tool::Curl, program));
    }
    Err(InstallerError::ToolNotFound {
        name: "wget or curl".to_string(),
    })
}

fn build_command(tool: Tool, program: &Path, url: &str, destination: &Path) -> Command {
    let mut cmd = Command::new(program);
    match tool {
        Tool::Wget => {
            cmd.arg("-c")
                .arg("-t")
                .arg(RETRIES)
                .arg("-O")
                .arg(destination)
                .arg(url);
        }
        Tool::Curl => {
            cmd.arg("-fL")
                .arg("-C")
                .arg("-")
                .arg("--retry")
                .arg(RETRIES)
                .arg("-o")
                .arg(destination)
                .arg(url);
        }
    }
    cmd
}

// A zero-length leftover would otherwise count as a cached archive.
fn remove_empty_partial(path: &Path) {
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.len() == 0 {
            let _ = std::fs::remove_file(path);
        }
    }
}
