use crate::core::version::CgroupDriver;
use crate::error::Result;
use crate::utils::fs;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use std::path::Path;

const REGISTRY_MIRRORS: &[&str] = &[
    "https://docker.mirrors.ustc.edu.cn",
    "https://hub-mirror.c.163.com",
    "https://mirror.baidubce.com",
];
const INSECURE_REGISTRY: &str = "127.0.0.1";
const MAX_CONCURRENT_DOWNLOADS: u32 = 10;
const DATA_ROOT: &str = "/data/docker";

/// Contents of `/etc/docker/daemon.json`. Field order is the key order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DaemonConfig {
    pub exec_opts: Vec<String>,
    pub registry_mirrors: Vec<String>,
    pub insecure_registries: Vec<String>,
    pub max_concurrent_downloads: u32,
    pub log_driver: String,
    pub log_level: String,
    pub log_opts: LogOpts,
    pub data_root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LogOpts {
    pub max_size: String,
    pub max_file: String,
}

impl DaemonConfig {
    pub fn new(driver: CgroupDriver) -> Self {
        DaemonConfig {
            exec_opts: vec![format!("native.cgroupdriver={driver}")],
            registry_mirrors: REGISTRY_MIRRORS.iter().map(|m| m.to_string()).collect(),
            insecure_registries: vec![INSECURE_REGISTRY.to_string()],
            max_concurrent_downloads: MAX_CONCURRENT_DOWNLOADS,
            log_driver: "json-file".to_string(),
            log_level: "warn".to_string(),
            log_opts: LogOpts {
                max_size: "100m".to_string(),
                max_file: "3".to_string(),
            },
            data_root: DATA_ROOT.to_string(),
        }
    }

    pub fn for_version(version: &str) -> Result<Self> {
        Ok(Self::new(CgroupDriver::for_version(version)?))
    }

    /// One top-level key per line, nested values kept on that line.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::with_capacity(512);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, TopLevelFormatter::default());
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        log::info!("Writing daemon config {}", path.display());
        fs::write_file(path, &self.to_json()?)
    }
}

#[derive(Default)]
struct TopLevelFormatter {
    depth: usize,
}

impl Formatter for TopLevelFormatter {
    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.depth == 0 {
            writer.write_all(b"\n}")
        } else {
            writer.write_all(b"}")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match (self.depth, first) {
            (1, true) => writer.write_all(b"\n  "),
            (1, false) => writer.write_all(b",\n  "),
            (_, true) => Ok(()),
            (_, false) => writer.write_all(b", "),
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}
