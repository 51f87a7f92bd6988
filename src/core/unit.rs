//! systemd unit file for the Docker daemon.
//!
//! The unit is kept as a typed record so its content can be checked without
//! touching `/etc/systemd/system`.

use crate::error::Result;
use crate::utils::fs;
use std::path::Path;

const SERVICE_PATH: &str = "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFile {
    pub description: String,
    pub documentation: String,
    pub after: Vec<String>,
    pub wants: Vec<String>,
    pub path_env: String,
    pub exec_start: String,
    pub exec_start_post: String,
    pub exec_reload: String,
    pub restart: String,
    pub restart_sec: u32,
    pub limit_nofile: String,
    pub limit_nproc: String,
    pub limit_core: String,
    pub delegate: bool,
    pub kill_mode: String,
    pub wanted_by: String,
}

impl UnitFile {
    /// Unit for `dockerd` installed under `bin_dir`.
    pub fn docker(bin_dir: &Path) -> Self {
        UnitFile {
            description: "Docker Application Container Engine".to_string(),
            documentation: "https://docs.docker.com".to_string(),
            after: vec![
                "network-online.target".to_string(),
                "firewalld.service".to_string(),
            ],
            wants: vec!["network-online.target".to_string()],
            path_env: SERVICE_PATH.to_string(),
            exec_start: bin_dir.join("dockerd").display().to_string(),
            exec_start_post: "/sbin/iptables -I FORWARD -s 0.0.0.0/0 -j ACCEPT".to_string(),
            exec_reload: "/bin/kill -s HUP $MAINPID".to_string(),
            restart: "on-failure".to_string(),
            restart_sec: 5,
            limit_nofile: "infinity".to_string(),
            limit_nproc: "infinity".to_string(),
            limit_core: "infinity".to_string(),
            delegate: true,
            kill_mode: "process".to_string(),
            wanted_by: "multi-user.target".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut content = String::with_capacity(1024);

        content.push_str("[Unit]\n");
        content.push_str(&format!("Description={}\n", self.description));
        content.push_str(&format!("Documentation={}\n", self.documentation));
        if !self.after.is_empty() {
            content.push_str(&format!("After={}\n", self.after.join(" ")));
        }
        if !self.wants.is_empty() {
            content.push_str(&format!("Wants={}\n", self.wants.join(" ")));
        }
        content.push('\n');

        content.push_str("[Service]\n");
        content.push_str("Type=notify\n");
        content.push_str(&format!("Environment=\"PATH={}\"\n", self.path_env));
        content.push_str(&format!("ExecStart={}\n", self.exec_start));
        content.push_str(&format!("ExecStartPost={}\n", self.exec_start_post));
        content.push_str(&format!("ExecReload={}\n", self.exec_reload));
        content.push_str(&format!("Restart={}\n", self.restart));
        content.push_str(&format!("RestartSec={}\n", self.restart_sec));
        content.push_str(&format!("LimitNOFILE={}\n", self.limit_nofile));
        content.push_str(&format!("LimitNPROC={}\n", self.limit_nproc));
        content.push_str(&format!("LimitCORE={}\n", self.limit_core));
        content.push_str(&format!(
            "Delegate={}\n",
            if self.delegate { "yes" } else { "no" }
        ));
        content.push_str(&format!("KillMode={}\n", self.kill_mode));
        content.push('\n');

        content.push_str("[Install]\n");
        content.push_str(&format!("WantedBy={}\n", self.wanted_by));

        content
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        log::info!("Writing unit file {}", path.display());
        fs::write_file(path, &self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_docker_unit() {
        let unit = UnitFile::docker(Path::new("/usr/bin"));

        let expected = "\
[Unit]
Description=Docker Application Container Engine
Documentation=https://docs.docker.com
After=network-online.target firewalld.service
Wants=network-online.target

[Service]
Type=notify
Environment=\"PATH=/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin\"
ExecStart=/usr/bin/dockerd
ExecStartPost=/sbin/iptables -I FORWARD -s 0.0.0.0/0 -j ACCEPT
ExecReload=/bin/kill -s HUP $MAINPID
Restart=on-failure
RestartSec=5
LimitNOFILE=infinity
LimitNPROC=infinity
LimitCORE=infinity
Delegate=yes
KillMode=process

[Install]
WantedBy=multi-user.target
";
        assert_eq!(unit.render(), expected);
    }

    #[test]
    fn test_exec_start_follows_bin_dir() {
        let unit = UnitFile::docker(Path::new("/opt/docker/bin"));
        assert!(unit
            .render()
            .contains("ExecStart=/opt/docker/bin/dockerd\n"));
    }
}
