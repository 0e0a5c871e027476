use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use toml::{map::Map, Value};

/// Root of the cargo workspace this crate was built in.
pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let cargo_path = Path::new(std::str::from_utf8(&output)?.trim());

    cargo_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("no parent for {}", cargo_path.display()))
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    load_toml(config_name)
}

/// Reads secrets such as `DATABASE_URL` from a TOML file at the workspace
/// root, e.g. `Secrets.toml` or `Secrets.dev.toml`.
pub fn load_env(secrets_name: &str) -> anyhow::Result<Map<String, Value>> {
    load_toml(secrets_name)
}

fn load_toml(name: &str) -> anyhow::Result<Map<String, Value>> {
    let path = workspace_dir()?.join(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {name}"))?;

    toml::from_str::<Map<String, Value>>(&text)
        .with_context(|| format!("failed to parse {name}"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_workspace_dir_holds_manifest() {
        let dir = workspace_dir().unwrap();

        assert!(dir.join("Cargo.toml").exists());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_config("NoSuchConfig.toml");

        assert!(result.is_err());
    }
}
