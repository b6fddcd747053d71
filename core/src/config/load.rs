use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default cascade data directory: ~/.cascade
pub fn get_cascade_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".cascade"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.cascade/config.toml (highest)
    let user_config = get_cascade_data_dir()?.join("config.toml");

    // Priority 2: ./cascade.toml (current directory)
    let local_config = Path::new("cascade.toml");

    let cfg = if user_config.exists() {
        load_from(&user_config)?
    } else if local_config.exists() {
        load_from(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(apply_env_overrides(cfg))
}

pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

/// Environment variable overrides (Priority 0: highest)
pub fn apply_env_overrides(mut cfg: AppConfig) -> AppConfig {
    if let Ok(v) = std::env::var("CASCADE_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
    if let Ok(v) = std::env::var("CASCADE_SHELL") {
        if !v.trim().is_empty() {
            cfg.shell.program = v;
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nfile = true").unwrap();

        let cfg = load_from(file.path()).unwrap();

        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.file);
        assert!(cfg.logging.enabled);
        assert!(cfg.logging.console);
        assert_eq!(cfg.shell.capture_bytes, 65536);
    }

    #[test]
    fn shell_section_overrides_program() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[shell]\nprogram = \"bash\"\nargs = [\"-lc\"]\ncapture_bytes = 10"
        )
        .unwrap();

        let cfg = load_from(file.path()).unwrap();

        assert_eq!(cfg.shell.program, "bash");
        assert_eq!(cfg.shell.args, vec!["-lc"]);
        assert_eq!(cfg.shell.capture_bytes, 10);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = 3").unwrap();

        assert!(load_from(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("nope.toml")).is_err());
    }
}
