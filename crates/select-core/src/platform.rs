use std::path::PathBuf;

const APP_DIR: &str = "select";

/// `$XDG_CONFIG_HOME/select` on unix, the roaming config dir elsewhere.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/select/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(not(unix))]
    {
        dirs::data_dir()
            .unwrap_or_else(temp_dir)
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}
