use std::path::{Path, PathBuf};

use crate::config::DEFAULT_FILE_NAME;

/// Directory holding the client storage, the GUI configuration and the logs.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalisDirectory(PathBuf);

impl FractalisDirectory {
    pub fn new(p: PathBuf) -> Self {
        FractalisDirectory(p)
    }
    pub fn new_default() -> Result<Self, Box<dyn std::error::Error>> {
        default_datadir().map(FractalisDirectory::new)
    }
}

impl FractalisDirectory {
    pub fn exists(&self) -> bool {
        self.0.as_path().exists()
    }
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        create_directory(self.0.as_path())
    }
    pub fn path(&self) -> &Path {
        self.0.as_path()
    }
    pub fn config_file(&self) -> PathBuf {
        self.0.join(DEFAULT_FILE_NAME)
    }
}

/// `~/.fractalis` on Linux, a "Fractalis" folder in the configuration
/// directory of the other systems.
fn default_datadir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    #[cfg(target_os = "linux")]
    let configs_dir = dirs::home_dir();

    #[cfg(not(target_os = "linux"))]
    let configs_dir = dirs::config_dir();

    if let Some(mut path) = configs_dir {
        #[cfg(target_os = "linux")]
        path.push(".fractalis");

        #[cfg(not(target_os = "linux"))]
        path.push("Fractalis");

        return Ok(path);
    }

    Err("Failed to get default data directory".into())
}

fn create_directory(datadir_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    return {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder.mode(0o700).recursive(true).create(datadir_path)?;
        Ok(())
    };

    #[cfg(not(unix))]
    return {
        std::fs::create_dir_all(datadir_path)?;
        Ok(())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_private_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = FractalisDirectory::new(tmp.path().join("nested").join(".fractalis"));
        assert!(!dir.exists());
        dir.init().unwrap();
        assert!(dir.exists());
        assert_eq!(dir.config_file(), dir.path().join("gui.toml"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }

        // Already existing directories are fine.
        dir.init().unwrap();
    }
}
