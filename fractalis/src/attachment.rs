use std::path::{Path, PathBuf};

pub const MAX_ATTACHMENT_SIZE: u64 = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("Failed to read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("File is too large: {0} bytes")]
    TooLarge(u64),
}

impl AttachmentError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Io(..) => "Impossible de lire le fichier",
            Self::UnsupportedFormat(_) => "Format non supporté (JPG, PNG)",
            Self::TooLarge(_) => "Fichier trop volumineux (Max: 5MB)",
        }
    }
}

/// A local document picked by the user. It is checked but never uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    path: PathBuf,
    file_name: String,
    size: u64,
}

impl Attachment {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, AttachmentError> {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AttachmentError::UnsupportedFormat(extension));
        }

        let metadata =
            std::fs::metadata(&path).map_err(|e| AttachmentError::Io(path.clone(), e.to_string()))?;
        if !metadata.is_file() {
            return Err(AttachmentError::Io(path, "not a file".to_string()));
        }
        if metadata.len() > MAX_ATTACHMENT_SIZE {
            return Err(AttachmentError::TooLarge(metadata.len()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            file_name,
            size: metadata.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Permis.PNG");
        std::fs::write(&path, [0u8; 1024]).unwrap();
        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.file_name(), "Permis.PNG");
        assert_eq!(attachment.size(), 1024);
        assert_eq!(attachment.path(), path.as_path());
    }

    #[test]
    fn rejects_other_formats_and_large_files() {
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("carte.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        assert_eq!(
            Attachment::from_path(&pdf),
            Err(AttachmentError::UnsupportedFormat("pdf".to_string()))
        );

        let big = dir.path().join("photo.jpg");
        let file = std::fs::File::create(&big).unwrap();
        file.set_len(MAX_ATTACHMENT_SIZE + 1).unwrap();
        assert_eq!(
            Attachment::from_path(&big),
            Err(AttachmentError::TooLarge(MAX_ATTACHMENT_SIZE + 1))
        );

        assert!(matches!(
            Attachment::from_path(dir.path().join("missing.jpeg")),
            Err(AttachmentError::Io(..))
        ));
    }
}
