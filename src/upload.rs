// src/upload.rs
use crate::errors::ServerError;
use mime::Mime;
use multipart::server::Multipart;
use std::fs;
use std::io::{Cursor, ErrorKind, Read};
use std::path::{Path, PathBuf};

pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
/// Whole multipart body: the file plus framing and any other form fields.
pub const MAX_BODY_BYTES: u64 = MAX_FILE_BYTES + 64 * 1024;

pub const ALLOWED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

pub const TOO_LARGE: &str = "File too large. Maximum size is 5MB.";

/// The `file` part of an upload form.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<Mime>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Type is checked before size.
    pub fn validate(&self) -> Result<(), ServerError> {
        let allowed = self
            .content_type
            .as_ref()
            .map(|m| m.essence_str().to_ascii_lowercase())
            .is_some_and(|essence| ALLOWED_TYPES.contains(&essence.as_str()));
        if !allowed {
            return Err(ServerError::BadRequest(
                "Invalid file type. Only images are allowed.".into(),
            ));
        }

        if self.data.len() as u64 > MAX_FILE_BYTES {
            return Err(ServerError::BadRequest(TOO_LARGE.into()));
        }
        Ok(())
    }

    /// Extension from the client filename when it has a sane one, else the MIME subtype.
    pub fn extension(&self) -> String {
        let from_name = self
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name.unwrap_or_else(|| {
            self.content_type
                .as_ref()
                .map(|m| m.subtype().as_str().to_ascii_lowercase())
                .unwrap_or_else(|| "bin".to_string())
        })
    }
}

/// Boundary of a `multipart/form-data` content type.
pub fn multipart_boundary(content_type: Option<&str>) -> Result<String, ServerError> {
    let invalid = || ServerError::BadRequest("Expected a multipart/form-data upload".into());

    let mime: Mime = content_type
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;

    if mime.type_() != mime::MULTIPART || mime.subtype() != mime::FORM_DATA {
        return Err(invalid());
    }

    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .ok_or_else(invalid)
}

/// Pull the `file` field out of a buffered multipart body. Reads at most one
/// byte past the size limit so oversize files are detectable without
/// buffering them whole.
pub fn read_file_part(body: Vec<u8>, boundary: &str) -> Result<UploadedFile, ServerError> {
    let mut form = Multipart::with_body(Cursor::new(body), boundary);

    loop {
        let entry = form
            .read_entry()
            .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?;

        let Some(mut field) = entry else {
            return Err(ServerError::BadRequest("No file uploaded".into()));
        };
        if &*field.headers.name != "file" {
            continue;
        }

        let mut data = Vec::new();
        field
            .data
            .by_ref()
            .take(MAX_FILE_BYTES + 1)
            .read_to_end(&mut data)
            .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?;

        return Ok(UploadedFile {
            filename: field.headers.filename.clone(),
            content_type: field.headers.content_type.clone(),
            data,
        });
    }
}

/// Local directory holding uploaded photos.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the file under a fresh name and return that name.
    pub fn save(&self, file: &UploadedFile, now_ms: i64) -> Result<String, ServerError> {
        fs::create_dir_all(&self.dir)?;

        let name = format!(
            "report_{now_ms}_{:04x}.{}",
            rand::random::<u16>(),
            file.extension()
        );
        fs::write(self.dir.join(&name), &file.data)?;

        tracing::info!(file = %name, bytes = file.data.len(), "photo stored");
        Ok(name)
    }

    /// Read back a stored file. Names that could escape the directory are not found.
    pub fn open(&self, name: &str) -> Result<(Vec<u8>, Mime), ServerError> {
        let not_found = || ServerError::NotFound("File not found".into());

        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) || name.contains("..") {
            return Err(not_found());
        }

        let data = match fs::read(self.dir.join(name)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        Ok((data, content_type_for(name)))
    }
}

fn content_type_for(name: &str) -> Mime {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
