use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use chrono::{DateTime, Utc};
use common::types::MessageBody;
use serde::Serialize;
use service::errors::ServiceError;
use service::storage::{format_upload_time, FileDownload, StoredFile};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::observability::{FILES_DELETED_TOTAL, FILES_DOWNLOADED_TOTAL, FILES_UPLOADED_TOTAL, UPLOADED_BYTES_TOTAL};
use crate::state::ServerState;

/// Multipart field carrying the payload.
pub const FILE_FIELD: &str = "file";
pub const UPLOAD_OK: &str = "文件上传成功";
pub const DELETE_OK: &str = "文件删除成功";

/// Public JSON view of a stored file.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    /// Storage key; the identifier for download and delete.
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub size_formatted: String,
    pub created_at: DateTime<Utc>,
    pub upload_time: String,
    pub download_url: String,
}

impl From<&StoredFile> for FileView {
    fn from(f: &StoredFile) -> Self {
        Self {
            filename: f.storage_key.clone(),
            original_name: f.original_name.clone(),
            size: f.size_bytes,
            size_formatted: f.size_formatted(),
            created_at: f.created_at,
            upload_time: format_upload_time(&f.created_at),
            download_url: format!("/api/download/{}", urlencoding::encode(&f.storage_key)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file: FileView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileView>,
    pub total: usize,
}

/// Form accepted by `POST /api/upload`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987
/// `filename*` for anything else.
pub fn content_disposition(filename: &str) -> String {
    let plain = filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\');
    if plain {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() && !c.is_control() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

#[utoipa::path(
    post, path = "/api/upload", tag = "files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "没有上传文件"),
        (status = 413, description = "Payload too large")
    )
)]
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    let mut payload = None;
    while let Some(field) = multipart.next_field().await? {
        // 只接受带文件名的 `file` 字段，普通文本字段不算上传文件
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;
        payload = Some((name, bytes));
        break;
    }
    let (name, bytes) = payload.ok_or(ServiceError::NoPayloadProvided)?;

    let stored = state.file_store.upload(&name, &bytes).await?;
    FILES_UPLOADED_TOTAL.inc();
    UPLOADED_BYTES_TOTAL.inc_by(stored.size_bytes);

    Ok(Json(UploadResponse {
        message: UPLOAD_OK.into(),
        file: FileView::from(&stored),
    }))
}

#[utoipa::path(
    get, path = "/api/files", tag = "files",
    responses((status = 200, description = "Newest first", body = FileListResponse))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<FileListResponse>, ApiError> {
    let files: Vec<FileView> = state.file_store.list().await?.iter().map(FileView::from).collect();
    info!(count = files.len(), "list files");
    Ok(Json(FileListResponse { total: files.len(), files }))
}

#[utoipa::path(
    get, path = "/api/download/{storage_key}", tag = "files",
    params(("storage_key" = String, Path, description = "Storage key returned by upload/list")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "文件不存在")
    )
)]
pub async fn download(
    State(state): State<ServerState>,
    Path(storage_key): Path<String>,
) -> Result<Response, ApiError> {
    let FileDownload { file, reader } = state.file_store.get(&storage_key).await.map_err(|e| {
        if matches!(e, ServiceError::FileNotFound(_)) {
            warn!(%storage_key, "download of unknown file");
        }
        ApiError::from(e)
    })?;
    let content_type = mime_guess::from_path(&file.original_name).first_or_octet_stream();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_DISPOSITION, content_disposition(&file.original_name))
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(ReaderStream::new(reader)))
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))?;

    FILES_DOWNLOADED_TOTAL.inc();
    info!(%storage_key, size = file.size_bytes, "download started");
    Ok(response)
}

#[utoipa::path(
    delete, path = "/api/files/{storage_key}", tag = "files",
    params(("storage_key" = String, Path, description = "Storage key returned by upload/list")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "文件不存在")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(storage_key): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.file_store.delete(&storage_key).await?;
    FILES_DELETED_TOTAL.inc();
    Ok(Json(MessageBody::new(DELETE_OK)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_use_plain_filename() {
        assert_eq!(content_disposition("report.txt"), "attachment; filename=\"report.txt\"");
    }

    #[test]
    fn non_ascii_names_get_rfc5987_param() {
        let v = content_disposition("报告.pdf");
        assert!(v.starts_with("attachment; filename=\"__.pdf\"; filename*=UTF-8''"));
        assert!(v.ends_with("%E6%8A%A5%E5%91%8A.pdf"));
        assert!(v.is_ascii());
    }

    #[test]
    fn quotes_and_newlines_are_neutralized() {
        let v = content_disposition("a\"b\r\n.txt");
        assert!(v.starts_with("attachment; filename=\"a_b__.txt\""));
        assert!(!v.contains('\n'));
    }

    #[test]
    fn view_urls_are_percent_encoded() {
        let f = StoredFile {
            storage_key: "1-my file.txt".into(),
            original_name: "my file.txt".into(),
            size_bytes: 1024,
            created_at: Utc::now(),
        };
        let view = FileView::from(&f);
        assert_eq!(view.download_url, "/api/download/1-my%20file.txt");
        assert_eq!(view.size_formatted, "1 KB");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["originalName"], "my file.txt");
        assert_eq!(json["sizeFormatted"], "1 KB");
        assert!(json.get("uploadTime").is_some());
    }
}
