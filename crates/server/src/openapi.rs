use utoipa::OpenApi;

use crate::routes::files::{FileListResponse, FileView, UploadForm, UploadResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::files::upload,
        crate::routes::files::list,
        crate::routes::files::download,
        crate::routes::files::delete,
        crate::routes::search::search,
        crate::routes::search::hot,
    ),
    components(
        schemas(
            FileView,
            UploadResponse,
            FileListResponse,
            UploadForm,
        )
    ),
    tags(
        (name = "health"),
        (name = "files"),
        (name = "search")
    )
)]
pub struct ApiDoc;
