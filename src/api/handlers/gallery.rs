use crate::AppState;
use crate::api::error::AppError;
use crate::utils::validation::{is_allowed_image, object_key, sanitize_filename};
use crate::views;
use axum::{
    extract::{Form, Multipart, Path, State},
    response::{Html, Redirect},
};
use axum_client_ip::InsecureClientIp;
use bytes::Bytes;
use serde::Deserialize;

/// Transient per-request representation of the uploaded payload. Never
/// outlives the handler; the bytes only travel to the store call.
struct UploadedFile {
    original_name: String,
    content_type: Option<String>,
    data: Bytes,
}

pub async fn list_images(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let keys = state
        .store
        .list()
        .await
        .map_err(|source| AppError::Storage {
            public: "Error loading images.",
            source,
        })?;

    let entries: Vec<views::ImageEntry> = keys
        .iter()
        .map(|key| views::ImageEntry::from_key(key, &state.config))
        .collect();

    Ok(views::listing_page(&state.config.bucket, &entries))
}

pub async fn upload_image(
    State(state): State<AppState>,
    InsecureClientIp(client_ip): InsecureClientIp,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }

        // A form submitted with no file chosen still sends the part, just
        // with an empty filename.
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(map_multipart_error)?;

        file = Some(UploadedFile {
            original_name,
            content_type,
            data,
        });
        break; // at most one file per request
    }

    let Some(file) = file else {
        return Err(AppError::BadRequest("No file uploaded.".to_string()));
    };

    let content_type = file.content_type.as_deref().unwrap_or("");
    if !is_allowed_image(content_type) {
        return Err(AppError::UnsupportedMedia);
    }

    let filename =
        sanitize_filename(&file.original_name).map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Reserve before the store call; two concurrent requests from the same
    // client cannot both take the last slot.
    let client = client_ip.to_string();
    if !state.quota.try_reserve(&client) {
        return Err(AppError::QuotaExceeded(state.quota.ceiling()));
    }

    let key = object_key(&filename);
    match state
        .store
        .put(&key, file.data, content_type, &file.original_name)
        .await
    {
        Ok(()) => {
            tracing::info!("📤 {} uploaded '{}' as '{}'", client, file.original_name, key);
            Ok(Redirect::to("/"))
        }
        Err(source) => {
            state.quota.release(&client);
            Err(AppError::Storage {
                public: "Upload failed.",
                source,
            })
        }
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    key: Option<String>,
}

pub async fn delete_image(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let key = form
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("No key provided".to_string()))?;
    remove_object(&state, &key).await
}

pub async fn delete_image_by_path(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Redirect, AppError> {
    remove_object(&state, &key).await
}

async fn remove_object(state: &AppState, key: &str) -> Result<Redirect, AppError> {
    state
        .store
        .delete(key)
        .await
        .map_err(|source| AppError::Storage {
            public: "Deletion failed.",
            source,
        })?;

    tracing::info!("🗑️  Deleted '{}'", key);
    Ok(Redirect::to("/"))
}

fn map_multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    let msg = err.to_string();
    if msg.contains("length limit exceeded") {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(msg)
    }
}
