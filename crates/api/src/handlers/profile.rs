//! Handlers for the `/profiles` resource.
//!
//! Profile creation is a multipart upload: text fields for the profile plus
//! an `avatar` image (required, exact size) and an optional `banner`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use reqcheck_core::validation::{FileRule, ImageResolution};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{FileRules, Validated};
use crate::query::{resolve_pagination, PaginationQuery};
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;
use crate::store::{NewProfile, Profile, StoredFile, PROFILE_ORDER_FIELDS};

/// Form key of the required avatar image.
pub const AVATAR_FIELD: &str = "avatar";

/// Form key of the optional banner image.
pub const BANNER_FIELD: &str = "banner";

/// Avatars must be exactly this many pixels on each side.
pub const AVATAR_SIZE_PX: u32 = 100;

const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Multipart text fields for `POST /profiles`.
///
/// Absent keys decode to their defaults so they surface as violations in the
/// same batch as the file rules.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProfile {
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(length(max = 280))]
    pub bio: Option<String>,
}

impl FileRules for CreateProfile {
    fn file_rules() -> Vec<FileRule> {
        vec![
            FileRule::new(AVATAR_FIELD)
                .required()
                .extensions(IMAGE_EXTENSIONS)
                .max_size_mb(2.0)
                .resolution(ImageResolution {
                    width: AVATAR_SIZE_PX,
                    height: AVATAR_SIZE_PX,
                }),
            FileRule::new(BANNER_FIELD)
                .extensions(IMAGE_EXTENSIONS)
                .max_size_mb(5.0),
        ]
    }
}

/// POST /api/v1/profiles
///
/// Returns 422 with the full violation list when any field or file rule fails.
pub async fn create(
    State(state): State<AppState>,
    Validated { value, mut form }: Validated<CreateProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    let email = value
        .email
        .ok_or_else(|| AppError::InternalError("Accepted profile has no email".into()))?;
    let avatar = form
        .take_file(AVATAR_FIELD)
        .as_ref()
        .map(StoredFile::from)
        .ok_or_else(|| AppError::InternalError("Accepted profile has no avatar".into()))?;
    let banner = form.take_file(BANNER_FIELD).as_ref().map(StoredFile::from);

    let profile = state
        .profiles
        .insert(NewProfile {
            display_name: value.display_name,
            email,
            bio: value.bio,
            avatar,
            banner,
        })
        .await;

    tracing::info!(profile_id = profile.id, "Profile created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/profiles
///
/// Sortable by `id`, `display_name`, `email`; `search` filters on display name.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PaginatedResponse<Profile>>> {
    let pagination = resolve_pagination(&query, PROFILE_ORDER_FIELDS)?;
    let (data, total) = state.profiles.list(&pagination).await;

    Ok(Json(PaginatedResponse {
        data,
        meta: PageMeta::new(&pagination, total),
    }))
}
