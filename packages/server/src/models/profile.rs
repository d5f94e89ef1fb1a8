use podium_common::Gender;
use serde::{Deserialize, Serialize};

use super::shared::double_option;
use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Asha Verma")]
    pub name: String,
    pub image: Option<String>,
    pub gender: Gender,
    pub institute_id: Option<i32>,
    pub branch: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    /// New profile image URL; `null` clears it, omitted leaves it unchanged.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

pub fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(Some(ref url)) = req.image {
        let url = url.trim();
        if url.is_empty() || url.len() > 2048 {
            return Err(AppError::Validation(
                "Image URL must be 1-2048 characters".into(),
            ));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::Validation(
                "Image URL must start with http:// or https://".into(),
            ));
        }
    }
    Ok(())
}
