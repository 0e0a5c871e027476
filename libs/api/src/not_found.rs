use crate::ApiError;

pub(super) async fn get_404() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
