use sea_orm::{DbErr, SqlErr};

use crate::RepositoryError;

pub type Response<T> = Result<T, RepositoryError>;

pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, DbErr> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                RepositoryError::Conflict {
                    message: message.to_string(),
                    detail,
                }
            }
            _ => RepositoryError::InSeaOrmDbErr {
                message: message.to_string(),
                source: e,
            },
        })
    }
}
