use axum::{
    async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::error::AppError;

/// 请求体提取器：把 Json 提取失败收敛进统一错误契约。
///
/// axum 自带的 `Json` 在请求体非法或类型不符时返回纯文本错误，
/// 绕过 application/problem+json；这里把 `JsonRejection` 映射为
/// `AppError::Json`（400 BAD_REQUEST），与其余错误响应保持同一形态。
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
