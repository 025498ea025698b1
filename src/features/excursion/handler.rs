use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

use crate::{error::AppError, extract::AppJson, state::AppState};

use super::models::{Excursion, ExcursionPatch, MessageResponse, NewExcursion};

/// 标识无匹配时的文案（沿用上游原型，作为 ProblemDetails 的 detail）
const UUID_NOT_FOUND_DETAIL: &str = "The provided UUID doesn't match any activity";

fn not_found() -> AppError {
    AppError::NotFound(UUID_NOT_FOUND_DETAIL.to_string())
}

#[utoipa::path(
    get,
    path = "/excursions",
    summary = "远足记录列表",
    description = "返回当前集合的全部记录，反映最近一次写入。",
    responses((status = 200, description = "当前全部记录", body = [Excursion])),
    tag = "Excursion"
)]
pub async fn list_excursions(State(state): State<AppState>) -> Json<Vec<Excursion>> {
    Json(state.excursions.list().await)
}

#[utoipa::path(
    get,
    path = "/excursions/{id}",
    summary = "按标识获取单条记录",
    params(("id" = String, Path, description = "记录 UUID")),
    responses(
        (status = 200, description = "匹配的记录", body = Excursion),
        (
            status = 404,
            description = "标识无匹配记录",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Excursion"
)]
pub async fn get_excursion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Excursion>, AppError> {
    state.excursions.get(&id).await.map(Json).ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/excursions",
    summary = "创建远足记录",
    description = "忽略客户端传入的标识，由服务端生成 UUID 后追加到集合。",
    request_body = NewExcursion,
    responses(
        (status = 200, description = "创建成功", body = MessageResponse),
        (
            status = 400,
            description = "请求体非法 JSON 或字段类型不符",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 422,
            description = "字段校验失败",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Excursion"
)]
pub async fn create_excursion(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewExcursion>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate()?;
    let created = state.excursions.create(body).await?;
    tracing::info!(uuid = %created.uuid, name = %created.name, "excursion created");
    Ok(Json(MessageResponse {
        // 文案与上游原型逐字一致（含原有拼写）
        message: "new entry succesfully created".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/excursions/{id}",
    summary = "整体替换远足记录",
    description = "按标识定位并用请求体整体替换。标识无匹配时返回 404，不做补插。",
    params(("id" = String, Path, description = "记录 UUID")),
    request_body = NewExcursion,
    responses(
        (status = 200, description = "替换成功", body = MessageResponse),
        (
            status = 404,
            description = "标识无匹配记录",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 400,
            description = "请求体非法 JSON 或字段类型不符",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 422,
            description = "字段校验失败",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Excursion"
)]
pub async fn replace_excursion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<NewExcursion>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate()?;
    match state.excursions.replace(&id, body).await? {
        Some(_) => Ok(Json(MessageResponse {
            message: format!("The item with id {id} has been updated"),
        })),
        None => Err(not_found()),
    }
}

#[utoipa::path(
    patch,
    path = "/excursions/{id}",
    summary = "局部更新远足记录",
    description = "浅合并：仅覆盖请求体中出现的字段，缺省字段保持原值。标识无匹配时返回 404。",
    params(("id" = String, Path, description = "记录 UUID")),
    request_body = ExcursionPatch,
    responses(
        (status = 200, description = "更新成功", body = MessageResponse),
        (
            status = 404,
            description = "标识无匹配记录",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 400,
            description = "请求体非法 JSON 或字段类型不符",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 422,
            description = "字段校验失败",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Excursion"
)]
pub async fn patch_excursion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ExcursionPatch>,
) -> Result<Json<MessageResponse>, AppError> {
    patch.validate()?;
    match state.excursions.merge(&id, patch).await? {
        Some(_) => Ok(Json(MessageResponse {
            message: format!("The item with id {id} has been updated"),
        })),
        None => Err(not_found()),
    }
}

#[utoipa::path(
    delete,
    path = "/excursions/{id}",
    summary = "删除远足记录",
    description = "删除标识匹配的记录。无论记录是否存在都返回确认消息（与上游原型一致）。",
    params(("id" = String, Path, description = "记录 UUID")),
    responses((status = 200, description = "删除确认", body = MessageResponse)),
    tag = "Excursion"
)]
pub async fn delete_excursion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let removed = state.excursions.remove(&id).await?;
    if !removed {
        tracing::debug!(uuid = %id, "delete on absent id, confirming anyway");
    }
    Ok(Json(MessageResponse {
        message: format!("The item with id {id} has been deleted"),
    }))
}

/// 资源路由：每个 (method, path) 只有唯一处理函数，
/// 取代上游原型里按方法顺序 if 判断、后写响应覆盖先写响应的做法。
pub fn create_excursion_router() -> Router<AppState> {
    Router::new()
        .route("/excursions", get(list_excursions).post(create_excursion))
        .route(
            "/excursions/:id",
            get(get_excursion)
                .put(replace_excursion)
                .patch(patch_excursion)
                .delete(delete_excursion),
        )
}
