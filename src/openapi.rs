use utoipa::openapi::server::{ServerBuilder, ServerVariableBuilder};
use utoipa::{Modify, OpenApi};

/// 为 Swagger UI 提供正确的“业务接口前缀”Servers 配置。
///
/// - 资源接口默认前缀为 `/api/v1`（对应 `config.api.prefix` / `APP_API_PREFIX`）。
/// - `/` 与 `/health` 不带前缀，因此额外提供 `/` 作为备用 server 以便在 Swagger UI 中切换测试。
struct ApiServers;

impl Modify for ApiServers {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let api = ServerBuilder::new()
            .url("{api_prefix}")
            .description(Some("资源接口（默认 /api/v1）"))
            .parameter(
                "api_prefix",
                ServerVariableBuilder::new()
                    .default_value("/api/v1")
                    .description(Some(
                        "资源接口前缀：对应 config.api.prefix（可通过 APP_API_PREFIX 覆盖）",
                    )),
            )
            .build();

        let root = ServerBuilder::new()
            .url("/")
            .description(Some("根路径（首页与 /health 等不带前缀接口）"))
            .build();

        openapi.servers = Some(vec![api, root]);
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::features::health::handler::health_check,
        crate::features::excursion::handler::list_excursions,
        crate::features::excursion::handler::get_excursion,
        crate::features::excursion::handler::create_excursion,
        crate::features::excursion::handler::replace_excursion,
        crate::features::excursion::handler::patch_excursion,
        crate::features::excursion::handler::delete_excursion,
        crate::features::pages::handler::home_page,
    ),
    components(
        schemas(
            crate::error::AppError,
            crate::error::ProblemDetails,
            crate::features::excursion::models::Excursion,
            crate::features::excursion::models::NewExcursion,
            crate::features::excursion::models::ExcursionPatch,
            crate::features::excursion::models::MessageResponse,
            crate::features::health::handler::HealthResponse,
        )
    ),
    modifiers(&ApiServers),
    tags(
        (
            name = "Excursion",
            description = "远足记录：进程内存集合上的 CRUD，进程重启即丢弃。"
        ),
        (name = "Pages", description = "页面：上游文章列表的服务端渲染。"),
        (name = "Health", description = "健康检查：服务探活。"),
    ),
    info(
        title = "Trek Backend API",
        version = env!("CARGO_PKG_VERSION"),
        description = "远足记录后端服务 API（Axum + utoipa）。注意：除 `/` 与 /health 外，资源接口实际挂载在 `config.api.prefix`（默认 /api/v1）下，OpenAPI 的 paths 不包含该前缀。"
    )
)]
pub struct ApiDoc;
