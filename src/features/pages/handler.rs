use std::sync::OnceLock;

use axum::{Router, extract::State, response::Html, routing::get};
use minijinja::{Environment, context};

use super::models::{Post, PostCard};
use super::sanitizer::{sanitize_excerpt, sanitize_title};
use crate::error::AppError;
use crate::state::AppState;

/// 首页模板渲染入口。
///
/// 设计原则：
/// - 模板编译期内嵌（`templates/home.html.jinja`），运行时无文件依赖；
/// - Rust 负责：拉取、清洗、卡片数据组装；
/// - 模板负责：页面结构与卡片排列。
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const HOME_TEMPLATE: &str = include_str!("../../../templates/home.html.jinja");

fn get_template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template("home.html", HOME_TEMPLATE)
            .expect("内嵌首页模板必须合法");
        env
    })
}

/// 上游文章 → 渲染卡片：HTML 字段全部过清洗，链接缺省时退回内部形式。
fn build_cards(posts: Vec<Post>) -> Vec<PostCard> {
    posts
        .into_iter()
        .map(|post| {
            let link = post
                .link
                .filter(|l| l.starts_with("http://") || l.starts_with("https://"))
                .unwrap_or_else(|| format!("/post/{}", post.id));
            PostCard {
                id: post.id,
                title: sanitize_title(&post.title.rendered),
                link,
                excerpt_html: sanitize_excerpt(&post.excerpt.rendered),
            }
        })
        .collect()
}

/// 渲染首页 HTML（与拉取解耦，便于单测）。
pub fn render_home(page_title: &str, source_url: &str, posts: Vec<Post>) -> Result<String, AppError> {
    let cards = build_cards(posts);
    let tpl = get_template_env()
        .get_template("home.html")
        .map_err(|e| AppError::PageRender(format!("加载首页模板失败: {e}")))?;
    tpl.render(context! {
        page_title => page_title,
        source_url => source_url,
        posts => cards,
    })
    .map_err(|e| AppError::PageRender(format!("渲染首页模板失败: {e}")))
}

#[utoipa::path(
    get,
    path = "/",
    summary = "文章卡片首页",
    description = "拉取上游内容源的文章列表，清洗 HTML 后按卡片渲染。上游不可达返回 502，超时返回 504。",
    responses(
        (status = 200, description = "渲染后的首页", content_type = "text/html", body = String),
        (
            status = 502,
            description = "上游内容源不可达或返回结构不符",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 504,
            description = "上游内容源超时",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Pages"
)]
pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let posts = state.content.list_posts().await?;
    let html = render_home(state.content.page_title(), state.content.source_url(), posts)?;
    Ok(Html(html))
}

/// 页面路由（挂载在根路径，不在 API 前缀下）
pub fn create_pages_router() -> Router<AppState> {
    Router::new().route("/", get(home_page))
}
