use serde::{Deserialize, Serialize};

/// WordPress REST 返回的富文本字段（`{"rendered": "<p>…</p>"}`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// 上游文章对象（只读，仅取首页渲染用到的字段，其余忽略）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// 上游数字标识
    pub id: i64,
    /// 标题（HTML 片段，渲染前必须清洗）
    pub title: Rendered,
    /// 摘要（HTML 片段，渲染前必须清洗）
    pub excerpt: Rendered,
    /// 上游文章地址（WordPress 提供；缺省时退回内部 /post/{id} 形式）
    #[serde(default)]
    pub link: Option<String>,
}

/// 渲染到模板的文章卡片（所有 HTML 字段均已过清洗）
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: i64,
    /// 纯文本标题（HTML 标签已剥离）
    pub title: String,
    pub link: String,
    /// 清洗后的摘要 HTML（模板中以 safe 方式内联）
    pub excerpt_html: String,
}
