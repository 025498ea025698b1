use once_cell::sync::OnceCell;
use reqwest::Client;
use std::time::Duration;

/// 全局复用的 HTTP Client（统一连接池/Keep-Alive），避免每次请求重复创建。
///
/// `Client` 本身是线程安全的，适合全局复用。
static CLIENT_CONTENT: OnceCell<Client> = OnceCell::new();

/// 内容源拉取专用的 HTTP Client，带上游超时（`content.fetch_timeout_secs`）。
///
/// 首调用生效：client 在首次调用时按传入的超时构建并缓存，
/// 之后的调用复用同一实例、忽略参数。配置在进程生命周期内不变，
/// 所以所有调用方看到的超时一致。
pub fn client_content(timeout_secs: u64) -> Result<&'static Client, reqwest::Error> {
    CLIENT_CONTENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
    })
}
