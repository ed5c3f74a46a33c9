use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// すべてのレスポンスに付ける CORS ヘッダ（オリジン制限なし）
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS, GET"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Accept"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

/// ルータ全体に CORS ヘッダを付ける
///
/// axum 自身が返すエラー（413 や 405）にも付くようにレイヤーで設定する
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    CORS_HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ))
    })
}
