//! Lambda 调用适配
//!
//! REST API（v1）事件转换成 HTTP 请求时，`lambda_http` 会把部署阶段拼到路径前面
//! （`/prod/create/user`）；HTTP API 的命名阶段本身就带在 `rawPath` 里。
//! 路由表只认不带阶段的路径，所以在进入路由前去掉这个前缀。

use lambda_http::{
    http::{uri::PathAndQuery, Uri},
    request::RequestContext,
    Request, RequestExt,
};
use tracing::debug;

/// 去掉路径中的部署阶段前缀，`$default` 阶段不处理
pub fn strip_stage(mut req: Request) -> Request {
    let Some(stage) = deployed_stage(&req) else {
        return req;
    };

    let prefix = format!("/{stage}");
    let rest = match req.uri().path().strip_prefix(prefix.as_str()) {
        Some(rest) if rest.is_empty() => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => return req,
    };
    let path_and_query = match req.uri().query() {
        Some(query) => format!("{rest}?{query}"),
        None => rest.to_string(),
    };

    let mut parts = req.uri().clone().into_parts();
    let Ok(path_and_query) = PathAndQuery::try_from(path_and_query) else {
        return req;
    };
    parts.path_and_query = Some(path_and_query);
    if let Ok(uri) = Uri::from_parts(parts) {
        debug!(stage = %stage, path = %uri.path(), "已去掉阶段前缀");
        *req.uri_mut() = uri;
    }
    req
}

fn deployed_stage(req: &Request) -> Option<String> {
    let stage = match req.request_context_ref()? {
        RequestContext::ApiGatewayV1(ctx) => ctx.stage.as_ref(),
        RequestContext::ApiGatewayV2(ctx) => ctx.stage.as_ref(),
        _ => None,
    }?;
    (!stage.is_empty() && stage != "$default").then(|| stage.clone())
}
