use actix_web::body::{self, BoxBody, MessageBody};
use actix_web::dev::Payload;
use actix_web::web::{self, Bytes};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use actix_web::{HttpMessage, HttpResponse, ResponseError};
use colored::Colorize;
use common::env_config::Config;
use futures::StreamExt;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::{debug, info};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
    <B as MessageBody>::Error: ResponseError,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
    <B as MessageBody>::Error: ResponseError,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        // Common request info
        let method = req.method().to_string();
        let path = req.path().to_string();
        let query_string = req.query_string().to_string();

        // IP
        let ip = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let console_logging_enabled = req
            .app_data::<web::Data<Arc<Config>>>()
            .map(|config| config.console_logging_enabled)
            .unwrap_or(true);
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            // Copy request body from payload and reconstruct it
            let mut payload = req.take_payload();
            let body_bytes = extract_body(&mut payload).await?;
            let request_body = if !body_bytes.is_empty() {
                serde_json::from_slice::<Value>(&body_bytes).unwrap_or(Value::Null)
            } else {
                Value::Null
            };
            let new_stream: Pin<
                Box<dyn futures::Stream<Item = Result<Bytes, actix_web::error::PayloadError>>>,
            > = futures::stream::once(async move {
                Ok::<Bytes, actix_web::error::PayloadError>(body_bytes)
            })
            .boxed();
            req.set_payload(Payload::from(new_stream));

            // Call next services
            let started = Instant::now();
            let res = srv.call(req).await?;
            let elapsed_ms = started.elapsed().as_millis();

            // Get response status
            let status = res.status();
            let status_code = res.status().as_u16() as i32;

            // Get request params
            let params_json = if !query_string.is_empty() {
                let mut params_map = HashMap::new();
                for pair in query_string.split('&') {
                    if let Some(pos) = pair.find('=') {
                        let key = &pair[0..pos];
                        let value = &pair[pos + 1..];
                        params_map.insert(key.to_string(), json!(value));
                    } else {
                        params_map.insert(pair.to_string(), json!(true));
                    }
                }
                json!(params_map)
            } else {
                json!({})
            };

            // Copy response body and reconstruct response
            let (req, res) = res.into_parts();
            let headers = res.headers().clone();
            let res_body = res.into_body();
            let response_body_bytes = body::to_bytes(res_body).await?;
            let response_body =
                serde_json::from_slice::<Value>(&response_body_bytes).unwrap_or(Value::Null);
            let mut new_res = HttpResponse::build(status);
            for (key, value) in headers.iter() {
                new_res.insert_header((key.clone(), value.clone()));
            }
            let new_res = new_res.body(response_body_bytes);
            let res = ServiceResponse::new(req, new_res);

            // Log to console
            if console_logging_enabled {
                let colored_status = match status_code {
                    200..=299 => status_code.to_string().green(),
                    300..=399 => status_code.to_string().yellow(),
                    400..=499 => status_code.to_string().bright_red(),
                    _ => status_code.to_string().red(),
                };

                let colored_method = match method.as_str() {
                    "GET" => method.blue(),
                    "POST" => method.yellow(),
                    "PUT" => method.purple(),
                    "DELETE" => method.red(),
                    _ => method.normal(),
                };

                info!(
                    "[{}] {} {} {} ip={} params={}",
                    colored_status,
                    colored_method,
                    path.bright_white(),
                    format!("({}ms)", elapsed_ms).bright_black(),
                    ip.bright_blue(),
                    params_json.to_string().bright_cyan(),
                );

                if let Some(ref body) = request_body.as_object() {
                    if !body.is_empty() {
                        debug!(
                            "  Request: {}",
                            serde_json::to_string(&request_body)
                                .unwrap_or_default()
                                .bright_green()
                        );
                    }
                }

                if status_code >= 400
                    || (response_body.is_object() && !response_body.as_object().unwrap().is_empty())
                {
                    debug!(
                        "  Response: {}",
                        serde_json::to_string(&response_body)
                            .unwrap_or_default()
                            .bright_yellow()
                    );
                }
            }

            Ok(res)
        })
    }
}

async fn extract_body(payload: &mut Payload) -> Result<Bytes, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
