use axum::{extract::Request, middleware::Next, response::Response};
use http::{
    HeaderMap, HeaderValue, Method,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
    },
};
use voca_config::CorsConfig;

/// CORS headers stamped onto every response of one function
///
/// Preflight answers come from the handlers themselves, this only decorates
/// whatever they return.
#[derive(Debug, Clone)]
pub(crate) struct CorsPolicy {
    origins: AllowedOrigins,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: Option<HeaderValue>,
}

#[derive(Debug, Clone)]
enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Build the policy for a function that accepts `methods`
    pub(crate) fn new(config: &CorsConfig, methods: &[Method]) -> anyhow::Result<Self> {
        let origins = if config.allows_any_origin() {
            AllowedOrigins::Any
        } else {
            let origins = config
                .origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|e| anyhow::anyhow!("invalid CORS origin `{origin}`: {e}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            AllowedOrigins::List(origins)
        };

        let methods = methods.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
        let allow_methods = HeaderValue::from_str(&methods)?;

        let allow_headers = HeaderValue::from_str(&config.headers.join(", "))
            .map_err(|e| anyhow::anyhow!("invalid CORS headers: {e}"))?;

        let max_age = config
            .max_age_duration()
            .map(|age| HeaderValue::from(age.as_secs()));

        Ok(Self {
            origins,
            allow_methods,
            allow_headers,
            max_age,
        })
    }

    fn apply(&self, request_origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        match &self.origins {
            AllowedOrigins::Any => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
            AllowedOrigins::List(allowed) => {
                if let Some(origin) = request_origin.filter(|origin| allowed.contains(origin)) {
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
                }
                headers.append(VARY, HeaderValue::from_static("origin"));
            }
        }

        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());

        if let Some(ref max_age) = self.max_age {
            headers.insert(ACCESS_CONTROL_MAX_AGE, max_age.clone());
        }
    }
}

/// Add the policy's headers to the inner service's response
pub(crate) async fn cors_middleware(policy: CorsPolicy, request: Request, next: Next) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();

    let mut response = next.run(request).await;
    policy.apply(origin.as_ref(), response.headers_mut());

    response
}
