use lazy_static::lazy_static;
use reqwest::{ClientBuilder, StatusCode};
use reqwest_middleware::{ClientBuilder as ClientWithMiddlewareBuilder, ClientWithMiddleware};
use reqwest_retry::{
    RetryTransientMiddleware, Retryable, RetryableStrategy, policies::ExponentialBackoff,
};

const RATE_LIMIT_RETRY_COUNT: u32 = 5;
const USER_AGENT: &str = concat!("luarmor-uploader/", env!("CARGO_PKG_VERSION"));

/// Retry only what the API asks us to retry: rate limited responses and requests
/// that never reached it. Every other status, 504 included, is left to the caller.
///
/// A request that was sent but got no complete answer is not retried, the server may
/// already have applied it.
struct RateLimitStrategy;

fn classify_status(status: StatusCode) -> Option<Retryable> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Some(Retryable::Transient)
    } else {
        None
    }
}

impl RetryableStrategy for RateLimitStrategy {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(response) => classify_status(response.status()),
            Err(reqwest_middleware::Error::Reqwest(error)) if error.is_connect() => {
                Some(Retryable::Transient)
            }
            Err(_) => Some(Retryable::Fatal),
        }
    }
}

lazy_static! {
    pub static ref REQUEST_CLIENT: ClientWithMiddleware = ClientWithMiddlewareBuilder::new(
        ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()
            .unwrap()
    )
    .with(RetryTransientMiddleware::new_with_policy_and_strategy(
        ExponentialBackoff::builder().build_with_max_retries(RATE_LIMIT_RETRY_COUNT),
        RateLimitStrategy,
    ))
    .build();
}
