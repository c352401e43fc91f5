use std::future::Future;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[error("Retry failed")]
pub struct RetryFailed;

pub fn retry<T, E, F>(mut times: u32, f: F) -> Result<T, RetryFailed>
where
    F: Fn() -> Result<T, E>,
    E: std::error::Error + std::fmt::Display,
{
    let mut result = f();
    while let Err(err) = result {
        if times == 0 {
            warn!("No more retry attempts. Error: {}", err);
            return Err(RetryFailed);
        }
        warn!("Retry triggered. Error: {}", err);
        result = f();
        times -= 1;
    }
    Ok(result.unwrap())
}

/// Retry for store writes, which are futures rather than plain closures.
pub async fn retry_async<T, E, F, Fut>(mut times: u32, f: F) -> Result<T, RetryFailed>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + std::fmt::Display,
{
    let mut result = f().await;
    while let Err(err) = result {
        if times == 0 {
            warn!("No more retry attempts. Error: {}", err);
            return Err(RetryFailed);
        }
        warn!("Retry triggered. Error: {}", err);
        result = f().await;
        times -= 1;
    }
    Ok(result.unwrap())
}
