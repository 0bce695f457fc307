pub mod validation;

pub fn top_k_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut indexed_scores: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| (i, score))
        .collect();

    indexed_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    indexed_scores
        .into_iter()
        .take(k)
        .map(|(i, _)| i)
        .collect()
}

// Errors rejected by `should_retry` are returned at once.
pub async fn retry_with_backoff<F, Fut, T, E, P>(
    mut operation: F,
    should_retry: P,
    max_retries: usize,
    initial_delay: std::time::Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
    P: Fn(&E) -> bool,
{
    let mut delay = initial_delay;
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_retries && should_retry(&e) => {
                attempt += 1;
                tracing::warn!("Operation failed (attempt {}), retrying in {:?}: {:?}",
                              attempt, delay, e);
                tokio::time::sleep(delay).await;
                delay *= 2; // exponential backoff
            }
            Err(e) => return Err(e),
        }
    }
}
