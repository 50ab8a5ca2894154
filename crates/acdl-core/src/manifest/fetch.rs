//! Blocking HTTP GET for manifest bodies (libcurl).

use anyhow::{Context, Result};
use std::time::Duration;

/// Manifests are a few MiB at most; anything beyond this is not a manifest.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Fetches `url` into memory. Non-2xx HTTP responses are errors.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn http_get(url: &str) -> Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(30))?;
    easy.timeout(Duration::from_secs(300))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > MAX_BODY_BYTES {
                // Returning a short count aborts the transfer.
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let code = easy.response_code().context("no response code")?;
    // file:// and other non-HTTP schemes report 0.
    if code != 0 && !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}
