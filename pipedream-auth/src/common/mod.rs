mod models;

pub use models::{Credential, TokenResponse};
use url::Url;

/// Append `path` to the path of `base`, one segment per `/`-separated part.
///
/// Empty parts are skipped, so leading, trailing and doubled slashes in either
/// the base or the path never produce empty segments.
pub fn join_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        segments
            .pop_if_empty()
            .extend(path.split('/').filter(|part| !part.is_empty()));
    }
    Ok(url)
}
