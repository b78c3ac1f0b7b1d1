//! Continuation-link parsing.
//!
//! The listing API answers every browse request with `links.next`, a full (or
//! relative) URL for the following page. Only its `page` query parameter is
//! meaningful to us; that value becomes the next [`Cursor`].

use crate::error::{FetchError, FetchResult};
use crate::types::Cursor;

const PAGE_PARAM: &str = "page";

/// Derive the next cursor from an optional continuation link.
///
/// - no link (or an empty one): `Ok(None)`, the result set is exhausted
/// - link with a non-empty `page` parameter: `Ok(Some(cursor))`
/// - link without a query string or without `page`: `Err(MalformedLink)`
pub fn next_cursor(link: Option<&str>) -> FetchResult<Option<Cursor>> {
    let link = match link.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(l) => l,
    };

    let query = match link.find('?') {
        Some(pos) => &link[pos + 1..],
        None => return Err(FetchError::MalformedLink(link.to_string())),
    };
    let query = query.split('#').next().unwrap_or_default();

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == PAGE_PARAM)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| Some(Cursor::new(v)))
        .ok_or_else(|| FetchError::MalformedLink(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_link_yields_page() {
        let link = "https://api.pala.world/tokens?project_contract_address=0x22D2&order_by=listPriceInKlay.asc&limit=20&page=2";
        assert_eq!(next_cursor(Some(link)).unwrap(), Some(Cursor::new("2")));
    }

    #[test]
    fn relative_link_yields_page() {
        assert_eq!(
            next_cursor(Some("/tokens?page=17&limit=20")).unwrap(),
            Some(Cursor::new("17"))
        );
    }

    #[test]
    fn fragment_is_ignored() {
        assert_eq!(
            next_cursor(Some("/tokens?page=4#top")).unwrap(),
            Some(Cursor::new("4"))
        );
    }

    #[test]
    fn missing_link_ends_result_set() {
        assert_eq!(next_cursor(None).unwrap(), None);
        assert_eq!(next_cursor(Some("")).unwrap(), None);
        assert_eq!(next_cursor(Some("   ")).unwrap(), None);
    }

    #[test]
    fn link_without_page_is_malformed() {
        let err = next_cursor(Some("https://api.pala.world/tokens?limit=20")).unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));

        let err = next_cursor(Some("https://api.pala.world/tokens")).unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));

        let err = next_cursor(Some("/tokens?page=")).unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));
    }
}
