// Copyright 2026 The raxdns Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Handy primitives for working with URLs.

use reqwest::Url;

use super::{Error, ErrorKind};

/// Whether the URL can serve as a service root.
#[inline]
pub fn is_valid_base(url: &Url) -> bool {
    !url.cannot_be_a_base() && url.has_host()
}

/// Append path segments to the URL, dropping a trailing slash first.
#[inline]
pub fn extend<I>(mut url: Url, segments: I) -> Result<Url, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let _ = url
        .path_segments_mut()
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "URL cannot be a base"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod test {
    use reqwest::Url;

    use super::{extend, is_valid_base};

    #[test]
    fn test_extend_with_trailing_slash() {
        let url = Url::parse("https://dns.api.rackspacecloud.com/v1.0/1234/").unwrap();
        let result = extend(url, &["domains", "42"]).unwrap();
        assert_eq!(
            result.as_str(),
            "https://dns.api.rackspacecloud.com/v1.0/1234/domains/42"
        );
    }

    #[test]
    fn test_extend_escapes_segments() {
        let url = Url::parse("https://dns.api.rackspacecloud.com/v1.0/1234").unwrap();
        let result = extend(url, &["status", "a b"]).unwrap();
        assert_eq!(
            result.as_str(),
            "https://dns.api.rackspacecloud.com/v1.0/1234/status/a%20b"
        );
    }

    #[test]
    fn test_extend_empty() {
        let url = Url::parse("https://dns.api.rackspacecloud.com/v1.0/1234/").unwrap();
        let result = extend(url, Vec::<String>::new()).unwrap();
        assert_eq!(
            result.as_str(),
            "https://dns.api.rackspacecloud.com/v1.0/1234"
        );
    }

    #[test]
    fn test_is_valid_base() {
        assert!(is_valid_base(&Url::parse("http://localhost").unwrap()));
        assert!(!is_valid_base(&Url::parse("unix:/run/foo.socket").unwrap()));
        assert!(!is_valid_base(&Url::parse("mailto:root@localhost").unwrap()));
    }
}
