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

//! A stream of resources.

use async_stream::try_stream;
use async_trait::async_trait;
use futures::pin_mut;
use futures::stream::{Stream, TryStreamExt};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::Error;

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Link to the next page (if any).
    pub next: Option<Url>,
}

/// A single resource.
///
/// Defines the relationship between a listing root and its items.
pub trait PaginatedResource: Sized {
    /// Root type of the listing.
    type Root: DeserializeOwned + Send + Into<Page<Self>>;
}

#[async_trait]
pub(crate) trait FetchNext {
    /// Fetch the first page (`None`) or the page behind the link.
    async fn fetch_next<T: DeserializeOwned + Send>(&self, next: Option<Url>) -> Result<T, Error>;
}

fn chunks<F, T>(builder: F) -> impl Stream<Item = Result<Vec<T>, Error>>
where
    F: FetchNext,
    T: PaginatedResource + Unpin,
{
    let mut next: Option<Url> = None;

    try_stream! {
        loop {
            let result: T::Root = builder.fetch_next(next.take()).await?;
            let page: Page<T> = result.into();
            if page.items.is_empty() {
                break
            }
            yield page.items;
            match page.next {
                Some(url) => next = Some(url),
                None => break,
            }
        }
    }
}

/// Creates a paginated resource stream.
pub(crate) fn paginated<F, T>(builder: F) -> impl Stream<Item = Result<T, Error>>
where
    F: FetchNext,
    T: PaginatedResource + Unpin,
{
    try_stream! {
        let iter = chunks(builder);
        pin_mut!(iter);
        while let Some(chunk) = iter.try_next().await? {
            for item in chunk {
                yield item;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures::pin_mut;
    use futures::stream::TryStreamExt;
    use reqwest::Url;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde_json::json;

    use super::{paginated, FetchNext, Page, PaginatedResource};
    use crate::{Error, ErrorKind};

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Item(u32);

    #[derive(Debug, Deserialize)]
    struct Root {
        items: Vec<Item>,
        next: Option<Url>,
    }

    impl PaginatedResource for Item {
        type Root = Root;
    }

    impl From<Root> for Page<Item> {
        fn from(value: Root) -> Page<Item> {
            Page {
                items: value.items,
                next: value.next,
            }
        }
    }

    #[derive(Debug)]
    struct Pages {
        requested: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl FetchNext for Pages {
        async fn fetch_next<T: DeserializeOwned + Send>(
            &self,
            next: Option<Url>,
        ) -> Result<T, Error> {
            let key = next.map(|u| u.to_string());
            self.requested.lock().unwrap().push(key.clone());
            let body = match key.as_deref() {
                None => json!({"items": [1, 2], "next": "http://dns.local/page/2"}),
                Some("http://dns.local/page/2") => json!({"items": [3], "next": null}),
                Some(other) => {
                    return Err(Error::new(ErrorKind::InvalidInput, other.to_string()));
                }
            };
            Ok(serde_json::from_value(body).unwrap())
        }
    }

    #[tokio::test]
    async fn test_follows_next_links() {
        let pages = Pages {
            requested: Mutex::new(Vec::new()),
        };
        let items = {
            let stream = paginated::<_, Item>(&pages);
            pin_mut!(stream);
            stream.try_collect::<Vec<_>>().await.unwrap()
        };
        assert_eq!(items, vec![Item(1), Item(2), Item(3)]);
        assert_eq!(
            *pages.requested.lock().unwrap(),
            vec![None, Some("http://dns.local/page/2".to_string())]
        );
    }

    #[async_trait]
    impl<'a, F: FetchNext + Sync> FetchNext for &'a F {
        async fn fetch_next<T: DeserializeOwned + Send>(
            &self,
            next: Option<Url>,
        ) -> Result<T, Error> {
            (**self).fetch_next(next).await
        }
    }
}
