// Copyright 2025 JiangLong.
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

//! Generic cursor over a paginated OCM list endpoint
//!
//! A [`Pager`] requests one fixed-size page per call and decodes the items
//! into domain objects. It stops once a page comes back short, or once the
//! server-reported `total` has been reached, and from then on answers
//! without touching the network.

use crate::infrastructure::constants::DEFAULT_PAGE_SIZE;
use crate::infrastructure::ocm::ListRequester;
use crate::shared::error::AddonsError;
use std::ops::AsyncFnMut;
use std::sync::Arc;
use tracing::{debug, Instrument, Span};

type Decoder<R, T> = Arc<dyn Fn(<R as ListRequester>::Item) -> T + Send + Sync>;

/// Items of one page, drained from the pager's buffer.
pub struct Page<'a, T> {
    pub items: std::vec::Drain<'a, T>,
    pub has_more: bool,
}

pub struct Pager<R: ListRequester, T> {
    request: R,
    decode: Decoder<R, T>,
    buffer: Vec<T>,
    index: usize,
    page_size: usize,
    fetched: usize,
    final_page: bool,
    span: Span,
}

impl<R: ListRequester, T> Pager<R, T> {
    pub fn new<F>(request: R, span: Span, decode: F) -> Self
    where
        F: Fn(R::Item) -> T + Send + Sync + 'static,
    {
        Self {
            request,
            decode: Arc::new(decode),
            buffer: Vec::new(),
            index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fetched: 0,
            final_page: false,
            span,
        }
    }

    /// Use a different page size. Values below 1 are clamped to 1.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the next page to be requested (1-based).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.final_page
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn request(&self) -> &R {
        &self.request
    }

    /// Return a fresh pager whose request is narrowed by `predicate`.
    /// The receiver is left untouched and nothing is sent.
    pub fn search(&self, predicate: &str) -> Self {
        Self {
            request: self.request.search(predicate),
            decode: Arc::clone(&self.decode),
            buffer: Vec::new(),
            index: 1,
            page_size: self.page_size,
            fetched: 0,
            final_page: false,
            span: self.span.clone(),
        }
    }

    /// Fetch the next page. Once the final page has been seen this returns an
    /// empty page with `has_more == false` and makes no request.
    pub async fn next_page(&mut self) -> Result<Page<'_, T>, AddonsError> {
        self.buffer.clear();

        if self.final_page {
            return Ok(Page {
                items: self.buffer.drain(..),
                has_more: false,
            });
        }

        let response = self
            .request
            .request_page(self.index, self.page_size)
            .instrument(self.span.clone())
            .await?;

        let received = response.items.len();
        self.fetched += received;

        // The server may cap the page size, so a short page only ends the
        // listing when no total is reported.
        self.final_page = match response.total {
            Some(total) => received == 0 || self.fetched >= total,
            None => received < self.page_size,
        };

        self.span.in_scope(|| {
            debug!(
                page = self.index,
                received,
                total = ?response.total,
                final_page = self.final_page,
                "retrieved page"
            )
        });

        let decode = &self.decode;
        self.buffer.reserve(received);
        self.buffer
            .extend(response.items.into_iter().map(|item| decode(item)));
        self.index += 1;

        Ok(Page {
            items: self.buffer.drain(..),
            has_more: !self.final_page,
        })
    }

    /// Apply `f` to every item of every remaining page, in order. Iteration
    /// stops at the first error, which is returned as-is.
    pub async fn for_each<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: AsyncFnMut(T) -> Result<(), E>,
        E: From<AddonsError>,
    {
        loop {
            let page = self.next_page().await?;
            let has_more = page.has_more;

            for item in page.items {
                f(item).await?;
            }

            if !has_more {
                return Ok(());
            }
        }
    }

    /// Gather every remaining item.
    pub async fn collect(&mut self) -> Result<Vec<T>, AddonsError> {
        let mut result = Vec::new();

        loop {
            let page = self.next_page().await?;
            let has_more = page.has_more;
            result.extend(page.items);

            if !has_more {
                return Ok(result);
            }
        }
    }
}
