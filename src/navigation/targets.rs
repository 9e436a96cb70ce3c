//! Target preparation: document filtering and canonical forms
//!
//! Target URLs are recorded by an upstream search stage and rarely match the
//! links a site actually serves byte for byte. Each target is expanded into
//! every form it may show up as during the search: the original string, the
//! URL a render of it resolves to, and its http/https counterpart.

use crate::navigation::{RenderMemo, SearchStats};
use crate::render::{PageRenderer, RenderedPage};
use crate::url::{is_document_url, scheme_counterpart};
use crate::RenderError;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashSet};

/// Produces every URL form treated as equal to a given URL
pub struct UrlCanonicalizer<'r> {
    renderer: &'r dyn PageRenderer,
}

impl<'r> UrlCanonicalizer<'r> {
    pub fn new(renderer: &'r dyn PageRenderer) -> Self {
        Self { renderer }
    }

    /// Renders `url` and returns its canonical forms
    ///
    /// A failed render is not an error: the original and its scheme
    /// counterpart are still returned.
    pub async fn canonical_forms(&self, url: &str) -> BTreeSet<String> {
        let render = self.resolve(url).await;
        self.forms_from(url, &render)
    }

    /// Renders `url` to learn where it resolves
    pub async fn resolve(&self, url: &str) -> Result<RenderedPage, RenderError> {
        self.renderer.render(url).await
    }

    /// Canonical forms of `url` given the outcome of rendering it
    pub fn forms_from(
        &self,
        url: &str,
        render: &Result<RenderedPage, RenderError>,
    ) -> BTreeSet<String> {
        let mut forms = BTreeSet::new();
        forms.insert(url.to_string());

        match render {
            Ok(page) => {
                forms.insert(page.final_url.clone());
            }
            Err(e) => {
                tracing::warn!("Could not resolve target {}: {}", url, e);
            }
        }

        if let Some(counterpart) = scheme_counterpart(url) {
            forms.insert(counterpart);
        }

        forms
    }
}

/// Drops document targets (`.pdf`, `.doc`, `.docx`) and repeated entries
///
/// Order of first appearance is kept.
pub fn filter_document_targets(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.iter()
        .filter(|url| {
            if is_document_url(url) {
                tracing::debug!("Dropping document target {}", url);
                return false;
            }
            true
        })
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

/// The canonicalized target URLs of one computation
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    forms: HashSet<String>,
}

impl TargetSet {
    /// Filters the raw targets and expands every survivor into its canonical forms
    ///
    /// Renders run up to `concurrency` at a time; each one is counted in
    /// `stats`. The renders are returned too, keyed by target URL, so a
    /// target reached during the search is not rendered a second time.
    pub async fn build(
        raw: &[String],
        renderer: &dyn PageRenderer,
        concurrency: usize,
        stats: &mut SearchStats,
    ) -> (Self, RenderMemo) {
        let survivors = filter_document_targets(raw);
        if survivors.is_empty() {
            return (Self::default(), RenderMemo::new());
        }

        let canonicalizer = UrlCanonicalizer::new(renderer);
        let resolver = &canonicalizer;
        let renders: Vec<_> = stream::iter(survivors.iter())
            .map(|url| async move { (url, resolver.resolve(url).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let mut forms = HashSet::new();
        let mut memo = RenderMemo::with_capacity(renders.len());
        for (url, render) in renders {
            stats.record_render(render.is_ok());
            forms.extend(canonicalizer.forms_from(url, &render));
            memo.insert(url.clone(), render);
        }

        tracing::debug!(
            "{} raw targets -> {} kept -> {} canonical forms",
            raw.len(),
            survivors.len(),
            forms.len()
        );

        (Self { forms }, memo)
    }

    /// Builds a target set from already-canonical forms
    pub fn from_forms<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forms: forms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.forms.contains(url)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
