use crate::navigation::SearchContext;
use crate::render::{PageRenderer, RenderedPage};
use crate::RenderError;

/// One rendered page visited during a navigation search
///
/// Built once per distinct URL and never mutated afterwards. Each node owns
/// its trace outright, so sibling branches never share path history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlNode {
    requested_url: String,
    rendered_url: String,
    level: u32,
    trace: Vec<String>,
    children: Vec<String>,
    is_hit: bool,
}

impl CrawlNode {
    /// Renders `url` and materializes the node
    ///
    /// A render of `url` already remembered by the context is reused.
    pub async fn visit(
        renderer: &dyn PageRenderer,
        url: &str,
        level: u32,
        parent_trace: &[String],
        ctx: &mut SearchContext,
    ) -> Self {
        let render = match ctx.take_render(url) {
            Some(render) => render,
            None => {
                let render = renderer.render(url).await;
                ctx.stats.record_render(render.is_ok());
                render
            }
        };
        Self::from_render(url, level, parent_trace, render, ctx)
    }

    /// Materializes a node from the outcome of rendering `url`
    ///
    /// Children are filtered against the context's registry and then
    /// registered there, so no other node can claim them. A failed render
    /// yields a node with no children, no hit, and `url` as its rendered URL.
    ///
    /// The render itself is not counted here; callers count the renders they make.
    pub fn from_render(
        url: &str,
        level: u32,
        parent_trace: &[String],
        render: Result<RenderedPage, RenderError>,
        ctx: &mut SearchContext,
    ) -> Self {
        let mut trace = parent_trace.to_vec();
        trace.push(url.to_string());

        let (rendered_url, children, is_hit) = match render {
            Ok(page) => {
                let children = ctx.claim_children(&page.links);
                let is_hit = ctx.targets.contains(url) || ctx.targets.contains(&page.final_url);
                (page.final_url, children, is_hit)
            }
            Err(e) => {
                tracing::warn!("Render failed for {}: {}", url, e);
                (url.to_string(), Vec::new(), false)
            }
        };

        ctx.stats.nodes_built += 1;

        tracing::debug!(
            "Built node {} (level {}, {} children, hit: {})",
            url,
            level,
            children.len(),
            is_hit
        );

        Self {
            requested_url: url.to_string(),
            rendered_url,
            level,
            trace,
            children,
            is_hit,
        }
    }

    pub fn requested_url(&self) -> &str {
        &self.requested_url
    }

    pub fn rendered_url(&self) -> &str {
        &self.rendered_url
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Path from the root to this node, inclusive
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn is_hit(&self) -> bool {
        self.is_hit
    }
}
