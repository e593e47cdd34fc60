use std::fmt::Write as _;

use crate::{
    compile::plan::{BandDraw, ChunkDraw, PaintPlan, Sampling, Visibility},
    foundation::error::{CollageError, CollageResult},
    render::backend::PaintBackend,
};

const HIDE_SMALL_CLASS: &str = "collage-hide-small";

/// Paints a plan as static HTML: a fixed full-viewport container holding absolutely
/// positioned chunk and band elements.
///
/// Bands carry `data-band="<index>"` so a scroll host can find them and apply the
/// presenter's translations.
#[derive(Debug, Default)]
pub struct HtmlBackend {
    class_name: Option<String>,
    out: String,
    open: bool,
}

impl HtmlBackend {
    /// Backend with an extra class on the container.
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    /// Markup painted so far.
    pub fn html(&self) -> &str {
        &self.out
    }

    /// Consume the backend, returning the markup.
    pub fn into_html(self) -> String {
        self.out
    }

    fn ensure_open(&self) -> CollageResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(CollageError::render("html backend has no open frame"))
        }
    }

    fn push(&mut self, args: std::fmt::Arguments<'_>) -> CollageResult<()> {
        self.out
            .write_fmt(args)
            .map_err(|e| CollageError::render(format!("write html: {e}")))
    }
}

impl PaintBackend for HtmlBackend {
    fn begin(&mut self, plan: &PaintPlan) -> CollageResult<()> {
        if self.open {
            return Err(CollageError::render("html backend already has an open frame"));
        }
        self.out.clear();
        self.open = true;

        let bp = plan.small_viewport_breakpoint_px;
        if bp > 0 {
            self.push(format_args!(
                "<style>@media (max-width: {}px) {{ .{HIDE_SMALL_CLASS} {{ display: none; }} }}</style>\n",
                bp - 1
            ))?;
        }

        let class = match &self.class_name {
            Some(extra) => format!("collage-background {}", escape_attr(extra)),
            None => "collage-background".to_string(),
        };
        self.push(format_args!(
            "<div class=\"{class}\" aria-hidden=\"true\" style=\"position: fixed; inset: 0; \
             z-index: -10; overflow: hidden; background-color: {}\">\n",
            plan.background
        ))
    }

    fn draw_chunk(&mut self, op: &ChunkDraw) -> CollageResult<()> {
        self.ensure_open()?;
        let class = match op.visibility {
            Visibility::Always => "collage-chunk".to_string(),
            Visibility::AtLeast { .. } => format!("collage-chunk {HIDE_SMALL_CLASS}"),
        };
        let rendering = match op.sampling {
            Sampling::Smooth => "",
            Sampling::NearestNeighbor => " image-rendering: pixelated;",
        };
        self.push(format_args!(
            "  <div class=\"{class}\" style=\"position: absolute; left: {}%; top: {}%; \
             width: {}%; height: {}%; z-index: {}; background-image: url('{}'); \
             background-size: cover; background-position: {}% {}%;{rendering} opacity: {}\"></div>\n",
            op.rect.left,
            op.rect.top,
            op.rect.width,
            op.rect.height,
            op.z,
            css_url_attr(&op.asset),
            op.crop_origin.x,
            op.crop_origin.y,
            op.opacity,
        ))
    }

    fn draw_band(&mut self, op: &BandDraw) -> CollageResult<()> {
        self.ensure_open()?;
        self.push(format_args!(
            "  <div class=\"collage-glitch-band\" data-band=\"{}\" style=\"position: absolute; \
             left: 0; right: 0; top: {}%; height: {}%; z-index: {}; transform: translateX({}px); \
             background-image: url('{}'); background-size: cover; background-position: 50% {}%; \
             opacity: {}; --band-offset: {}px; --band-delay: {}\"></div>\n",
            op.band_index,
            op.top,
            op.height,
            op.z,
            op.resting_offset_px,
            css_url_attr(&op.asset),
            op.crop_y,
            op.opacity,
            op.resting_offset_px,
            op.animation_delay_s,
        ))
    }

    fn finish(&mut self) -> CollageResult<()> {
        self.ensure_open()?;
        self.open = false;
        self.push(format_args!("</div>\n"))
    }
}

// Asset references sit in a single-quoted CSS string inside a double-quoted attribute:
// escape for CSS first, then for the attribute.
fn css_url_attr(asset: &str) -> String {
    escape_attr(&css_string(asset))
}

fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\A "),
            '\r' => out.push_str("\\D "),
            '\u{c}' => out.push_str("\\C "),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
