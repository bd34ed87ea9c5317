//! Per-language minifiers.
//!
//! The pipeline only talks to the [`Minifier`] trait. [`BundledMinifier`] wires
//! it to `minify-html`, `lightningcss` and `oxc`.

use crate::inline_script;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Upper bound on JS compress passes; stops earlier once a pass stops shrinking.
pub const JS_PASSES: usize = 3;

pub trait Minifier {
    fn html(&self, src: &str) -> Result<Vec<u8>, String>;
    fn css(&self, src: &str) -> Result<String, String>;
    fn js(&self, src: &str) -> Result<String, String>;
}

pub struct BundledMinifier {
    html_cfg: minify_html::Cfg,
}

impl BundledMinifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            html_cfg: html_policy(),
        }
    }
}

impl Default for BundledMinifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed HTML policy: drop comments and optional tags, shorten the doctype,
/// minify embedded style, keep template fragments intact.
///
/// minify-html has no switch for sorting attributes or class names and never
/// does either, so those stay in source order. Inline scripts are handled by
/// [`inline_script`] with the JS policy instead of minify-html's own backend.
fn html_policy() -> minify_html::Cfg {
    let mut cfg = minify_html::Cfg::new();
    cfg.minify_css = true;
    cfg.minify_js = false;
    cfg.keep_comments = false;
    cfg.keep_closing_tags = false;
    cfg.keep_html_and_head_opening_tags = false;
    cfg.keep_spaces_between_attributes = false;
    cfg.do_not_minify_doctype = false;
    cfg.ensure_spec_compliant_unquoted_attribute_values = true;
    cfg.preserve_brace_template_syntax = true;
    cfg.preserve_chevron_percent_template_syntax = true;
    cfg
}

fn js_policy() -> MinifierOptions {
    MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: true,
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions::smallest()),
    }
}

/// One parse, compress, mangle and print round.
fn js_pass(src: &str) -> Result<String, String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, src, SourceType::mjs()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let reasons: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
        return Err(if reasons.is_empty() {
            "unrecoverable syntax error".to_string()
        } else {
            reasons.join("; ")
        });
    }

    let mut program = parsed.program;
    let minified = oxc_minifier::Minifier::new(js_policy()).build(&allocator, &mut program);
    Ok(Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(minified.scoping)
        .build(&program)
        .code)
}

/// Repeats `pass` up to `max_passes` times, keeping the first result and every
/// later one that is strictly smaller. The first non-shrinking pass ends the loop.
fn run_passes<F>(src: &str, max_passes: usize, mut pass: F) -> Result<String, String>
where
    F: FnMut(&str) -> Result<String, String>,
{
    let mut current = src.to_string();

    for n in 0..max_passes {
        let next = pass(&current).map_err(|e| format!("pass {}: {e}", n + 1))?;
        if n > 0 && next.len() >= current.len() {
            log::trace!("JS reached a fixed point after {n} passes");
            break;
        }
        current = next;
    }

    Ok(current)
}

impl Minifier for BundledMinifier {
    fn html(&self, src: &str) -> Result<Vec<u8>, String> {
        let src = inline_script::minify_scripts(src, |body| self.js(body))?;
        Ok(minify_html::minify(src.as_bytes(), &self.html_cfg))
    }

    fn css(&self, src: &str) -> Result<String, String> {
        let mut sheet =
            StyleSheet::parse(src, ParserOptions::default()).map_err(|e| format!("{e}"))?;
        sheet
            .minify(MinifyOptions::default())
            .map_err(|e| format!("{e}"))?;
        sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map(|res| res.code)
            .map_err(|e| format!("{e}"))
    }

    fn js(&self, src: &str) -> Result<String, String> {
        run_passes(src, JS_PASSES, js_pass)
    }
}
