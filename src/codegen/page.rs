//! Standalone HTML preview page embedding a generated script

use crate::compiler::validate_canvas_name;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Page layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Document title
    pub title: String,
    /// Canvas element id; must match the canvas name the script was compiled for
    pub canvas: String,
    /// Initial canvas width in pixels
    pub width: u32,
    /// Initial canvas height in pixels
    pub height: u32,
    /// Resize the canvas to the window on load and on resize
    pub fit_window: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "xnilang preview".to_string(),
            canvas: "main".to_string(),
            width: 100,
            height: 100,
            fit_window: true,
        }
    }
}

impl PageOptions {
    /// Reject canvas names that are not plain identifiers
    pub fn validate(&self) -> Result<()> {
        validate_canvas_name(&self.canvas)
    }
}

/// Wrap `script` in an HTML document that starts the animation on load
pub fn render_page(script: &str, options: &PageOptions) -> Result<String> {
    options.validate()?;
    let canvas = &options.canvas;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&options.title)));
    html.push_str("<style>html, body { margin: 0; padding: 0; overflow: hidden; }</style>\n");
    html.push_str("<script type=\"text/javascript\">\n");
    html.push_str("function StartAnimation() {\n");
    html.push_str(&format!(
        "var {c} = document.getElementById(\"{c}\");\n",
        c = canvas
    ));
    html.push_str(script);
    html.push_str("\n}\n");
    html.push_str("window.addEventListener(\"load\", function() {\n");
    if options.fit_window {
        html.push_str("    function OnResize() {\n");
        html.push_str(&format!(
            "        var canvas = document.getElementById(\"{}\");\n",
            canvas
        ));
        html.push_str("        canvas.width = window.innerWidth;\n");
        html.push_str("        canvas.height = window.innerHeight;\n");
        html.push_str("    }\n");
        html.push_str("    OnResize();\n");
        html.push_str("    window.addEventListener(\"resize\", OnResize);\n");
    }
    html.push_str("    StartAnimation();\n");
    html.push_str("});\n");
    html.push_str("</script>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<canvas id=\"{}\" width=\"{}px\" height=\"{}px\"></canvas>\n",
        canvas, options.width, options.height
    ));
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
