use console::{Alignment, Style, Term, measure_text_width, pad_str};
use std::io::Write;

/// Separator placed between breadcrumb elements in the header.
pub const CRUMB_SEPARATOR: &str = " > ";
/// Separator placed between builtins in the footer.
pub const FOOTER_SEPARATOR: &str = "  |  ";

/// Breadcrumb shown above the menu: the interpreter name followed by the
/// description of every page from the root to the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub crumbs: Vec<String>,
}

/// One `key  description` line of the body or the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub description: String,
}

impl Row {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Draws one screen of the menu.
pub trait Renderer {
    fn render(&mut self, header: &Header, body: &[Row], footer: &[Row]);
}

/// [`Renderer`] drawing the menu inside a box:
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ [menu] home > page 1                         │
/// ├──────────────────────────────────────────────┤
/// │                                              │
/// │ 1  command 1                                 │
/// │ 2  command 2                                 │
/// │                                              │
/// ├──────────────────────────────────────────────┤
/// │ e  exit application  |  q  quit current page │
/// └──────────────────────────────────────────────┘
/// ```
pub struct BoxRenderer {
    out: Box<dyn Write>,
    width: Option<usize>,
    plain: bool,
}

impl BoxRenderer {
    /// Renderer writing to stdout, sized to the terminal on every frame.
    pub fn terminal() -> Self {
        Self {
            out: Box::new(Term::stdout()),
            width: None,
            plain: false,
        }
    }

    /// Renderer writing to `out` with a fixed total width.
    pub fn new(out: Box<dyn Write>, width: usize) -> Self {
        Self {
            out,
            width: Some(width),
            plain: false,
        }
    }

    /// Disable ANSI styling even when the output supports it.
    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    fn style(&self, style: Style) -> Style {
        if self.plain {
            style.force_styling(false)
        } else {
            style
        }
    }

    fn width(&self) -> usize {
        self.width
            .unwrap_or_else(|| usize::from(Term::stdout().size().1))
    }

    /// Lay out the frame as lines of exactly the configured width.
    pub fn frame(&self, header: &Header, body: &[Row], footer: &[Row]) -> Vec<String> {
        // Two border columns and one space of padding on each side.
        let inner = self.width().saturating_sub(4).max(1);
        let border = self.style(Style::new().cyan());
        let horizontal = "─".repeat(inner + 2);

        let boxed = |content: String| {
            let content = pad_str(&content, inner, Alignment::Left, Some("…"));
            format!("{} {} {}", border.apply_to("│"), content, border.apply_to("│"))
        };

        let mut lines = Vec::new();
        lines.push(border.apply_to(format!("┌{horizontal}┐")).to_string());
        lines.push(boxed(self.header_line(header)));
        lines.push(border.apply_to(format!("├{horizontal}┤")).to_string());
        lines.push(boxed(String::new()));
        let key_width = body
            .iter()
            .map(|row| measure_text_width(&row.key))
            .max()
            .unwrap_or(0);
        for row in body {
            lines.push(boxed(self.body_line(row, key_width)));
        }
        lines.push(boxed(String::new()));
        lines.push(border.apply_to(format!("├{horizontal}┤")).to_string());
        lines.push(boxed(self.footer_line(footer)));
        lines.push(border.apply_to(format!("└{horizontal}┘")).to_string());
        lines
    }

    fn header_line(&self, header: &Header) -> String {
        let base = self.style(Style::new().cyan());
        let mut line = format!("{} ", base.clone().bold().apply_to(&header.name));
        let last = header.crumbs.len().saturating_sub(1);
        for (index, crumb) in header.crumbs.iter().enumerate() {
            if index == last {
                line.push_str(&base.clone().bold().underlined().apply_to(crumb).to_string());
            } else {
                line.push_str(&base.apply_to(crumb).to_string());
                line.push_str(&base.apply_to(CRUMB_SEPARATOR).to_string());
            }
        }
        line
    }

    fn body_line(&self, row: &Row, key_width: usize) -> String {
        let key = pad_str(&row.key, key_width, Alignment::Left, None);
        format!(
            "{}  {}",
            self.style(Style::new().cyan().bold()).apply_to(key),
            row.description
        )
    }

    fn footer_line(&self, footer: &[Row]) -> String {
        let separator = self
            .style(Style::new().dim())
            .apply_to(FOOTER_SEPARATOR)
            .to_string();
        footer
            .iter()
            .map(|row| {
                format!(
                    "{}  {}",
                    self.style(Style::new().cyan().bold()).apply_to(&row.key),
                    row.description
                )
            })
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

impl Renderer for BoxRenderer {
    fn render(&mut self, header: &Header, body: &[Row], footer: &[Row]) {
        let lines = self.frame(header, body, footer);
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            log::warn!("failed to draw menu: {e}");
        }
    }
}
