//! Line-oriented output for `--plain` mode and scripting

use crate::engine::{EvalError, Severity};
use crate::messages::{format_cell, MessageCatalog};
use crate::session::{RenderOutcome, Renderer, Session, StepView};
use std::io::{self, Write};

/// Writes each applied step as numbered text lines.
///
/// Write failures are remembered and reported by [`TextRenderer::finish`]
/// because [`Renderer::render`] cannot return them.
pub struct TextRenderer<W: Write> {
    out: W,
    count: usize,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            count: 0,
            error: None,
        }
    }

    fn write_step(&mut self, view: &StepView<'_>) -> io::Result<()> {
        self.count += 1;
        for line in view.status_lines {
            match view.severity {
                Severity::Normal => writeln!(self.out, "{:>3}. {line}", self.count)?,
                Severity::Error => writeln!(self.out, "{:>3}. error: {line}", self.count)?,
            }
        }

        let operators: Vec<&str> = view.state.operators.iter().map(|op| op.symbol).collect();
        let output: Vec<String> = view
            .state
            .output
            .iter()
            .map(|operand| format_cell(operand.value))
            .collect();
        writeln!(self.out, "     operations: [{}]", operators.join(", "))?;
        writeln!(self.out, "     output:     [{}]", output.join(", "))?;
        Ok(())
    }

    /// Flush and surface the first write error, if any
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &StepView<'_>) -> RenderOutcome {
        if self.error.is_none() {
            if let Err(err) = self.write_step(view) {
                self.error = Some(err);
            }
        }
        RenderOutcome::Fits
    }
}

/// Evaluate `expression` and print every step to `out`.
///
/// Returns `Ok(false)` when the expression itself was invalid.
pub fn run<W, C>(expression: &str, catalog: &C, out: W) -> io::Result<bool>
where
    W: Write,
    C: MessageCatalog + ?Sized,
{
    let mut session = Session::new(expression).map_err(internal_error)?;
    let mut renderer = TextRenderer::new(out);

    writeln!(
        renderer.out,
        "{}",
        catalog.format(&crate::messages::Message::EvaluatingExpression {
            expression: expression.to_string(),
        })
    )?;

    while session.advance(catalog, &mut renderer) {}

    if let Some(warning) = session.warning() {
        writeln!(renderer.out, "warning: {warning}")?;
    }
    renderer.finish()?;

    Ok(session.error().is_none())
}

fn internal_error(err: EvalError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}
