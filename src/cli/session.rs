use crate::dashboard::{Dashboard, DashboardView};
use crate::error::Result;
use crate::models::DateRange;
use crate::writers::ChartRenderer;
use std::io::{BufRead, Write};
use tracing::warn;

/// Render one recomputation, reporting a failed cycle on `prompt`
///
/// Returns whether the cycle completed. Only errors writing to `prompt`
/// itself are propagated.
pub fn render_cycle<P: Write>(
    view: &DashboardView,
    renderer: &mut dyn ChartRenderer,
    prompt: &mut P,
) -> Result<bool> {
    match view.render(renderer) {
        Ok(()) => Ok(true),
        Err(e) => {
            warn!(error = %e, "render cycle failed");
            writeln!(prompt, "Render failed: {}", e)?;
            Ok(false)
        }
    }
}

const PROMPT: &str = "date range (START END | START..END | all | quit)> ";

/// Run the interactive date control until `quit` or end of input
///
/// Each valid line triggers one full filter/aggregate/render cycle. Invalid
/// input is reported on `prompt` and the loop waits for the next line.
/// Returns the number of completed render cycles.
pub fn run_session<R, P>(
    dashboard: &Dashboard,
    mut input: R,
    prompt: &mut P,
    renderer: &mut dyn ChartRenderer,
) -> Result<usize>
where
    R: BufRead,
    P: Write,
{
    let mut cycles = 0;
    write!(prompt, "{}", PROMPT)?;
    prompt.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "rejected non-UTF-8 input line");
                writeln!(prompt, "Input is not valid UTF-8: {}", e)?;
                write!(prompt, "{}", PROMPT)?;
                prompt.flush()?;
                continue;
            }
        };
        let trimmed = line.trim();

        if matches!(trimmed, "q" | "quit" | "exit") {
            break;
        }

        match DateRange::parse(trimmed) {
            Ok(range) => {
                let view = dashboard.refresh(range);
                if render_cycle(&view, renderer, prompt)? {
                    cycles += 1;
                }
            }
            Err(e) => {
                warn!(input = trimmed, error = %e, "rejected date range");
                writeln!(prompt, "{}", e)?;
            }
        }

        write!(prompt, "{}", PROMPT)?;
        prompt.flush()?;
    }

    Ok(cycles)
}
