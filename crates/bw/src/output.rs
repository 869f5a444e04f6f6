//! Status lines on stderr.
//!
//! Rendered HTML and CSS go to stdout; everything a person reads while a
//! command runs goes through [`Status`].

use bw_blocks::Outcome;
use bw_page::PageReport;
use bw_theme::{ResolvedTheme, ThemeSource};
use console::{Style, Term};

/// How a status line is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Done,
    Heading,
    Warn,
    Fail,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Done => Style::new().green(),
            Self::Heading => Style::new().cyan().bold(),
            Self::Warn => Style::new().yellow(),
            Self::Fail => Style::new().red(),
        }
    }
}

/// Writer for status lines.
pub(crate) struct Status {
    term: Term,
}

impl Status {
    pub(crate) fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn line(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn lines(&self, lines: &[(Tone, String)]) {
        for (tone, msg) in lines {
            self.line(*tone, msg);
        }
    }
}

fn source_label(source: ThemeSource) -> &'static str {
    match source {
        ThemeSource::Explicit => "explicit",
        ThemeSource::Candidate => "cascade",
        ThemeSource::Fallback => "fallback",
        ThemeSource::Language => "language sheet",
    }
}

/// One-line description of a resolved theme.
pub(crate) fn theme_line(theme: &ResolvedTheme) -> String {
    format!(
        "Theme: {} ({}, {} variables)",
        theme.path,
        source_label(theme.source),
        theme.variables.len()
    )
}

/// Summary of an assembled page: language, theme, block outcomes and every
/// failed step.
pub(crate) fn report_lines(report: &PageReport) -> Vec<(Tone, String)> {
    let mut lines = vec![(Tone::Heading, format!("Language: {}", report.language))];
    lines.push(match &report.theme {
        Some(theme) => (Tone::Plain, theme_line(theme)),
        None => (Tone::Warn, "Theme: none resolved".to_owned()),
    });

    let outcomes = report.block_outcomes();
    let count = |wanted: Outcome| outcomes.iter().filter(|(_, _, o)| *o == wanted).count();
    let failed = count(Outcome::Failed);
    lines.push((
        if failed == 0 { Tone::Plain } else { Tone::Warn },
        format!(
            "Blocks: {} decorated, {} unregistered, {failed} failed",
            count(Outcome::Decorated),
            count(Outcome::Unregistered),
        ),
    ));
    for (phase, name, outcome) in &outcomes {
        if *outcome == Outcome::Failed {
            lines.push((Tone::Fail, format!("  {phase}: block {name} failed")));
        }
    }
    for (phase, step) in report.failed_steps() {
        lines.push((Tone::Warn, format!("{phase}: {step} skipped")));
    }
    lines
}
