//! Presentation adapters. The pipeline only needs something that can supply a
//! [`SampleInput`] and render an [`Assessment`].

use crate::error::{Error, Result};
use crate::pipeline::Assessment;
use crate::sample::{Category, Sample, SampleInput};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Supplies form input and shows results; the pipeline never depends on it.
pub trait Presenter {
    /// Next input, or `None` when the user is done.
    fn read_input(&mut self) -> Result<Option<SampleInput>>;
    /// Shows a successful assessment.
    fn render(&mut self, assessment: &Assessment) -> Result<()>;
    /// Shows a rejected input or failed prediction.
    fn render_error(&mut self, error: &Error) -> Result<()>;
}

/// Line-oriented prompts on any reader/writer pair.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    defaults: Sample,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    /// Prompts start from the form's default values.
    pub fn new(input: R, output: W) -> Self {
        TerminalPresenter {
            input,
            output,
            defaults: Sample::default(),
        }
    }

    /// Consumes the presenter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed line; `None` on EOF or `exit`.
    fn line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    /// Prompts until the answer parses; an empty answer takes `default`.
    fn ask<T>(&mut self, label: &str, default: T) -> Result<Option<T>>
    where
        T: FromStr + Display + Copy,
        T::Err: Display,
    {
        loop {
            let Some(answer) = self.line(&format!("{label} [{default}]"))? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse() {
                Ok(v) => return Ok(Some(v)),
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        }
    }

    fn choose<C: Category + FromStr + Display>(&mut self, label: &str, default: C) -> Result<Option<C>>
    where
        C::Err: Display,
    {
        let choices: Vec<_> = C::ALL.iter().map(|c| c.label()).collect();
        self.ask(&format!("{label} ({})", choices.join(" / ")), default)
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn read_input(&mut self) -> Result<Option<SampleInput>> {
        let d = self.defaults;

        let Some(age) = self.ask("Your Age", d.age)? else { return Ok(None) };
        let Some(hair_type) = self.choose("Hair Type", d.hair_type)? else { return Ok(None) };
        let Some(tool_type) = self.choose("Heat Tool Used", d.tool_type)? else { return Ok(None) };
        let Some(temperature) = self.ask("Temperature (°C)", d.temperature)? else { return Ok(None) };
        let Some(duration_min) = self.ask("Duration per Session (minutes)", d.duration_min)? else {
            return Ok(None);
        };
        let Some(usage_freq) = self.choose("How Often Do You Use Heat?", d.usage_freq)? else {
            return Ok(None);
        };
        let Some(total_usage_months) =
            self.ask("How Many Months Have You Been Using Heat Tools?", d.total_usage_months)?
        else {
            return Ok(None);
        };

        Ok(Some(SampleInput {
            age,
            hair_type: hair_type.label().to_string(),
            tool_type: tool_type.label().to_string(),
            temperature,
            duration_min,
            usage_freq: usage_freq.label().to_string(),
            total_usage_months,
        }))
    }

    fn render(&mut self, a: &Assessment) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "🔥 {a} ({})", a.severity_color)?;
        writeln!(self.output)?;
        writeln!(self.output, "💡 Hair Care Tips")?;
        writeln!(self.output, "{}", a.headline)?;
        for tip in a.advisory {
            writeln!(self.output, "- {tip}")?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn render_error(&mut self, error: &Error) -> Result<()> {
        writeln!(self.output, "❌ {error}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AdvisoryTier;
    use std::io::Cursor;

    fn presenter(script: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPresenter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn empty_answers_take_form_defaults() {
        let mut p = presenter("\n\n\n\n\n\n\n");
        let input = p.read_input().unwrap().unwrap();
        assert_eq!(input, SampleInput::from(&Sample::default()));
    }

    #[test]
    fn parses_answers_and_reprompts_on_bad_ones() {
        let mut p = presenter("24\nfrizzy\nstraight\nstraightener\n230\n45\ndaily\n18\n");
        let input = p.read_input().unwrap().unwrap();
        assert_eq!(input.age, 24);
        assert_eq!(input.hair_type, "Straight");
        assert_eq!(input.tool_type, "Straightener");
        assert_eq!(input.temperature, 230.0);
        assert_eq!(input.usage_freq, "Daily");
        assert_eq!(input.total_usage_months, 18);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("unknown hair type \"frizzy\""));
        assert!(out.contains("Hair Type (Straight / Wavy / Curly / Coily) [Straight]"));
    }

    #[test]
    fn exit_and_eof_end_the_session() {
        assert!(presenter("exit\n").read_input().unwrap().is_none());
        assert!(presenter("30\nWavy\n").read_input().unwrap().is_none());
    }

    #[test]
    fn renders_result_box_and_tips() {
        let mut p = presenter("");
        let tier = AdvisoryTier::Moderate;
        p.render(&Assessment {
            score: 2,
            message: "Mild risk, consider reducing heat usage!",
            severity_color: "#e67e22",
            tier,
            headline: tier.headline(),
            advisory: tier.tips(),
        })
        .unwrap();

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Damage Score: 2/5"));
        assert!(out.contains("- Limit sessions to under 20 minutes"));
    }
}
