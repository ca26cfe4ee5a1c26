//! Text-showing operators

use crate::Align;
use std::io::Write;

/// One line of encoded text ready to be placed on an overlay
#[derive(Debug, Clone)]
pub struct TextRun<'a> {
    /// Font resource name on the overlay, e.g. "F1"
    pub font: &'a str,
    pub size: f32,
    /// String operand including its delimiters, e.g. `<48656C6C6F>`
    pub encoded: &'a str,
    /// Advance width in points
    pub width: f64,
}

impl TextRun<'_> {
    /// Left edge of the run when anchored at `x`
    pub fn start_x(&self, x: f64, align: Align) -> f64 {
        match align {
            Align::Left => x,
            Align::Center => x - self.width / 2.0,
            Align::Right => x - self.width,
        }
    }

    /// Append a `BT ... ET` block showing the run in black with its
    /// baseline at `y`
    pub fn write_to(&self, out: &mut Vec<u8>, x: f64, y: f64, align: Align) -> std::io::Result<()> {
        let start = self.start_x(x, align);

        writeln!(out, "BT")?;
        writeln!(out, "0 0 0 rg")?;
        writeln!(out, "/{} {} Tf", self.font, self.size)?;
        writeln!(out, "{start} {y} Td")?;
        writeln!(out, "{} Tj", self.encoded)?;
        writeln!(out, "ET")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(width: f64) -> TextRun<'static> {
        TextRun {
            font: "F1",
            size: 13.0,
            encoded: "<41>",
            width,
        }
    }

    #[test]
    fn test_start_x() {
        let run = run(80.0);
        assert_eq!(run.start_x(300.0, Align::Left), 300.0);
        assert_eq!(run.start_x(300.0, Align::Center), 260.0);
        assert_eq!(run.start_x(300.0, Align::Right), 220.0);
    }

    #[test]
    fn test_write_centered() {
        let mut out = Vec::new();
        run(24.0).write_to(&mut out, 100.0, 37.0, Align::Center).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "BT\n0 0 0 rg\n/F1 13 Tf\n88 37 Td\n<41> Tj\nET\n"
        );
    }

    #[test]
    fn test_write_appends() {
        let mut out = b"q\n".to_vec();
        run(0.0).write_to(&mut out, 10.5, 20.25, Align::Left).unwrap();
        run(0.0).write_to(&mut out, 30.0, 20.25, Align::Right).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("q\nBT\n"));
        assert!(text.contains("10.5 20.25 Td\n"));
        assert!(text.contains("30 20.25 Td\n"));
        assert_eq!(text.matches("ET\n").count(), 2);
    }
}
