use std::str::FromStr;

use levelmap_shared::Level;

/// One discrete input event. Each is handled to completion before the next is read.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Click at a buffer pixel.
    ClickAt { x: i64, y: i64 },
    /// Click at a position inside the displayed canvas, whose on-screen size may
    /// differ from the buffer's.
    PointerAt {
        x: f64,
        y: f64,
        rect_width: f64,
        rect_height: f64,
    },
    Resize { width: u32, height: u32 },
    SetLevel { region: String, level: Level },
    Total,
}

fn arg<T: FromStr>(parts: &[&str], i: usize, what: &str) -> Result<T, String> {
    let raw = parts.get(i).ok_or_else(|| format!("missing {what}"))?;
    raw.parse::<T>().map_err(|_| format!("invalid {what}: {raw:?}"))
}

fn expect_arity(parts: &[&str], n: usize, usage: &str) -> Result<(), String> {
    if parts.len() != n + 1 {
        return Err(format!("usage: {usage}"));
    }
    Ok(())
}

/// Parse one input line. Blank lines and `#` comments give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let parts: Vec<&str> = line.split_whitespace().collect();

    let command = match parts[0] {
        "click" => {
            expect_arity(&parts, 2, "click X Y")?;
            Command::ClickAt {
                x: arg(&parts, 1, "x")?,
                y: arg(&parts, 2, "y")?,
            }
        }
        "pointer" => {
            expect_arity(&parts, 4, "pointer X Y WIDTH HEIGHT")?;
            Command::PointerAt {
                x: arg(&parts, 1, "x")?,
                y: arg(&parts, 2, "y")?,
                rect_width: arg(&parts, 3, "width")?,
                rect_height: arg(&parts, 4, "height")?,
            }
        }
        "resize" => {
            expect_arity(&parts, 2, "resize WIDTH HEIGHT")?;
            Command::Resize {
                width: arg(&parts, 1, "width")?,
                height: arg(&parts, 2, "height")?,
            }
        }
        "level" => {
            expect_arity(&parts, 2, "level REGION 0-5")?;
            let index: u8 = arg(&parts, 2, "level")?;
            let level = Level::try_from(index)?;
            Command::SetLevel {
                region: parts[1].to_string(),
                level,
            }
        }
        "total" => {
            expect_arity(&parts, 0, "total")?;
            Command::Total
        }
        other => return Err(format!("unknown command: {other:?}")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use levelmap_shared::Level;

    use super::{Command, parse_line};

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_line("click 12 -3").unwrap(),
            Some(Command::ClickAt { x: 12, y: -3 })
        );
        assert_eq!(
            parse_line("pointer 10.5 20 400 332").unwrap(),
            Some(Command::PointerAt {
                x: 10.5,
                y: 20.0,
                rect_width: 400.0,
                rect_height: 332.0
            })
        );
        assert_eq!(
            parse_line("  resize 1024 850 ").unwrap(),
            Some(Command::Resize {
                width: 1024,
                height: 850
            })
        );
        assert_eq!(
            parse_line("level bj 5").unwrap(),
            Some(Command::SetLevel {
                region: "bj".into(),
                level: Level::Red
            })
        );
        assert_eq!(parse_line("total").unwrap(), Some(Command::Total));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# warm-up clicks").unwrap(), None);
    }

    #[test]
    fn malformed_lines_report_why() {
        assert_eq!(parse_line("click 1").unwrap_err(), "usage: click X Y");
        assert_eq!(
            parse_line("resize wide 10").unwrap_err(),
            "invalid width: \"wide\""
        );
        assert_eq!(
            parse_line("level bj 6").unwrap_err(),
            "level must be 0..=5, got 6"
        );
        assert_eq!(
            parse_line("resize -5 10").unwrap_err(),
            "invalid width: \"-5\""
        );
        assert_eq!(parse_line("zoom 2").unwrap_err(), "unknown command: \"zoom\"");
    }
}
