//! Interactive source input.

use std::io::{self, BufRead, Write};

/// Line that ends interactive input.
pub const SENTINEL: &str = "end";

/// Reads lines from `input` until a line containing only [`SENTINEL`] (surrounding whitespace ignored) or end of input.
/// Prompts are written to `prompt`. The sentinel line is not part of the returned source.
pub fn read_until_sentinel(input: impl BufRead, mut prompt: impl Write) -> io::Result<String> {
    writeln!(
        prompt,
        "Enter your code (type '{}' on a new line to finish):",
        SENTINEL
    )?;

    let mut lines = Vec::new();
    let mut input = input.lines();
    loop {
        write!(prompt, "> ")?;
        prompt.flush()?;

        let line = match input.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim() == SENTINEL {
            break;
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_sentinel() {
        let input = "int x;\nx = 1;\n  end  \nprint(x);\n";
        let source = read_until_sentinel(input.as_bytes(), io::sink()).unwrap();
        assert_eq!(source, "int x;\nx = 1;");
    }

    #[test]
    fn test_stops_at_eof() {
        let source = read_until_sentinel("print(1);".as_bytes(), io::sink()).unwrap();
        assert_eq!(source, "print(1);");
    }

    #[test]
    fn test_prompts() {
        let mut prompt = Vec::new();
        read_until_sentinel("a\nend\n".as_bytes(), &mut prompt).unwrap();
        assert_eq!(
            String::from_utf8(prompt).unwrap(),
            "Enter your code (type 'end' on a new line to finish):\n> > "
        );
    }

    #[test]
    fn test_identifier_containing_sentinel() {
        let source = read_until_sentinel("int endx;\nend".as_bytes(), io::sink()).unwrap();
        assert_eq!(source, "int endx;");
    }
}
