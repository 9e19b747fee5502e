//! Interactive confirmation

use std::io::{self, BufRead, Write};

/// Ask `message` until the answer is yes or no. End of input counts as no.
pub fn prompt_yes_or_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<bool> {
    let mut line = String::new();

    loop {
        write!(out, "{} (y/n): ", message)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Please answer 'y' or 'n'.")?,
        }
    }
}

/// [`prompt_yes_or_no`] on the process's stdin and stdout.
pub fn confirm(message: &str) -> io::Result<bool> {
    prompt_yes_or_no(&mut io::stdin().lock(), &mut io::stdout(), message)
}
