//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "> ";

/// Print a line received from the server and redisplay the prompt
pub fn print_line(line: &str) {
    print!("\r{}\n{}", line, PROMPT);
    std::io::stdout().flush().ok();
}
